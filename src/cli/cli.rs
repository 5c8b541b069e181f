use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use http::Method;

use crate::demo;
use crate::dispatcher::Dispatcher;
use crate::generator::SchemaSynthesizer;
use crate::payload::{merge_payload, parse_query_params, StaticPayload};
use crate::router::RouteRegistry;

#[derive(Parser)]
#[command(name = "routecast")]
#[command(about = "routecast CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize the schema document for the discovered routes
    Schema {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the discovered route table
    Routes,
    /// Dispatch one request and print the outcome
    Dispatch {
        #[arg(short, long)]
        method: String,

        #[arg(short, long)]
        path: String,

        /// JSON request body
        #[arg(long)]
        payload: Option<String>,
    },
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Schema { output } => {
            let types = demo::type_registry();
            let registry = RouteRegistry::discover(demo::handler_types());
            let mut synth = SchemaSynthesizer::new(&types);
            synth.generate(&registry);
            match output {
                Some(path) => synth.save_to_file(path)?,
                None => println!("{}", serde_json::to_string_pretty(&synth.document())?),
            }
            Ok(())
        }
        Commands::Routes => {
            let registry = RouteRegistry::discover(demo::handler_types());
            registry.dump_routes();
            Ok(())
        }
        Commands::Dispatch {
            method,
            path,
            payload,
        } => {
            let verb = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .map_err(|_| anyhow!("invalid HTTP method: {method}"))?;

            let query = parse_query_params(path);
            let merged = merge_payload(
                &verb,
                &query,
                Some("application/json"),
                payload.as_deref(),
            );
            let provider = StaticPayload(merged);

            let dispatcher = Dispatcher::new(
                Arc::new(RouteRegistry::discover(demo::handler_types())),
                Arc::new(demo::type_registry()),
            );
            let route_path = path.split('?').next().unwrap_or(path);
            let outcome = dispatcher.handle(verb.as_str(), route_path, &provider);

            println!("{}", outcome.status_line());
            println!("Content-Type: {}", outcome.content_type);
            println!();
            println!("{}", outcome.body);
            Ok(())
        }
    }
}

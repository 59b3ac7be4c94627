// Clinic Router - rule-based pediatric clinic routing prototype
// Main entry point

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use clinic_router::cli::display::{decision_json, format_decision, format_rules};
use clinic_router::cli::Repl;
use clinic_router::config::{load_config, Config};
use clinic_router::errors::invalid_input_help;
use clinic_router::patient::PatientCase;
use clinic_router::router::route;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "clinic-router")]
#[command(about = "Rule-based pediatric clinic routing prototype", version)]
struct Args {
    /// Run mode (interactive session when omitted)
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Route a single patient and print the recommendation
    Route {
        /// Patient age in years
        #[arg(long)]
        age: String,
        /// Primary presenting concern, e.g. "adhd" or "Autism Spectrum"
        #[arg(long)]
        concern: String,
        /// Comorbidity (repeatable or comma separated)
        #[arg(long = "comorbidity", value_delimiter = ',')]
        comorbidities: Vec<String>,
        /// Print the case and decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the routing rule table
    Rules,
    /// Start the interactive session (default)
    Session,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config()?;
    init_tracing(&config);

    match args.command {
        Some(Command::Route {
            age,
            concern,
            comorbidities,
            json,
        }) => run_route(&age, &concern, &comorbidities, json),
        Some(Command::Rules) => {
            println!("{}", format_rules());
            Ok(())
        }
        Some(Command::Session) | None => run_session(config),
    }
}

fn init_tracing(config: &Config) {
    // Default: WARN, or DEBUG with debug_logging; RUST_LOG always wins
    let default_level = if config.debug_logging { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Bridge log crate → tracing (rustyline logs through `log`)
    tracing_log::LogTracer::init().ok();
}

fn run_route(age: &str, concern: &str, comorbidities: &[String], json: bool) -> Result<()> {
    let case = PatientCase::parse(age, concern, comorbidities)
        .map_err(|e| anyhow!(invalid_input_help(&e)))?;
    let decision = route(&case);

    if json {
        let text = serde_json::to_string_pretty(&decision_json(&case, &decision))
            .context("Failed to serialize decision")?;
        println!("{}", text);
    } else {
        println!("{}", format_decision(&case, &decision));
    }

    Ok(())
}

fn run_session(config: Config) -> Result<()> {
    let mut repl = Repl::new(config)?;
    repl.run()
}

//! name-guard CLI
//!
//! Validates property names and searches for nearby businesses using them.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

use name_guard::command::{parse_command, USAGE};
use name_guard::config::{GuardConfig, ServiceConfig};
use name_guard::core::NameValidator;
use name_guard::formatters::{FormatterConfig, HumanFormatter, JsonFormatter, ResultFormatter};
use name_guard::logging::setup::{init_logging, LoggingConfig};
use name_guard::logging::LogConfig;
use name_guard::search::{ConflictSearch, SearchResponse};
use name_guard::security::InputSecurity;
use name_guard::sources::{FreeDictionaryClient, UrbanDictionaryClient};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    format: OutputFormat,

    /// JSON policy file (blocklist, cultural terms, thresholds)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip slang and dictionary lookups
    #[arg(long, global = true)]
    offline: bool,

    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a property name
    Validate {
        name: String,
        /// Only print alternative names
        #[arg(long)]
        suggestions_only: bool,
    },
    /// Validate a name, then search for businesses using it near an address
    Search {
        name: String,
        #[arg(long)]
        address: String,
        /// Search radius in miles
        #[arg(long, default_value_t = 5.0)]
        radius: f64,
        /// Save the conflicts found as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run a "Name, Full Address, RadiusInMiles" command line
    Command { text: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let logging = if args.verbose {
        LoggingConfig::development()
    } else {
        LoggingConfig::default()
    };
    init_logging(logging).map_err(|e| anyhow::anyhow!("cannot initialise logging: {e}"))?;

    let policy = match &args.config {
        Some(path) => GuardConfig::from_file(path)?,
        None => GuardConfig::default(),
    };
    let services = Arc::new(ServiceConfig::from_env()?);
    let validator = Arc::new(build_validator(&args, policy, services.clone())?);
    let formatter = formatter(args.format);

    match &args.command {
        Command::Validate {
            name,
            suggestions_only,
        } => {
            InputSecurity::validate_property_name(name)?;
            if *suggestions_only {
                for suggestion in validator.generate_alternative_suggestions(name).await {
                    println!("{suggestion}");
                }
                return Ok(ExitCode::SUCCESS);
            }
            let result = validator.validate_property_name(name).await;
            print!("{}", formatter.format(&result)?);
            Ok(if result.is_valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Command::Search {
            name,
            address,
            radius,
            output,
        } => {
            let response = search(&args, validator, services, name, address, *radius).await?;
            print!("{}", formatter.format_search(&response)?);
            if let Some(path) = output {
                response.save_conflicts(path)?;
            }
            Ok(exit_code(&response))
        }
        Command::Command { text } => {
            let Some(command) = parse_command(text) else {
                println!("{USAGE}");
                return Ok(ExitCode::from(2));
            };
            let response = search(
                &args,
                validator,
                services,
                &command.name,
                &command.address,
                f64::from(command.radius_miles),
            )
            .await?;
            print!("{}", formatter.format_search(&response)?);
            Ok(exit_code(&response))
        }
    }
}

fn build_validator(
    args: &Args,
    policy: GuardConfig,
    services: Arc<ServiceConfig>,
) -> Result<NameValidator> {
    let log = if args.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    let builder = NameValidator::builder().config(policy).log_config(log);
    if args.offline {
        debug!("offline mode, slang and dictionary lookups disabled");
        return Ok(builder.build());
    }
    let slang = UrbanDictionaryClient::new(services.clone()).context("slang dictionary client")?;
    let lexicon = FreeDictionaryClient::new(services).context("dictionary client")?;
    Ok(builder
        .slang_lookup(Arc::new(slang))
        .lexical_lookup(Arc::new(lexicon))
        .build())
}

async fn search(
    args: &Args,
    validator: Arc<NameValidator>,
    services: Arc<ServiceConfig>,
    name: &str,
    address: &str,
    radius_miles: f64,
) -> Result<SearchResponse> {
    if args.offline {
        bail!("conflict search needs network access; drop --offline");
    }
    InputSecurity::validate_property_name(name)?;
    InputSecurity::validate_address(address)?;
    InputSecurity::validate_radius(radius_miles)?;

    let search = ConflictSearch::from_services(validator, services)?;
    Ok(search.search_property_name(name, address, radius_miles).await)
}

fn formatter(format: OutputFormat) -> Box<dyn ResultFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Human => Box::new(HumanFormatter::with_config(
            FormatterConfig::default().with_colors(std::io::stdout().is_terminal()),
        )),
    }
}

fn exit_code(response: &SearchResponse) -> ExitCode {
    if response.is_error() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

//! certmint: bulk certificate issuance service and CLI

use anyhow::Context;
use certmint::config::{Config, LoggingConfig};
use certmint::core::batch::BatchForm;
use certmint::core::metadata::ImageAsset;
use certmint::utils::logging::init_logging;
use certmint::{BatchOutcome, IssuerServices, server};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "certmint", version)]
#[command(about = "Issue certificate tokens in bulk from a recipient spreadsheet")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, global = true, env = "CERTMINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve,

    /// Check a recipient file without contacting any service
    Validate {
        /// Recipient file (participant_name, wallet_address)
        csv: PathBuf,
    },

    /// Issue one certificate per recipient and print the batch report
    Mint {
        /// Recipient file (participant_name, wallet_address)
        #[arg(long)]
        csv: PathBuf,
        /// Event the certificates are for
        #[arg(long)]
        event: String,
        /// Certificate title
        #[arg(long)]
        certificate: String,
        /// Certificate contract address
        #[arg(long)]
        contract: String,
        /// Contract display name (looked up in the registry when omitted)
        #[arg(long)]
        contract_name: Option<String>,
        /// Template image attached to every certificate
        #[arg(long)]
        image: Option<PathBuf>,
        /// Extra attribute written as key=value (repeatable)
        #[arg(long = "attr")]
        attributes: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Serve => {
            let config = load_config(cli.config.as_deref()).await?;
            init_logging(config.logging())?;
            log_config_source(cli.config.as_deref());
            server::serve(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { csv } => {
            init_logging(&LoggingConfig::default())?;
            let text = read_text(&csv).await?;
            let report = certmint::validate_csv(&text)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(if report.is_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Mint {
            csv,
            event,
            certificate,
            contract,
            contract_name,
            image,
            attributes,
        } => {
            let config = load_config(cli.config.as_deref()).await?;
            init_logging(config.logging())?;
            log_config_source(cli.config.as_deref());

            let template_image = match image {
                Some(path) => {
                    let bytes = tokio::fs::read(&path)
                        .await
                        .with_context(|| format!("reading {}", path.display()))?;
                    let filename = path.file_name().map(|n| n.to_string_lossy().into_owned());
                    Some(ImageAsset::new(bytes, filename))
                }
                None => None,
            };

            let form = BatchForm {
                event_name: Some(event),
                certificate_name: Some(certificate),
                contract_address: Some(contract),
                contract_name,
                template_image,
                attributes,
                csv: Some(read_text(&csv).await?),
            };
            let (request, text) = form.into_request()?;

            let services = IssuerServices::from_config(&config).await?;
            let report = services.orchestrator.execute(&request, &text).await?;
            info!("{}", report.message());
            println!("{}", serde_json::to_string_pretty(&report)?);

            Ok(match report.outcome() {
                BatchOutcome::FullSuccess => ExitCode::SUCCESS,
                BatchOutcome::PartialSuccess => ExitCode::from(2),
                BatchOutcome::FullFailure => ExitCode::FAILURE,
            })
        }
    }
}

async fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::from_env().context("loading configuration from the environment")?,
    };
    Ok(config)
}

fn log_config_source(path: Option<&Path>) {
    match path {
        Some(path) => info!("Configuration loaded from {}", path.display()),
        None => info!("Configuration loaded from environment variables"),
    }
}

async fn read_text(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

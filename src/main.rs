//! # MSOCTL
//!
//! Command-line interface for validating Manila OpenStack credentials.
//!
//! ## Usage
//!
//! ```bash
//! # Validate credentials stored in a cluster secret
//! msoctl validate --secret manila/openstack-credentials
//!
//! # Validate a local parameter file (flat YAML/JSON map or Secret manifest)
//! msoctl validate --file ./os-creds.yaml
//!
//! # Print the trust-scoped options instead
//! msoctl validate --file ./os-creds.yaml --trust
//!
//! # List the accepted parameters
//! msoctl schema
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kube::Client;
use manila_share_options::config::ShareOptionsConfig;
use manila_share_options::observability::init_tracing;
use manila_share_options::options::{OpenStackOptions, OptionsLoader};
use manila_share_options::secrets::{parse_secret_reference, read_params_file, KubeSecretSource};
use std::path::PathBuf;
use tracing::{error, info};

/// Manila share options CLI
#[derive(Debug, Parser)]
#[command(name = "msoctl")]
#[command(
    about = "Validate OpenStack credentials for Manila shares",
    long_about = None,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ", built ", env!("BUILD_DATETIME"), ")")
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Namespace for secret references without one (defaults to SECRET_NAMESPACE, POD_NAMESPACE or "default")
    #[arg(short, long, global = true)]
    namespace: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate credentials and print the resulting authentication options
    Validate {
        /// Kubernetes secret holding the parameters, as NAME or NAMESPACE/NAME
        #[arg(long, value_name = "SECRET", conflicts_with = "file", required_unless_present = "file")]
        secret: Option<String>,

        /// Local YAML/JSON file holding the parameters
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Print trust-scoped options (includes the trust ID)
        #[arg(long)]
        trust: bool,
    },
    /// List the accepted parameters and their rules
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Configure rustls crypto provider FIRST, before any other operations
    // Required for rustls 0.23+ when no default provider is set via features
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|existing| anyhow::anyhow!("rustls crypto provider already installed: {existing:?}"))?;

    let mut config = ShareOptionsConfig::from_env();
    init_tracing(&config)?;

    let cli = Cli::parse();
    if let Some(namespace) = cli.namespace {
        config.default_namespace = namespace;
    }

    let loader = OptionsLoader::new().context("OpenStack options schema is invalid")?;

    match cli.command {
        Commands::Validate {
            secret,
            file,
            trust,
        } => validate_command(&loader, &config, secret, file, trust).await,
        Commands::Schema => {
            schema_command(&loader);
            Ok(())
        }
    }
}

async fn validate_command(
    loader: &OptionsLoader,
    config: &ShareOptionsConfig,
    secret: Option<String>,
    file: Option<PathBuf>,
    trust: bool,
) -> Result<()> {
    let options = match (secret, file) {
        (Some(secret), _) => {
            let reference = parse_secret_reference(&secret)?;
            let client = Client::try_default()
                .await
                .context("Failed to create Kubernetes client. Ensure kubeconfig is configured.")?;
            let source = KubeSecretSource::new(client, config.default_namespace.clone());
            loader.from_secret_reference(&source, &reference).await
        }
        (None, Some(path)) => {
            let params = read_params_file(&path)?;
            loader.from_map(&params).map_err(Into::into)
        }
        (None, None) => anyhow::bail!("Either --secret or --file is required"),
    };

    let options = match options {
        Ok(options) => options,
        Err(e) => {
            error!("❌ {e}");
            return Err(e.into());
        }
    };

    info!(
        "✅ OpenStack options are valid ({} authentication)",
        if options.uses_trust() { "trust" } else { "password" }
    );
    println!("{}", render(&options, trust)?);
    Ok(())
}

fn render(options: &OpenStackOptions, trust: bool) -> Result<String> {
    let rendered = if trust {
        serde_json::to_string_pretty(&options.to_auth_options_ext().redacted())
    } else {
        serde_json::to_string_pretty(&options.to_auth_options().redacted())
    };
    rendered.context("Failed to serialize authentication options")
}

fn schema_command(loader: &OptionsLoader) {
    println!("{:<20} {:<9} {:<80} PATTERN", "NAME", "REQUIRED", "DEPENDS ON");
    for field in loader.validator().fields() {
        println!(
            "{:<20} {:<9} {:<80} {}",
            field.name(),
            field.requirement().as_str(),
            field.dependency_expr().unwrap_or("-"),
            field.value_pattern().unwrap_or("-"),
        );
    }
}

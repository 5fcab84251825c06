mod api;
mod variants;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::variants::OptionArg;

#[derive(Debug, Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Product catalog admin command line interface")]
struct Cli {
    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, global = true, env = "CATALOG_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate the variant list for a set of option selections
    Variants {
        /// YAML attribute catalog
        #[arg(long, env = "CATALOG_ATTRIBUTES_PATH", default_value = "./config/attributes.yaml")]
        catalog: PathBuf,
        /// Option row as `Name=value1,value2`; repeat for more rows
        #[arg(long = "option", value_name = "NAME=VALUES")]
        options: Vec<OptionArg>,
    },
    /// Fetch the attribute catalog from the API
    Attributes,
    /// Fetch a product from the API and print its edit form
    Product {
        /// Backend product ID
        id: i64,
    },
    /// Print the multipart fields a variable product would submit
    Payload {
        /// YAML attribute catalog
        #[arg(long, env = "CATALOG_ATTRIBUTES_PATH", default_value = "./config/attributes.yaml")]
        catalog: PathBuf,
        /// Option row as `Name=value1,value2`; repeat for more rows
        #[arg(long = "option", value_name = "NAME=VALUES")]
        options: Vec<OptionArg>,
        /// Product name
        #[arg(long)]
        name: String,
        /// Emit update fields (`_method=PUT`) instead of create fields
        #[arg(long)]
        update: bool,
    },
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    // stdout carries command output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Some(Commands::Variants { catalog, options }) => {
            variants::run_variants(&catalog, &options)?;
        }
        Some(Commands::Attributes) => {
            let config = catalog_core::load_app_config()?;
            api::run_attributes(&config).await?;
        }
        Some(Commands::Product { id }) => {
            let config = catalog_core::load_app_config()?;
            api::run_product(&config, id).await?;
        }
        Some(Commands::Payload {
            catalog,
            options,
            name,
            update,
        }) => {
            variants::run_payload(&catalog, &options, &name, update)?;
        }
        None => println!("catalog-cli ready; run with --help for commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;

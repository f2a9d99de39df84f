use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use clap_serde_derive::ClapSerde;
use tracing::error;

use name_api::telemetry::init_telemetry;
use name_api::{ClientConfig, NameApi};

const DEFAULT_CONFIG_FILE: &str = "NameApi.toml";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short = 'f', long, env, default_value = DEFAULT_CONFIG_FILE)]
    config_file: String,

    /// Configuration options
    #[command(flatten)]
    opt_config: <ClientConfig as ClapSerde>::Opt,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict age, gender and nationality for the given names
    Lookup {
        /// Names to look up
        #[clap(required = true, num_args = 1..)]
        names: Vec<String>,
    },
    /// Show the rate-limit window of the first selected endpoint (uses one name of the quota)
    Limits,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry("WARN");

    let args = Args::parse();
    let config = match ClientConfig::from_toml(&args.config_file) {
        Ok(conf) => conf.merge(args.opt_config),
        Err(err) => {
            if args.config_file == DEFAULT_CONFIG_FILE {
                ClientConfig::default().merge(args.opt_config)
            } else {
                error!(
                    "Failed to read configuration file {} with error: {}",
                    args.config_file, err
                );
                std::process::exit(1);
            }
        }
    };

    match args.cmd {
        Commands::Lookup { names } => {
            let record = NameApi::new(names, &config)?.lookup().await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Limits => {
            let limits = NameApi::new(Vec::<String>::new(), &config)?
                .rate_limit()
                .await?;
            println!("{}", serde_json::to_string_pretty(&limits)?);
        }
    }
    Ok(())
}

use alien_checklist::config::{Config, DEFAULT_CONFIG_PATH};
use alien_checklist::logging;
use alien_checklist::pipeline::Pipeline;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "alien_checklist")]
#[command(about = "Alien species checklist to Darwin Core Archive tables")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, match, and write all four Darwin Core tables
    Run {
        #[command(flatten)]
        common: CommonArgs,
        /// Directory for the output tables (overrides output.dir)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Load and match names only; writes the enriched snapshot
    Match {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Path to the TOML configuration
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Local checklist CSV (overrides source.input_path and the sheet)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Do not write the enriched checklist back to the sheet
    #[arg(long)]
    skip_write_back: bool,
}

fn load_config(common: &CommonArgs) -> anyhow::Result<Config> {
    let mut config = Config::load(&common.config)
        .with_context(|| format!("loading {}", common.config.display()))?;
    if let Some(input) = &common.input {
        config.source.input_path = Some(input.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { common, output_dir } => {
            println!("🚀 Running checklist pipeline...");
            let mut config = load_config(&common)?;
            if let Some(dir) = output_dir {
                config.output.dir = dir;
            }

            let pipeline = Pipeline::from_config(config, common.skip_write_back)?;
            match pipeline.run().await {
                Ok(result) => {
                    info!("Pipeline finished");
                    println!("\n📊 Pipeline Results:");
                    println!("   Input records: {}", result.input_records);
                    println!("   Taxa: {}", result.taxa);
                    println!("   Distributions: {}", result.distributions);
                    println!("   Species profiles: {}", result.species_profiles);
                    println!("   Descriptions: {}", result.descriptions);
                    println!("   Unmatched names: {}", result.unmatched_names);
                    println!("   Sheet write-back: {}", result.wrote_back_to_sheet);
                    println!("   Snapshot: {}", result.snapshot.path.display());
                    for file in &result.outputs {
                        println!("   {} ({} rows, sha256 {})", file.path.display(), file.rows, file.sha256);
                    }
                }
                Err(e) => {
                    error!("Pipeline failed: {}", e);
                    println!("❌ Pipeline failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        Commands::Match { common } => {
            println!("🔎 Matching checklist names...");
            let config = load_config(&common)?;

            let pipeline = Pipeline::from_config(config, common.skip_write_back)?;
            match pipeline.match_only().await {
                Ok(result) => {
                    println!("\n📊 Match Results:");
                    println!("   Input records: {}", result.input_records);
                    println!("   Taxa: {}", result.taxa);
                    println!("   Unmatched names: {}", result.unmatched_names);
                    println!("   Sheet write-back: {}", result.wrote_back_to_sheet);
                    println!("   Snapshot: {}", result.snapshot.path.display());
                }
                Err(e) => {
                    error!("Match run failed: {}", e);
                    println!("❌ Match run failed: {}", e);
                    return Err(e.into());
                }
            }
        }
    }
    Ok(())
}

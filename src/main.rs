use std::path::PathBuf;

use anyhow::{Context, Result};
use birdle_daily::catalog::Catalog;
use birdle_daily::config::{self, DataPaths, RunConfig, DEFAULT_COOLDOWN_DAYS, DEFAULT_DATA_DIR};
use birdle_daily::publish::{self, find_bird_by_token, SaltedFoldToken, TokenScheme, DEFAULT_SECRET_SALT};
use birdle_daily::types::AnswerToken;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "birdle-daily",
    version,
    about = "Generate the daily bird answers and maintain the answer history",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Secret salt mixed into every token
    #[arg(long, global = true, env = "BIRDLE_SECRET_SALT", default_value = DEFAULT_SECRET_SALT, hide_env_values = true)]
    salt: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick today's answers and update the history
    Generate {
        /// Number of days to avoid repeating birds
        #[arg(long, default_value_t = DEFAULT_COOLDOWN_DAYS)]
        days: u32,

        /// Date to generate for (YYYY-MM-DD, default: today)
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,

        /// Subregions JSON file for filtering birds by state/province
        #[arg(long)]
        subregions: Option<PathBuf>,

        /// Directory holding regions.json, birds.json, history.json and daily.json
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
    },

    /// Print the token for a bird id
    Token {
        bird_id: String,
    },

    /// Resolve a published token against a region's catalog
    Verify {
        token: String,

        #[arg(short, long)]
        region: String,

        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
    },
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, config::ConfigError> {
    config::parse_date(raw)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(&cli.log_format, cli.verbose);

    match cli.command {
        Commands::Generate {
            days,
            date,
            subregions,
            data_dir,
        } => {
            let target_date = date.unwrap_or_else(config::today);
            let run_config = RunConfig::new(days, target_date, cli.salt)?;
            let mut paths = DataPaths::new(data_dir);
            if let Some(path) = subregions {
                paths = paths.with_subregions(path);
            }
            generate(&paths, &run_config)?;
        }
        Commands::Token { bird_id } => {
            println!("{}", SaltedFoldToken::new(cli.salt).token(&bird_id));
        }
        Commands::Verify {
            token,
            region,
            data_dir,
        } => {
            verify(&token, &region, &DataPaths::new(data_dir), &cli.salt)?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("birdle_daily=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("birdle_daily=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

fn generate(paths: &DataPaths, run_config: &RunConfig) -> Result<()> {
    tracing::info!(
        date = %run_config.target_date.format(config::DATE_FORMAT),
        cooldown_days = run_config.cooldown_days,
        "Generating daily birds"
    );

    let report = publish::run_daily(paths, run_config)
        .with_context(|| format!("daily run failed in {}", paths.data_dir.display()))?;

    println!("Generated {} entries:", report.answers.len());
    for outcome in &report.outcomes {
        let answer = report.answers.iter().find(|a| a.region == outcome.region);
        match answer {
            Some(answer) => {
                let subregion = answer
                    .subregion
                    .as_deref()
                    .map(|s| format!(" (subregion: {s})"))
                    .unwrap_or_default();
                println!(
                    "  {}: {} ({}) recent={}{}",
                    answer.region, answer.answer_hash, answer.date, outcome.excluded, subregion
                );
            }
            None => println!("  {}: skipped (no candidates)", outcome.region),
        }
    }
    Ok(())
}

fn verify(raw_token: &str, region: &str, paths: &DataPaths, salt: &str) -> Result<()> {
    let token = AnswerToken::parse(raw_token)?;
    let catalog = Catalog::load(&paths.birds())
        .with_context(|| format!("failed to load catalog from {}", paths.birds().display()))?;

    let scheme = SaltedFoldToken::new(salt);
    match find_bird_by_token(&scheme, catalog.birds(region), &token) {
        Some(bird) => println!("{token} -> {} ({})", bird.name, bird.id),
        None => anyhow::bail!("no bird in region {region} matches token {token}"),
    }
    Ok(())
}

mod cli;
mod config;
mod datasources;
mod engine;
mod error;
mod models;
mod report;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{AdviseArgs, Cli, Commands};
use config::Config;
use datasources::enrichment::FALLBACK_EXPLANATION;
use datasources::{AdvisoryTextGenerator, OpenWeatherMapClient, WeatherProvider};
use engine::AdvisoryEngine;
use error::{KisanError, Result};
use models::{CropContext, CropStage};
use report::AdvisoryReport;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Some(Commands::Init) => {
            Config::setup_interactive()?;
            Ok(())
        }
        Some(Commands::Check) => {
            let config = Config::load(cli.config)?;
            check(&config).await
        }
        Some(Commands::Advise(args)) => {
            let config = Config::load(cli.config)?;
            advise(&config, args).await
        }
        None => {
            let config = Config::load(cli.config)?;
            advise(&config, AdviseArgs::default()).await
        }
    }
}

async fn check(config: &Config) -> Result<()> {
    let client = OpenWeatherMapClient::new(config.openweathermap.clone());
    let probe_location = config.defaults.location.as_deref().unwrap_or("Delhi");

    match client.test_connection(probe_location).await {
        Ok(true) => println!("OpenWeatherMap: OK"),
        Ok(false) => println!("OpenWeatherMap: OFFLINE (check your API key)"),
        Err(e) => println!("OpenWeatherMap: OFFLINE ({})", e),
    }

    match &config.enrichment {
        Some(e) => println!("Enrichment: configured ({})", e.model),
        None => println!("Enrichment: not configured"),
    }

    let stage_rules = engine::CropStageRuleEngine::new();
    println!("Stage rules:");
    for (id, name) in stage_rules.list_rules() {
        println!("  {} ({})", name, id);
    }

    Ok(())
}

async fn advise(config: &Config, args: AdviseArgs) -> Result<()> {
    let location = args
        .location
        .or_else(|| config.defaults.location.clone())
        .ok_or_else(|| {
            KisanError::Config(
                "No location given. Pass one (`kisan advise <city>`) or set a default in the config."
                    .into(),
            )
        })?;

    let stage = match &args.stage {
        Some(s) => Some(CropStage::from_str(s).ok_or_else(|| {
            KisanError::InvalidData(format!(
                "unknown stage '{}'; expected sowing, vegetative, flowering, maturity, harvest or preparation",
                s
            ))
        })?),
        None => None,
    };
    let crop = CropContext {
        name: args.crop,
        stage,
    };

    let client = OpenWeatherMapClient::new(config.openweathermap.clone());
    let weather = client.fetch(&location).await?;

    let engine = AdvisoryEngine::new();
    let flood = engine.assess_flood_risk(
        weather.current.rainfall_mm,
        weather.consecutive_rainy_days,
        &weather.forecast_rainfall(),
    );
    let harvest = engine.classify_harvest(&weather);
    let actions = engine.generate_daily_actions(&weather, &crop);
    let alerts = engine.generate_smart_alerts(Some(&weather), &crop, flood.level);

    // Optional, best-effort elaboration; failure never changes the advisory
    let explanation = if args.explain {
        match &config.enrichment {
            Some(enrichment_config) => {
                let generator = AdvisoryTextGenerator::new(enrichment_config.clone())?;
                match generator
                    .explain(
                        &weather,
                        &crop,
                        &flood,
                        &harvest,
                        &actions,
                        &config.defaults.language,
                    )
                    .await
                {
                    Ok(text) => Some(text),
                    Err(e) => {
                        tracing::warn!("enrichment failed: {}", e);
                        Some(FALLBACK_EXPLANATION.to_string())
                    }
                }
            }
            None => {
                tracing::warn!("--explain requested but no enrichment endpoint is configured");
                None
            }
        }
    } else {
        None
    };

    let report = AdvisoryReport {
        weather,
        crop,
        flood,
        harvest,
        actions,
        alerts,
        explanation,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}

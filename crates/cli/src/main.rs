use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roam_agents::{PlannerOptions, TripPlannerAgent};
use roam_core::{
    render_plan_text, render_suggestion_text, HotelClass, RentCar, SuggestForm, TripForm,
};
use roam_observability::{init_tracing, AppMetrics};
use roam_providers::{ProviderConfig, ProviderSet};

#[derive(Debug, Parser)]
#[command(name = "roam")]
#[command(about = "Roam trip planner CLI")]
struct Cli {
    /// Issue the three backend calls of a plan concurrently.
    #[arg(long, env = "ROAM_CONCURRENT_FANOUT", default_value_t = false)]
    concurrent_fanout: bool,

    /// Print the outcome as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Plan {
        #[arg(long, default_value_t = roam_core::DEFAULT_BUDGET)]
        budget: f64,
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        #[arg(long, default_value = "Budget")]
        hotel_class: String,
        #[arg(long, default_value_t = 1)]
        travelers: u32,
        #[arg(long, default_value = "yes")]
        rent_car: String,
    },
    Suggest {
        /// Trip budget in INR; required by the planner.
        #[arg(long)]
        budget: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("roam_cli");
    let cli = Cli::parse();

    let config = ProviderConfig::from_env()?;
    let providers = ProviderSet::from_config(&config)?;
    let planner = TripPlannerAgent::new(
        Arc::new(providers.generator),
        Arc::new(providers.hotels),
        Arc::new(providers.images),
        AppMetrics::shared(),
        PlannerOptions {
            concurrent_fanout: cli.concurrent_fanout,
        },
    );

    match cli.command {
        Command::Plan {
            budget,
            origin,
            destination,
            hotel_class,
            travelers,
            rent_car,
        } => {
            let hotel_class =
                HotelClass::parse(&hotel_class).context("invalid --hotel-class value")?;
            let rent_car = RentCar::parse(&rent_car)
                .context("invalid --rent-car value, expected yes or no")?;

            let outcome = planner
                .generate_plan(&TripForm {
                    budget: Some(budget),
                    origin: Some(origin),
                    destination: Some(destination),
                    hotel_class: Some(hotel_class),
                    travelers: Some(i64::from(travelers)),
                    rent_car: Some(rent_car),
                })
                .await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", render_plan_text(&outcome));
            }
        }
        Command::Suggest { budget } => {
            let outcome = planner
                .suggest_destination(&SuggestForm { budget })
                .await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", render_suggestion_text(&outcome));
            }
        }
    }

    Ok(())
}

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use mealcart::config::Config;
use mealcart::files::{JsonHouseholdFile, load_plan, load_recipes};
use mealcart::pipeline::ShoppingPlanner;
use mealcart_mealplan::{PlanRequest, RecipeScorer, ScoringContext, WeekPlanner};
use mealcart_pricing::{LookupOptions, PricingEngine, PricingService, ProductCatalog};
use mealcart_shared::{Analytics, HouseholdProvider};
use mealcart_shopping::{AggregationOptions, to_legacy_format};
use serde::Serialize;

/// mealcart - weekly dinner planning and grocery costing
#[derive(Parser)]
#[command(name = "mealcart")]
#[command(about = "Plan a week of dinners and price the shopping list", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score and rank candidate recipes for one dinner
    Rank {
        #[arg(long)]
        recipes: PathBuf,
        #[arg(long)]
        household: PathBuf,
        /// Score for a weekend day (no weeknight filters)
        #[arg(long)]
        weekend: bool,
        #[arg(long, default_value_t = 5)]
        top: usize,
        /// Recently cooked recipe ids
        #[arg(long, value_delimiter = ',')]
        recent: Vec<String>,
    },
    /// Fill a week greedily with the best scoring recipes
    Plan {
        #[arg(long)]
        recipes: PathBuf,
        #[arg(long)]
        household: PathBuf,
        #[arg(long)]
        week_start: NaiveDate,
        #[arg(long, default_value_t = 7)]
        days: usize,
        #[arg(long, value_delimiter = ',')]
        recent: Vec<String>,
        #[arg(long)]
        preferred_source: Option<String>,
    },
    /// Aggregate a week plan into a priced shopping list
    Shop {
        #[arg(long)]
        recipes: PathBuf,
        #[arg(long)]
        plan: PathBuf,
        #[arg(long)]
        household: PathBuf,
        /// Only use the static product mapping and category rates
        #[arg(long)]
        offline: bool,
        /// Print flat rows instead of the priced list
        #[arg(long)]
        legacy: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealcart::observability::init_observability(
        "mealcart",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Rank {
            recipes,
            household,
            weekend,
            top,
            recent,
        } => {
            let catalog = load_recipes(&recipes)?;
            let household = JsonHouseholdFile::new(household).load_household()?;
            let context = ScoringContext::new(&household, weekend).with_recent(recent);

            let ranked = RecipeScorer::new(config.scoring).score_and_rank(catalog.recipes(), &context, top);
            print_json(&ranked)
        }
        Commands::Plan {
            recipes,
            household,
            week_start,
            days,
            recent,
            preferred_source,
        } => {
            let catalog = load_recipes(&recipes)?;
            let household = JsonHouseholdFile::new(household).load_household()?;

            let plan = WeekPlanner::new(RecipeScorer::new(config.scoring)).plan_week(
                catalog.recipes(),
                &PlanRequest {
                    household: &household,
                    week_start,
                    days,
                    recent_recipe_ids: recent.into_iter().collect::<HashSet<_>>(),
                    preferred_source,
                },
            );
            print_json(&plan)
        }
        Commands::Shop {
            recipes,
            plan,
            household,
            offline,
            legacy,
        } => {
            let catalog = load_recipes(&recipes)?;
            let plan = load_plan(&plan)?;
            let household = JsonHouseholdFile::new(household).load_household()?;
            let options = AggregationOptions::from_household(&household);

            let engine = PricingEngine::new(ProductCatalog::builtin(), config.pricing);
            let pricing = PricingService::offline(engine).with_analytics(Analytics::tracing());
            let planner = ShoppingPlanner::new(&catalog, &pricing).with_analytics(Analytics::tracing());

            let list = if offline {
                planner.build_offline(&plan, &options)?
            } else {
                planner
                    .build(&plan, &options, &LookupOptions::default())
                    .await?
            };

            tracing::info!(items = list.items.len(), total = list.total, "shopping list priced");

            if legacy {
                print_json(&to_legacy_format(&list.ingredients()))
            } else {
                print_json(&list)
            }
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wayfinder_lib::{
    load_waymap, plan_route, Error as LibError, RouteCriterion, RoutePlan, RouteRequest, Waymap,
};

#[derive(Parser, Debug)]
#[command(version, about = "Wayfinder route planning utilities")]
struct Cli {
    /// Path to the JSON map file (an array of edge records).
    #[arg(long)]
    map: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every place in the map and the links between them.
    Places,
    /// Plan a route between two place names.
    Route {
        /// Starting place name.
        #[arg(long = "from")]
        from: String,
        /// Destination place name.
        #[arg(long = "to")]
        to: String,
        /// Optimization criterion, or `all` to compare every criterion.
        #[arg(long, value_enum, default_value_t = CriterionArg::FewestHops)]
        criterion: CriterionArg,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum CriterionArg {
    FewestHops,
    LeastDistance,
    LeastTime,
    LeastRisk,
    All,
}

impl CriterionArg {
    fn criteria(self) -> Vec<RouteCriterion> {
        match self {
            CriterionArg::FewestHops => vec![RouteCriterion::FewestHops],
            CriterionArg::LeastDistance => vec![RouteCriterion::LeastDistance],
            CriterionArg::LeastTime => vec![RouteCriterion::LeastTime],
            CriterionArg::LeastRisk => vec![RouteCriterion::LeastRisk],
            CriterionArg::All => RouteCriterion::ALL.to_vec(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Places => handle_places(&cli.map),
        Command::Route {
            from,
            to,
            criterion,
            format,
        } => handle_route(&cli.map, &from, &to, criterion, format),
    }
}

fn handle_places(map_path: &Path) -> Result<()> {
    let map = load_map(map_path)?;

    let mut places: Vec<_> = map.places().collect();
    places.sort_by(|a, b| a.name.cmp(&b.name));

    println!("Places:");
    for place in &places {
        println!("- {}", place.name);
    }

    println!("\nLinks:");
    for place in &places {
        for edge in map.neighbours(place.id) {
            let target = map.place_name(edge.target).unwrap_or("<unknown>");
            println!(
                "{} -> {} | hops: {}, distance: {} km, time: {} hrs, risk: {}",
                place.name, target, edge.hops, edge.distance, edge.time, edge.risk
            );
        }
    }

    Ok(())
}

fn handle_route(
    map_path: &Path,
    from: &str,
    to: &str,
    criterion: CriterionArg,
    format: OutputFormat,
) -> Result<()> {
    let map = load_map(map_path)?;
    let compare_all = criterion == CriterionArg::All;
    let mut rendered = Vec::new();

    for criterion in criterion.criteria() {
        let request = RouteRequest::new(from, to, criterion);
        match plan_route(&map, &request) {
            Ok(plan) => rendered.push(render_plan(&map, &plan)),
            // When comparing criteria side by side, report a missing route
            // instead of aborting the remaining criteria.
            Err(LibError::RouteNotFound { .. }) if compare_all => {
                rendered.push(serde_json::json!({
                    "criterion": criterion.to_string(),
                    "route": serde_json::Value::Null,
                }));
            }
            Err(error) => return Err(error).context("route planning failed"),
        }
    }

    match format {
        OutputFormat::Text => {
            for entry in &rendered {
                print_entry(entry);
            }
        }
        OutputFormat::Json => {
            let output = if compare_all {
                serde_json::Value::Array(rendered)
            } else {
                rendered.into_iter().next().unwrap_or(serde_json::Value::Null)
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn render_plan(map: &Waymap, plan: &RoutePlan) -> serde_json::Value {
    let steps: Vec<&str> = plan
        .steps
        .iter()
        .map(|&id| map.place_name(id).unwrap_or("<unknown>"))
        .collect();
    let cost = match plan.cost {
        Some(cost) => serde_json::json!(cost),
        None => serde_json::json!(plan.hop_count()),
    };

    serde_json::json!({
        "criterion": plan.criterion.to_string(),
        "route": steps,
        "cost": cost,
        "unit": plan.criterion.unit(),
    })
}

fn print_entry(entry: &serde_json::Value) {
    let criterion = entry["criterion"].as_str().unwrap_or("?");
    match entry["route"].as_array() {
        Some(steps) => {
            let route: Vec<&str> = steps.iter().filter_map(|step| step.as_str()).collect();
            println!(
                "{}: {} ({} {})",
                criterion,
                route.join(" -> "),
                entry["cost"],
                entry["unit"].as_str().unwrap_or("")
            );
        }
        None => println!("{criterion}: no route"),
    }
}

fn load_map(map_path: &Path) -> Result<Waymap> {
    load_waymap(map_path)
        .with_context(|| format!("failed to load map from {}", map_path.display()))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

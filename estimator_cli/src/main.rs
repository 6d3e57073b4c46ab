//! # Material Estimator CLI
//!
//! Terminal front end for the estimation engine.
//!
//! ## Usage
//!
//! ```text
//! estimator_cli                          interactive single-room ceiling estimate
//! estimator_cli tile <request.json>      multi-room tile estimate
//! estimator_cli ceiling <request.json>   multi-room ceiling estimate
//! estimator_cli project <file.mep>       evaluate every estimate in a project
//! estimator_cli add <file.mep> tile|ceiling <request.json>
//!                                        add an estimate to a project, creating it if needed
//!
//! Add --json to print only the JSON result.
//! Set RUST_LOG=debug to see per-room calculation logs.
//! ```

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use estimator_core::estimations::{
    estimate_ceilings, estimate_tiles, CeilingBatchResult, CeilingEstimateInput, CeilingPrices, EstimationItem,
    EstimationOutcome, TileEstimate, TileEstimateInput,
};
use estimator_core::{load_json, load_project, save_project, EstimatorError, EstimatorResult, NamedRoom, Project};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const RULE: &str = "═══════════════════════════════════════════════";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Could not serialize result: {}", e),
    }
}

fn print_tile_estimate(estimate: &TileEstimate) {
    println!("{}", RULE);
    println!("  TILE ESTIMATE");
    println!("{}", RULE);
    for room in &estimate.rooms {
        let layout = &room.layout;
        println!();
        println!("{} ({} ft × {} ft)", room.name, room.length, room.width);
        println!("  Grid:          {} cols × {} rows", layout.columns, layout.rows);
        println!("  Full tiles:    {}", layout.full_tile_count);
        println!("  Cut tiles:     {}", layout.cut_tile_count);
        println!("  Cut waste:     {:.1}%", layout.cut_waste_pct);
        println!("  Tiles to buy:  {}", layout.purchase_tile_count);
        println!("  Purchase waste (incl. allowance): {:.1}%", layout.purchase_waste_pct);
        println!("  Cost:          Rs. {:.2}", layout.total_cost);
    }
    println!();
    println!("{}", RULE);
    println!(
        "  TOTAL: {:.2} ft², {} tiles, Rs. {:.2}",
        estimate.totals.total_area, estimate.totals.total_tiles, estimate.totals.total_cost
    );
    println!("{}", RULE);
}

fn print_ceiling_estimate(batch: &CeilingBatchResult) {
    println!("{}", RULE);
    println!("  CEILING ESTIMATE");
    println!("{}", RULE);
    for result in &batch.results {
        println!();
        println!("{} ({})", result.room_label, result.room_size);
        println!("  Case: {}", result.case_detected);
        for option in &result.options {
            let marker = if option.orientation == result.recommended.orientation {
                "[BEST]"
            } else {
                "      "
            };
            println!(
                "  {} {:<26} MT {:>3}  CT {:>4}  Panels {:>4}  WA {:>3}  Rs. {:.2}{}",
                marker,
                option.orientation.label(),
                option.main_t_count,
                option.cross_t_count,
                option.panel_count,
                option.wall_angle_count,
                option.cost,
                if option.join_required { "  (joins)" } else { "" }
            );
        }
        for note in &result.notes {
            println!("  {}", note);
        }
    }
    println!();
    println!("{}", RULE);
    println!(
        "  TOTAL: Rs. {:.2} (saves Rs. {:.2})",
        batch.total_cost, batch.total_savings
    );
    println!("{}", RULE);
}

fn run_tile(path: &Path, json_only: bool) -> EstimatorResult<()> {
    let request: TileEstimateInput = load_json(path)?;
    let estimate = estimate_tiles(&request)?;
    info!(rooms = estimate.rooms.len(), "tile estimate complete");

    if !json_only {
        print_tile_estimate(&estimate);
        println!();
    }
    print_json(&estimate);
    Ok(())
}

fn run_ceiling(path: &Path, json_only: bool) -> EstimatorResult<()> {
    let request: CeilingEstimateInput = load_json(path)?;
    let prices = request.prices_or(&CeilingPrices::default());
    let batch = estimate_ceilings(&request.rooms, &prices)?;
    info!(rooms = batch.results.len(), "ceiling estimate complete");

    if !json_only {
        print_ceiling_estimate(&batch);
        println!();
    }
    print_json(&batch);
    Ok(())
}

fn run_project(path: &Path, json_only: bool) -> EstimatorResult<()> {
    let project = load_project(path)?;
    let outcomes = project.evaluate_all()?;

    if json_only {
        let by_id: Vec<ItemOutcome> = outcomes
            .iter()
            .map(|(id, outcome)| ItemOutcome { id, outcome })
            .collect();
        print_json(&by_id);
        return Ok(());
    }

    println!("Project: {} ({})", project.meta.project_name, project.meta.date);
    println!("Prepared by: {}", project.meta.owner);
    println!();

    let mut grand_total = 0.0;
    for (id, outcome) in &outcomes {
        let label = project.get_item(id).map(|item| item.label()).unwrap_or_default();
        println!("» {}", label);
        match outcome {
            EstimationOutcome::Tile(estimate) => print_tile_estimate(estimate),
            EstimationOutcome::Ceiling(batch) => print_ceiling_estimate(batch),
        }
        println!();
        grand_total += outcome.total_cost();
    }
    println!("Project total: Rs. {:.2}", grand_total);
    Ok(())
}

fn run_add(project_path: &Path, kind: &str, request_path: &Path, json_only: bool) -> EstimatorResult<()> {
    let item = match kind {
        "tile" => EstimationItem::Tile(load_json(request_path)?),
        "ceiling" => EstimationItem::Ceiling(load_json(request_path)?),
        other => {
            return Err(EstimatorError::invalid_input(
                "kind",
                other,
                "Expected 'tile' or 'ceiling'",
            ))
        }
    };

    let mut project = if project_path.exists() {
        load_project(project_path)?
    } else {
        let name = project_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!(path = %project_path.display(), "starting new project");
        Project::new(std::env::var("USER").unwrap_or_default(), name)
    };

    // Nothing is saved unless the estimate evaluates
    let outcome = item.evaluate(&project.settings)?;
    let label = item.label().to_string();
    let id = project.add_item(item);
    save_project(&project, project_path)?;

    if json_only {
        print_json(&ItemOutcome { id: &id, outcome: &outcome });
    } else {
        println!(
            "Added {} estimate '{}' to {} (Rs. {:.2}), {} item(s) in project",
            kind,
            label,
            project_path.display(),
            outcome.total_cost(),
            project.item_count()
        );
        println!("Item id: {}", id);
    }
    Ok(())
}

fn run_interactive() -> EstimatorResult<()> {
    println!("Material Estimator - False Ceiling");
    println!("==================================");
    println!();

    let length = prompt_f64("Enter room length (ft) [20.0]: ", 20.0);
    let width = prompt_f64("Enter room width (ft) [10.0]: ", 10.0);
    println!();

    let rooms = [NamedRoom::new("Room 1", length, width)];
    let batch = estimate_ceilings(&rooms, &CeilingPrices::default())?;
    print_ceiling_estimate(&batch);

    println!();
    println!("JSON Output:");
    print_json(&batch);
    Ok(())
}

const USAGE: &str = "usage: estimator_cli [tile|ceiling|project] <file> [--json]
       estimator_cli add <file.mep> tile|ceiling <request.json> [--json]";

#[derive(Serialize)]
struct ItemOutcome<'a> {
    id: &'a Uuid,
    outcome: &'a EstimationOutcome,
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json_only = args.iter().any(|a| a == "--json");
    let positional: Vec<&str> = args.iter().map(String::as_str).filter(|a| *a != "--json").collect();

    let outcome = match positional.as_slice() {
        [] => run_interactive(),
        ["tile", path] => run_tile(Path::new(path), json_only),
        ["ceiling", path] => run_ceiling(Path::new(path), json_only),
        ["project", path] => run_project(Path::new(path), json_only),
        ["add", project, kind, request] => run_add(Path::new(project), kind, Path::new(request), json_only),
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use tessera_persist::{
    create_collision_writer, create_tile_type_writer, load_collision_map, load_tile_type_map,
    load_walkable_map, save_collision_map, save_tile_type_map, Format,
};
use tessera_process::{
    build_boat_nav_map, build_water_mask, filter_water_bodies, splice_keep_areas,
    CancellationToken, DEFAULT_MIN_BODY_SIZE,
};
use tessera_store::KeepAreaOverlay;

mod report;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut dir = PathBuf::from(".");
    let mut fresh = false;
    let mut format = Format::Roaring;
    let mut boat_size = 4i32;
    let mut min_body_size = DEFAULT_MIN_BODY_SIZE;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-dir" => {
                i += 1;
                dir = PathBuf::from(&args[i]);
            }
            "-fresh" => {
                i += 1;
                fresh = match args[i].as_str() {
                    "y" => true,
                    "n" => false,
                    other => {
                        eprintln!("Invalid -fresh value: {} (expected y or n)", other);
                        process::exit(1);
                    }
                };
            }
            "-format" => {
                i += 1;
                format = match Format::parse(&args[i]) {
                    Some(format) => format,
                    None => {
                        eprintln!(
                            "Invalid -format value: {} (expected roaring, sparse or wordset)",
                            args[i]
                        );
                        process::exit(1);
                    }
                };
            }
            "--boat-size" => {
                i += 1;
                boat_size = args[i].parse().expect("invalid --boat-size value");
            }
            "--min-body-size" => {
                i += 1;
                min_body_size = args[i].parse().expect("invalid --min-body-size value");
            }
            "--help" | "-h" => {
                eprintln!("Usage: tessera-mapgen [OPTIONS]");
                eprintln!("  -dir <path>            Map directory (default: .)");
                eprintln!("  -fresh y|n             Rebuild outputs even when present (default: n)");
                eprintln!("  -format <name>         Output format: roaring, sparse or wordset (default: roaring)");
                eprintln!("  --boat-size <n>        Boat edge length for the navigation map (default: 4)");
                eprintln!(
                    "  --min-body-size <n>    Water bodies below this size are removed (default: {})",
                    DEFAULT_MIN_BODY_SIZE
                );
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    if let Err(e) = run(&dir, fresh, format, boat_size, min_body_size) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(
    dir: &Path,
    fresh: bool,
    format: Format,
    boat_size: i32,
    min_body_size: usize,
) -> Result<(), Box<dyn Error>> {
    let token = format.file_token();
    let collision_path = dir.join(format!("map_{token}.dat.gz"));
    let tile_types_path = dir.join(format!("tile_types_{token}.dat.gz"));
    let baseline_path = dir.join("keep_baseline_roaring.dat.gz");
    let filtered_path = dir.join(format!("postprocessed_tile_types_{token}.dat.gz"));
    let boat_nav_path = dir.join(format!("boat_nav_{boat_size}x{boat_size}_{token}.dat.gz"));
    let water_mask_path = dir.join("water_mask_sparse.dat.gz");
    let report_path = dir.join("mapgen_report.json");

    if !fresh
        && filtered_path.exists()
        && boat_nav_path.exists()
        && water_mask_path.exists()
    {
        log::info!("outputs are present; pass -fresh y to rebuild");
        if let Some(previous) = report::load_report(&report_path) {
            log::info!(
                "previous run: {} water bodies preserved, {} filtered, {} boat-fit tiles north",
                previous.water_filter.bodies_preserved,
                previous.water_filter.bodies_filtered,
                previous.boat_nav.fit_north
            );
        }
        return Ok(());
    }

    log::info!("loading source maps from {}", dir.display());
    let collision = load_collision_map(&collision_path)?;
    let tile_types = load_tile_type_map(&tile_types_path)?;

    let cancel = CancellationToken::new();

    // Keep areas take their collision bits from the hand-tuned walkability
    // baseline when it is available; without one the dumped map is used
    // as-is.
    log::info!("pass 1/4: keep-area splice");
    let mut keep_area_tiles = 0u64;
    let collision = match load_walkable_map(&baseline_path) {
        Ok(baseline) => {
            let overlay = KeepAreaOverlay::new(baseline);
            let spliced_writer = create_collision_writer(format);
            keep_area_tiles = splice_keep_areas(
                &collision,
                &overlay,
                collision.bounds(),
                &spliced_writer,
                &cancel,
            )?;
            save_collision_map(&spliced_writer, &collision_path)?;
            spliced_writer.freeze()
        }
        Err(e) => {
            log::warn!(
                "no walkability baseline at {}: {e}; keep areas left as dumped",
                baseline_path.display()
            );
            collision
        }
    };

    log::info!("pass 2/4: water-body filter");
    let filtered_writer = create_tile_type_writer(format);
    let water_stats = filter_water_bodies(&tile_types, min_body_size, &filtered_writer, &cancel)?;
    save_tile_type_map(&filtered_writer, &filtered_path)?;
    let filtered = filtered_writer.freeze();

    log::info!("pass 3/4: water mask");
    let mask_writer = create_collision_writer(Format::SparseBitset);
    let masked_tiles = build_water_mask(&filtered, filtered.bounds(), &mask_writer, &cancel)?;
    save_collision_map(&mask_writer, &water_mask_path)?;

    log::info!("pass 4/4: boat navigation map");
    let nav_writer = create_collision_writer(format);
    let nav_stats = build_boat_nav_map(&collision, &filtered, boat_size, &nav_writer, &cancel)?;
    save_collision_map(&nav_writer, &boat_nav_path)?;

    let run_report = report::RunReport {
        format: token.to_string(),
        boat_size,
        min_body_size,
        keep_area_tiles,
        masked_tiles,
        water_filter: water_stats,
        boat_nav: nav_stats,
    };
    report::save_report(&report_path, &run_report)?;
    log::info!("wrote report to {}", report_path.display());

    Ok(())
}

use std::path::Path;

use tessera_process::{BoatNavStats, WaterBodyStats};

/// Summary of one map-generation run, saved next to the outputs.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RunReport {
    pub format: String,
    pub boat_size: i32,
    pub min_body_size: usize,
    pub keep_area_tiles: u64,
    pub masked_tiles: u64,
    pub water_filter: WaterBodyStats,
    pub boat_nav: BoatNavStats,
}

/// Load a report from a JSON file. Returns None if the file doesn't exist
/// or doesn't parse.
pub fn load_report(path: &Path) -> Option<RunReport> {
    let contents = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a report to a JSON file.
pub fn save_report(path: &Path, report: &RunReport) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

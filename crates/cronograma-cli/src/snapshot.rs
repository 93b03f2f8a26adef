//! Snapshot and configuration loading

use std::path::Path;

use anyhow::{Context, Result};
use cronograma_core::{Activity, FinanceEntry, Snapshot};
use cronograma_render::ReportConfig;
use tracing::{debug, info};

/// Read a JSON snapshot and convert every record.
///
/// Fails on the first record that does not validate.
pub fn load_snapshot(path: &Path) -> Result<(Vec<Activity>, Vec<FinanceEntry>)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;

    let (activities, finances) = snapshot
        .into_domain()
        .with_context(|| format!("Invalid record in {}", path.display()))?;

    info!(
        activities = activities.len(),
        finances = finances.len(),
        "loaded snapshot"
    );
    Ok((activities, finances))
}

/// Load report configuration from a TOML file, or defaults when no file
/// is given
pub fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    let Some(path) = path else {
        return Ok(ReportConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: ReportConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    debug!(path = %path.display(), "loaded report config");
    Ok(config)
}

pub mod alloy;
pub mod database;
pub mod mobility;

use std::error::Error;
use std::path::Path;

use mobility_scatter::RunConfig;

pub(crate) fn load_config(path: &Path) -> Result<RunConfig, Box<dyn Error>> {
    let config = RunConfig::load(path)?;
    tracing::info!(path = %path.display(), "loaded run configuration");
    Ok(config)
}

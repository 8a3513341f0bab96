use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use mobility_scatter::resolve_database;

use super::load_config;
use crate::write_json;

#[derive(Args, Debug)]
pub struct AlloyArgs {
    /// YAML run configuration; only the material and composition blocks are used.
    #[arg(long)]
    pub config: PathBuf,
    /// Output directory receiving `alloy_params.json`.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &AlloyArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let config = load_config(&args.config)?;
    config.system()?;
    let database = resolve_database(&config)?;
    let table = mobility_alloy::derive(
        &database,
        &config.binaries(),
        &config.material.alloy,
        config.composition_set()?,
    )?;
    write_json(args.out.join("alloy_params.json"), &table)?;
    tracing::info!(
        alloy = %table.alloy,
        compositions = table.len(),
        out = %args.out.display(),
        "wrote alloy parameters"
    );
    Ok(())
}

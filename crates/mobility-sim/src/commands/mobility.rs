use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use mobility_core::RunProvenance;
use mobility_scatter::{resolve_database, run_with_database, TOTAL_COLUMN};
use serde::Serialize;

use super::load_config;
use crate::write_json;

#[derive(Args, Debug)]
pub struct MobilityArgs {
    /// YAML run configuration.
    #[arg(long)]
    pub config: PathBuf,
    /// Output directory for the run artefacts.
    #[arg(long)]
    pub out: PathBuf,
    /// Worker threads, overriding the configuration.
    #[arg(long)]
    pub threads: Option<usize>,
    /// Skip the CSV rendering of the mobility table.
    #[arg(long)]
    pub no_csv: bool,
}

#[derive(Serialize)]
struct RunManifest<'a> {
    config_path: String,
    artefacts: Vec<&'a str>,
    #[serde(flatten)]
    provenance: &'a RunProvenance,
}

pub fn run(args: &MobilityArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let mut config = load_config(&args.config)?;
    if let Some(threads) = args.threads {
        config.threads = threads;
    }
    let database = resolve_database(&config)?;
    let output = run_with_database(&config, &database)?;

    let mut artefacts = vec!["mobility_table.json"];
    write_json(args.out.join("mobility_table.json"), &output.table)?;
    if !args.no_csv {
        let file = fs::File::create(args.out.join("mobility_table.csv"))?;
        output.table.write_csv(file)?;
        artefacts.push("mobility_table.csv");
    }
    if let Some(derived) = &output.derived {
        write_json(args.out.join("derived_quantities.json"), derived)?;
        artefacts.push("derived_quantities.json");
    }
    artefacts.push("config.yaml");
    fs::copy(&args.config, args.out.join("config.yaml"))?;

    let manifest = RunManifest {
        config_path: args.config.display().to_string(),
        artefacts,
        provenance: &output.provenance,
    };
    write_json(args.out.join("run_manifest.json"), &manifest)?;

    let summary = serde_json::json!({
        "compositions": output.table.len(),
        "columns": output.table.column_labels(),
        "total": output.table.column(TOTAL_COLUMN),
        "table_hash": output.provenance.table_hash,
        "out": args.out.display().to_string(),
    });
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &summary)?;
    writeln!(stdout)?;
    Ok(())
}

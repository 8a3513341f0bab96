use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use mobility_alloy::MaterialDatabase;

#[derive(Args, Debug)]
pub struct DatabaseArgs {
    /// YAML or JSON records overlaid onto the built-in database.
    #[arg(long)]
    pub db: Option<PathBuf>,
    /// Print a single compound instead of the whole database.
    #[arg(long)]
    pub compound: Option<String>,
}

pub fn run(args: &DatabaseArgs) -> Result<(), Box<dyn Error>> {
    let mut database = MaterialDatabase::builtin();
    if let Some(path) = &args.db {
        database = database.merge(MaterialDatabase::load(path)?);
    }
    let bytes = match &args.compound {
        Some(name) => mobility_core::serde::to_pretty_json_bytes(database.get(name)?)?,
        None => mobility_core::serde::to_pretty_json_bytes(&database)?,
    };
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes)?;
    writeln!(stdout)?;
    Ok(())
}

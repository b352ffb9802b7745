//! Implementation of the `bara-sync config` command.

use crate::cli::ConfigArgs;
use crate::config::CopybaraConfig;
use crate::copybara::{self, Workflow};
use crate::error::Result;
use crate::fs::atomic_write_file;
use std::path::Path;

/// Render copy.bara.sky for `args.workflow` to stdout or `args.output`.
pub fn cmd_config(config_path: &Path, args: ConfigArgs) -> Result<()> {
    let config = CopybaraConfig::load(config_path)?;
    let workflow = Workflow::parse(&args.workflow);
    let document = copybara::get_config(&workflow, &config, args.key.ssh_key.as_deref())?;

    match args.output {
        Some(path) => {
            atomic_write_file(&path, &document)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", document),
    }

    Ok(())
}

//! Implementation of the `bara-sync pull` command.

use crate::cli::PullArgs;
use crate::config::CopybaraConfig;
use crate::copybara::Copybara;
use crate::copybara::docker::{DockerRunner, DryRunRunner, ProcessRunner};
use crate::error::{BaraError, Result};
use crate::exit_codes;
use std::path::{Path, PathBuf};

/// Execute the `bara-sync pull` command.
///
/// A missing config file is fine here: the default image is pulled.
pub fn cmd_pull(config_path: &Path, args: PullArgs) -> Result<()> {
    let config = if config_path.exists() {
        CopybaraConfig::load(config_path)?
    } else {
        CopybaraConfig::default()
    };

    let code = if args.dry_run {
        pull(&config, DryRunRunner)?
    } else {
        pull(&config, DockerRunner)?
    };

    if code != exit_codes::SUCCESS {
        return Err(BaraError::Io(format!(
            "docker pull {} exited with code {}",
            config.image.reference(),
            code
        )));
    }

    println!("Pulled {}", config.image.reference());
    Ok(())
}

fn pull<R: ProcessRunner>(config: &CopybaraConfig, runner: R) -> Result<i32> {
    Copybara::new(
        config.image.clone(),
        config.host.clone(),
        PathBuf::from("."),
        runner,
    )
    .download()
}

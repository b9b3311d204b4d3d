//! Logger setup
//!
//! The TUI owns the terminal, so interactive runs log to a file. Without a
//! file they stay silent. `RUST_LOG` overrides the default filter.

use std::fs::{self, OpenOptions};
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::types::{Result, WeekgridError};

pub fn init(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let mut builder = match log_file {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
            builder.target(Target::Pipe(Box::new(file)));
            builder
        }
        None if interactive => return Ok(()),
        None => Builder::from_env(Env::default().default_filter_or("warn")),
    };

    builder
        .try_init()
        .map_err(|e| WeekgridError::Config(format!("logger: {}", e)))
}

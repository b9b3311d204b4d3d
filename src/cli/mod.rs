mod summary;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::services::{grid_file, logging, Config, ConfigService, ThemeChoice};
use crate::tui::{self, Theme, TuiOptions};
use crate::types::{Result, HOURS_IN_WEEK};

pub use summary::{GridSummary, SummaryArgs};

/// Terminal week-schedule editor
#[derive(Parser)]
#[command(name = "weekgrid")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    tui: TuiArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui(TuiArgs),

    /// Print day and hour summaries of a grid file
    Summary(SummaryArgs),
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            None => self.tui.run(),
            Some(Commands::Tui(args)) => args.run(),
            Some(Commands::Summary(args)) => {
                logging::init(None, false)?;
                args.run()?;
                Ok(())
            }
        }
    }
}

/// Options for the interactive editor
#[derive(Args, Debug, Default)]
pub struct TuiArgs {
    /// Start from this grid file (JSON array of 168 booleans)
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Print the final grid as JSON on exit
    #[arg(long)]
    pub print: bool,

    /// Config file (default: ~/.weekgrid/config.json)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Color theme, overriding the config file
    #[arg(long, value_enum)]
    pub theme: Option<ThemeChoice>,
}

impl TuiArgs {
    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => ConfigService::new()?.load(),
        }
    }

    /// Configured log file, else the default one under `~/.weekgrid/`
    fn log_path(config: &Config) -> Option<PathBuf> {
        config
            .log_file
            .clone()
            .or_else(|| ConfigService::new().ok().map(|s| s.default_log_path()))
    }

    pub fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;
        logging::init(Self::log_path(&config).as_deref(), true)?;

        let initial = match &self.data {
            Some(path) => grid_file::load_data(path)?,
            None => Vec::new(),
        };
        if self.data.is_some() && initial.len() != HOURS_IN_WEEK {
            log::warn!(
                "--data has {} entries (expected {}), starting empty",
                initial.len(),
                HOURS_IN_WEEK
            );
        }
        // Detect before ratatui::init puts the terminal in raw mode
        let theme = Theme::from_choice(self.theme.unwrap_or(config.theme));
        log::info!(
            "starting tui (theme: {:?}, throttle: {:?})",
            theme,
            config.throttle_interval()
        );

        let grid = tui::run(TuiOptions {
            initial,
            data_path: self.data.clone(),
            theme,
            throttle: config.throttle_interval(),
        })?;

        if self.print {
            println!("{}", grid_file::to_json(&grid)?);
        }
        Ok(())
    }
}

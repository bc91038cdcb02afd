use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::kernel::Config;

/// Simulates a process manager driven by single-character commands
/// (Q = quantum, U = unblock, P = print, T = terminate).
#[derive(Parser, Debug)]
#[command(name = "process-manager", version, about)]
pub struct Cli {
    /// Program loaded as the init process.
    #[arg(long, default_value = "init.txt")]
    pub init: String,

    /// Directory that program names are resolved against.
    #[arg(long, default_value = ".")]
    pub program_dir: PathBuf,

    /// Maximum number of processes ever created. Unbounded when omitted.
    #[arg(long)]
    pub max_processes: Option<usize>,

    /// Do not print the command prompt.
    #[arg(long)]
    pub no_prompt: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            init_program: self.init.clone(),
            max_processes: self.max_processes,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

use std::io::{self, BufReader};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder as LogBuilder;
use log::{error, info};

use process_manager_simulator::cli::Cli;
use process_manager_simulator::io::{spawn_commander, FileSystemSource};
use process_manager_simulator::kernel::Driver;

fn main() -> Result<()> {
    let cli = Cli::parse();

    LogBuilder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let source = FileSystemSource::new(&cli.program_dir);
    let mut driver = Driver::boot(&cli.config(), Box::new(source))
        .context("failed to create the init process")?;
    info!("process manager started");

    let input = BufReader::new(io::stdin());
    let (commander, commands) = if cli.no_prompt {
        spawn_commander(input, Box::new(io::sink()) as Box<dyn io::Write + Send>)
    } else {
        spawn_commander(input, Box::new(io::stdout()) as Box<dyn io::Write + Send>)
    };

    let mut stdout = io::stdout();
    driver
        .run(&commands, &mut stdout)
        .context("failed to write session output")?;

    // The commander has already stopped: it quits after forwarding `T`, and a
    // disconnect means it hit end of input.
    drop(commands);
    if commander.join().is_err() {
        error!("commander thread panicked");
    }

    Ok(())
}

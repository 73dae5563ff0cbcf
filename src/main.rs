//! Terminal runner (default binary).
//!
//! Runs the same frame loop the game uses on bare metal, with the terminal as
//! the machine: crossterm for input and a diffing text-mode framebuffer for
//! output. Reset (`r`, `q` or Ctrl-C) leaves the game.

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use metal_tetris::cli::Cli;
use metal_tetris::engine::{Flow, Game};
use metal_tetris::term::HostMachine;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut host = HostMachine::new(cli.host_config());
    host.enter()?;

    let result = run(&mut host, &cli);

    // Always try to restore terminal state.
    let _ = host.exit();
    result
}

/// Log to `--log-file` only; stderr belongs to the game screen.
fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(host: &mut HostMachine, cli: &Cli) -> Result<()> {
    let mut game = Game::boot(host, cli.frame_config());
    host.present()?;

    loop {
        match game.step(host) {
            Flow::Idle => {}
            Flow::Redrawn => host.present()?,
            Flow::Reset => {
                info!("reset requested, leaving");
                return Ok(());
            }
        }
    }
}

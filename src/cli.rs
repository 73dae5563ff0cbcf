// cli.rs - Command-line interface configuration
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::engine::FrameConfig;
use crate::term::HostConfig;
use crate::types::{GRAVITY_MS, HOST_POLL_MS};

#[derive(Parser, Debug, Clone)]
#[command(name = "metal-tetris")]
#[command(about = "Falling-block game on a self-calibrating timebase", long_about = None)]
pub struct Cli {
    /// Milliseconds between gravity steps
    #[arg(long = "gravity-ms", default_value_t = GRAVITY_MS, value_parser = clap::value_parser!(u32).range(1..))]
    pub gravity_ms: u32,

    /// Start with the debug overlay visible
    #[arg(long = "debug", default_value = "false")]
    pub debug: bool,

    /// Keyboard poll timeout in milliseconds
    #[arg(long = "poll-ms", default_value_t = HOST_POLL_MS)]
    pub poll_ms: u64,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn frame_config(&self) -> FrameConfig {
        FrameConfig {
            gravity_ms: self.gravity_ms,
            debug_overlay: self.debug,
        }
    }

    pub fn host_config(&self) -> HostConfig {
        HostConfig {
            poll_timeout: Duration::from_millis(self.poll_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_constants() {
        let cli = Cli::try_parse_from(["metal-tetris"]).unwrap();
        assert_eq!(cli.frame_config(), FrameConfig::default());
        assert_eq!(cli.host_config(), HostConfig::default());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "metal-tetris",
            "--gravity-ms",
            "250",
            "--debug",
            "--poll-ms",
            "5",
            "--log-file",
            "game.log",
        ])
        .unwrap();
        assert_eq!(cli.frame_config().gravity_ms, 250);
        assert!(cli.frame_config().debug_overlay);
        assert_eq!(cli.host_config().poll_timeout, Duration::from_millis(5));
        assert_eq!(cli.log_file, Some(PathBuf::from("game.log")));
    }

    #[test]
    fn zero_gravity_interval_is_rejected() {
        assert!(Cli::try_parse_from(["metal-tetris", "--gravity-ms", "0"]).is_err());
    }
}

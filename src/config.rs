use std::path::PathBuf;

use clap::Parser;

use crate::damper::DEFAULT_DAMPING_FACTOR;
use crate::error::ShowcaseError;

/// Scroll-driven 3D showcase rendered in the terminal
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Pointer smoothing weight per frame, in (0, 1]
    #[arg(long, default_value_t = DEFAULT_DAMPING_FACTOR)]
    pub damping: f64,

    /// Rows scrolled per mouse wheel notch
    #[arg(long, default_value_t = 3)]
    pub wheel_rows: u16,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Start with the debug overlay visible
    #[arg(short, long)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fps: 60,
            damping: DEFAULT_DAMPING_FACTOR,
            wheel_rows: 3,
            log_file: None,
            debug: false,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ShowcaseError> {
        if !(1..=240).contains(&self.fps) {
            return Err(ShowcaseError::InvalidConfig(format!(
                "fps must be between 1 and 240, got {}",
                self.fps
            )));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ShowcaseError::InvalidConfig(format!(
                "damping must be in (0, 1], got {}",
                self.damping
            )));
        }
        if self.wheel_rows == 0 {
            return Err(ShowcaseError::InvalidConfig(
                "wheel-rows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_parsed_defaults() {
        let parsed = Config::try_parse_from(["showcase3d"]).unwrap();
        assert_eq!(parsed, Config::default());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn parses_flags() {
        let parsed = Config::try_parse_from([
            "showcase3d",
            "--fps",
            "30",
            "--damping",
            "0.25",
            "--wheel-rows",
            "5",
            "--log-file",
            "showcase.log",
            "-d",
        ])
        .unwrap();
        assert_eq!(parsed.fps, 30);
        assert_eq!(parsed.damping, 0.25);
        assert_eq!(parsed.wheel_rows, 5);
        assert_eq!(parsed.log_file, Some(PathBuf::from("showcase.log")));
        assert!(parsed.debug);
    }

    #[test]
    fn rejects_out_of_range_values() {
        for config in [
            Config {
                damping: 0.0,
                ..Config::default()
            },
            Config {
                damping: 1.5,
                ..Config::default()
            },
            Config {
                damping: f64::NAN,
                ..Config::default()
            },
            Config {
                fps: 0,
                ..Config::default()
            },
            Config {
                wheel_rows: 0,
                ..Config::default()
            },
        ] {
            assert!(matches!(
                config.validate(),
                Err(ShowcaseError::InvalidConfig(_))
            ));
        }
    }
}

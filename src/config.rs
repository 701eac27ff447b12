//! Runtime configuration
//!
//! Defaults, optionally overlaid by a JSON file (`--config`), then by
//! individual command line flags.

use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::color::{self, Pixel, CORNFLOWER_BLUE};
use crate::display::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::engine::DEFAULT_SHUTDOWN_POLL;
use crate::error::Error;
use crate::passes::PassKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    #[serde(with = "hex_color")]
    pub clear_color: Pixel,
    pub pass: PassKind,
    pub title: String,
    pub vsync: bool,
    pub headless: bool,
    /// Stop after this many presented frames (headless only)
    pub max_frames: Option<u64>,
    pub shutdown_poll_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            clear_color: CORNFLOWER_BLUE,
            pass: PassKind::default(),
            title: "linecast".to_string(),
            vsync: true,
            headless: false,
            max_frames: None,
            shutdown_poll_ms: DEFAULT_SHUTDOWN_POLL.as_millis() as u64,
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Run(Config),
    Help,
}

impl Config {
    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load config from a JSON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn shutdown_poll(&self) -> Duration {
        Duration::from_millis(self.shutdown_poll_ms)
    }

    /// Parse command line arguments (without the program name)
    pub fn from_args<I>(args: I) -> Result<CliAction, Error>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();

        // The config file goes first so flags override it wherever they appear
        let mut config = match args.iter().position(|a| a == "--config" || a == "-c") {
            Some(i) => {
                let path = value_for(&args, i)?;
                info!("Loading config from {}", path);
                Self::load(path)?
            },
            None => Self::default(),
        };

        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            match arg {
                "--help" => return Ok(CliAction::Help),
                "--no-vsync" => config.vsync = false,
                "--headless" => config.headless = true,
                "--config" | "-c" => i += 1,
                "--width" | "-w" => {
                    config.width = parse_number(arg, value_for(&args, i)?)?;
                    i += 1;
                },
                "--height" | "-h" => {
                    config.height = parse_number(arg, value_for(&args, i)?)?;
                    i += 1;
                },
                "--resolution" | "-r" => {
                    // WxH format (e.g., 1920x1080)
                    let value = value_for(&args, i)?;
                    let (w, h) = value
                        .split_once('x')
                        .ok_or_else(|| Error::Config(format!("{arg}: expected WxH, got '{value}'")))?;
                    config.width = parse_number(arg, w)?;
                    config.height = parse_number(arg, h)?;
                    i += 1;
                },
                "--clear-color" => {
                    let value = value_for(&args, i)?;
                    config.clear_color = color::parse_hex(value)
                        .ok_or_else(|| Error::Config(format!("{arg}: bad color '{value}'")))?;
                    i += 1;
                },
                "--pass" => {
                    let value = value_for(&args, i)?;
                    config.pass = PassKind::from_name(value)
                        .ok_or_else(|| Error::Config(format!("{arg}: unknown pass '{value}'")))?;
                    i += 1;
                },
                "--frames" => {
                    config.max_frames = Some(parse_number(arg, value_for(&args, i)?)?);
                    i += 1;
                },
                other => warn!("Ignoring unknown argument '{}'", other),
            }
            i += 1;
        }

        Ok(CliAction::Run(config))
    }
}

pub fn print_help() {
    let defaults = Config::default();
    println!("Usage: linecast [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config PATH, -c PATH    Load settings from a JSON file");
    println!(
        "  --width W, -w W           Set buffer width (default: {})",
        defaults.width
    );
    println!(
        "  --height H, -h H          Set buffer height (default: {})",
        defaults.height
    );
    println!("  --resolution WxH, -r WxH  Set resolution (e.g., 800x600)");
    println!(
        "  --clear-color HEX         Background as #AARRGGBB (default: {})",
        color::to_hex(defaults.clear_color)
    );
    println!("  --pass NAME               growing-line or starburst");
    println!("  --frames N                Stop after N frames (headless)");
    println!("  --headless                Render without opening a window");
    println!("  --no-vsync                Disable VSync for uncapped framerate");
    println!("  --help                    Show this help message");
    println!();
    println!("Set RUST_LOG=debug for frame timing logs.");
}

fn value_for(args: &[String], flag_index: usize) -> Result<&str, Error> {
    args.get(flag_index + 1)
        .map(String::as_str)
        .ok_or_else(|| Error::Config(format!("{} needs a value", args[flag_index])))
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{flag}: '{value}' is not a valid number")))
}

/// Colors are stored as `#AARRGGBB` strings in config files
mod hex_color {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::color::{self, Pixel};

    pub fn serialize<S: Serializer>(value: &Pixel, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color::to_hex(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pixel, D::Error> {
        let text = String::deserialize(deserializer)?;
        color::parse_hex(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{text}'")))
    }
}

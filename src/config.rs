/*
 *  config.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  Layered configuration - defaults, YAML file, command line
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::display::drivers::port::is_reserved_i2c_address;
use crate::display::drivers::ssd1306::{ComPinConfig, Ssd1306Config};
use crate::display::error::DisplayError;
use crate::graphics::canvas::DisplayRotation;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// General options
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub scene: Option<Scene>,          // what the demo draws
    /// display-specific geometry & behavior
    pub display: Option<DisplayConfig>,
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn scene(&self) -> Scene {
        self.scene.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub rotate_deg: Option<u16>,
    pub contrast: Option<u8>,          // 0-255
    pub invert: Option<bool>,
    pub driver: Option<DriverKind>,    // <- strongly-typed driver selection
    pub bus: Option<BusConfig>,        // <- i2c wiring
    pub com_pins: Option<ComPinConfig>,
    pub first_column: Option<u8>,
    pub first_page: Option<u8>,
}

impl DisplayConfig {
    /// Landscape (width, height), 128x64 unless configured
    pub fn panel_size(&self) -> (u32, u32) {
        (self.width.unwrap_or(128), self.height.unwrap_or(64))
    }

    pub fn rotation(&self) -> Result<DisplayRotation, DisplayError> {
        DisplayRotation::try_from(self.rotate_deg.unwrap_or(0))
    }

    /// Controller settings with unset fields taken from the defaults
    pub fn ssd1306_config(&self) -> Ssd1306Config {
        let defaults = Ssd1306Config::default();
        let (width, height) = self.panel_size();
        Ssd1306Config {
            width,
            height,
            com_pins: self.com_pins.unwrap_or(defaults.com_pins),
            first_column: self.first_column.unwrap_or(defaults.first_column),
            first_page: self.first_page.unwrap_or(defaults.first_page),
            contrast: self.contrast.unwrap_or(defaults.contrast),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BusConfig {
    I2c {
        bus: String,        // e.g. "/dev/i2c-1"
        address: u8,        // e.g. 0x3C (I2C addresses are 7-bit, stored in u8)
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    Ssd1306,
    Console,    // ASCII frames on stdout, no hardware
}

/// Demo scene
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    /// circle, text and a frame
    #[default]
    Shapes,
    /// every printable character
    Text,
    /// one dot per step down the diagonal
    Diagonal,
    /// button and channel strip widgets
    Widgets,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "monogfx-demo", about = "Monochrome OLED graphics demo", version)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long, value_enum)]
    pub scene: Option<Scene>,
    #[arg(long, value_enum)]
    pub display_driver: Option<DriverKind>,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    #[arg(long)]
    pub display_rotate_deg: Option<u16>,
    #[arg(long)]
    pub display_contrast: Option<u8>,
    #[arg(long, action = ArgAction::Set)]
    pub display_invert: Option<bool>,
    /// I2C device, e.g. /dev/i2c-1
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub i2c_bus: Option<String>,
    /// 7-bit I2C address, decimal or 0x-prefixed hex
    #[arg(long, value_parser = parse_i2c_address)]
    pub i2c_address: Option<u8>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

fn parse_i2c_address(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| format!("invalid I2C address '{}': {}", s, e))
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    let cfg = load_with(&cli)?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Build the effective configuration for already parsed arguments
pub fn load_with(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/monogfx/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/monogfx/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/monogfx.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["monogfx.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    // top-level
    if src.log_level.is_some()      { dst.log_level = src.log_level; }
    if src.scene.is_some()          { dst.scene = src.scene; }
    // display
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()        { dst.width = src.width; }
    if src.height.is_some()       { dst.height = src.height; }
    if src.rotate_deg.is_some()   { dst.rotate_deg = src.rotate_deg; }
    if src.contrast.is_some()     { dst.contrast = src.contrast; }
    if src.invert.is_some()       { dst.invert = src.invert; }
    if src.driver.is_some()       { dst.driver = src.driver; }
    if src.bus.is_some()          { dst.bus = src.bus; }
    if src.com_pins.is_some()     { dst.com_pins = src.com_pins; }
    if src.first_column.is_some() { dst.first_column = src.first_column; }
    if src.first_page.is_some()   { dst.first_page = src.first_page; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()       { cfg.log_level = cli.log_level.clone(); }
    if cli.scene.is_some()           { cfg.scene = cli.scene; }
    let any_display = cli.display_driver.is_some()
        || cli.display_width.is_some()
        || cli.display_height.is_some()
        || cli.display_rotate_deg.is_some()
        || cli.display_contrast.is_some()
        || cli.display_invert.is_some()
        || cli.i2c_bus.is_some()
        || cli.i2c_address.is_some();

    if any_display && cfg.display.is_none() {
        cfg.display = Some(DisplayConfig::default());
    }
    if let Some(display) = cfg.display.as_mut() {
        if cli.display_driver.is_some()      { display.driver = cli.display_driver; }
        if cli.display_width.is_some()       { display.width = cli.display_width; }
        if cli.display_height.is_some()      { display.height = cli.display_height; }
        if cli.display_rotate_deg.is_some()  { display.rotate_deg = cli.display_rotate_deg; }
        if cli.display_contrast.is_some()    { display.contrast = cli.display_contrast; }
        if cli.display_invert.is_some()      { display.invert = cli.display_invert; }

        if cli.i2c_bus.is_some() || cli.i2c_address.is_some() {
            let (bus, address) = match display.bus.take() {
                Some(BusConfig::I2c { bus, address }) => (bus, address),
                None => ("/dev/i2c-1".to_string(), 0x3C),
            };
            display.bus = Some(BusConfig::I2c {
                bus: cli.i2c_bus.clone().unwrap_or(bus),
                address: cli.i2c_address.unwrap_or(address),
            });
        }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(display) = cfg.display.as_ref() {
        let (w, h) = display.panel_size();
        if w == 0 || h == 0 {
            return Err(ConfigError::Validation("display width/height must be > 0".into()));
        }
        if h % 8 != 0 {
            return Err(ConfigError::Validation("display height must be a multiple of 8".into()));
        }
        if let Some(rot) = display.rotate_deg {
            match rot {
                0 | 90 | 180 | 270 => {},
                _ => return Err(ConfigError::Validation("display rotate_deg must be 0|90|180|270".into()))
            }
        }
        if let Some(BusConfig::I2c { address, .. }) = display.bus.as_ref() {
            if *address >= 0x80 || is_reserved_i2c_address(*address) {
                return Err(ConfigError::Validation(format!(
                    "I2C address 0x{:02X} is not a usable 7-bit address",
                    address
                )));
            }
        }
    }
    Ok(())
}

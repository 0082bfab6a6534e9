use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use dayboard_core::{Settings, TodayPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_dayboard_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub calendar: CalendarSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSection {
    /// "fixed" pins the today marker to 2026-02-13; "live" follows the clock.
    #[serde(default)]
    pub today: TodayPolicy,

    /// IANA zone used for the greeting, live today and reminder times.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for CalendarSection {
    fn default() -> Self {
        Self {
            today: TodayPolicy::Fixed,
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "America/Chicago".to_string()
}

impl Config {
    pub fn settings(&self) -> Result<Settings> {
        let timezone: Tz = self
            .calendar
            .timezone
            .parse()
            .map_err(|_| anyhow!("invalid timezone: {}", self.calendar.timezone))?;
        Ok(Settings {
            today: self.calendar.today,
            timezone,
        })
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_dayboard_home()?.join("config.toml"))
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.settings().unwrap(), Settings::default());
    }

    #[test]
    fn round_trip_and_partial_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.calendar.today = TodayPolicy::Live;
        cfg.calendar.timezone = "Europe/Berlin".to_string();
        save_config(&path, &cfg).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), cfg);

        fs::write(&path, "[calendar]\ntoday = \"live\"\n").unwrap();
        let partial = load_config_from(&path).unwrap();
        assert_eq!(partial.calendar.today, TodayPolicy::Live);
        assert_eq!(partial.calendar.timezone, "America/Chicago");
    }

    #[test]
    fn bad_timezone_is_an_error() {
        let mut cfg = Config::default();
        cfg.calendar.timezone = "Mars/Olympus".to_string();
        assert!(cfg.settings().is_err());
    }
}

//! Session configuration
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    epoch::{parse_iso, ParsingError},
    filter::{QualityPolicy, TimeWindow},
    quality::{Error as QualityError, Quality},
    schema::FixSchema,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read configuration file")]
    Io(#[from] std::io::Error),
    #[error("invalid json configuration")]
    Json(#[from] serde_json::Error),
    #[error("invalid quality threshold")]
    Threshold(#[from] QualityError),
    #[error("invalid {what} date")]
    Date {
        what: &'static str,
        #[source]
        source: ParsingError,
    },
    #[error("{what} window ends ({end}) before it starts ({start})")]
    Reversed {
        what: &'static str,
        start: String,
        end: String,
    },
    #[error("invalid interval display range [{0}, {1}]")]
    Range(f64, f64),
    #[error("invalid margin {0}")]
    Margin(f64),
}

/// Date range, described by two ISO datetimes (time of day is optional).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
    /// Converts self to an inclusive [TimeWindow]
    pub fn to_window(&self, what: &'static str) -> Result<TimeWindow, Error> {
        let start = parse_iso(&self.start).map_err(|source| Error::Date { what, source })?;
        let end = parse_iso(&self.end).map_err(|source| Error::Date { what, source })?;
        if start > end {
            return Err(Error::Reversed {
                what,
                start: self.start.clone(),
                end: self.end.clone(),
            });
        }
        Ok(TimeWindow::new(start, end))
    }
}

fn default_threshold() -> u8 {
    2
}

fn default_window() -> DateRange {
    DateRange::new("2024-02-13", "2024-02-25")
}

fn default_interval_window() -> DateRange {
    DateRange::new("2024-02-15", "2024-02-25")
}

fn default_interval_range() -> (f64, f64) {
    (-2.0, 100.0)
}

fn default_margin() -> f64 {
    0.05
}

fn default_glider_offset() -> f64 {
    0.6
}

fn default_ship_offset() -> f64 {
    0.4
}

/// [Config] gathers every setting of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Quality threshold: 0 (best fixes only) to 3 (include okay fixes)
    #[serde(default = "default_threshold")]
    pub quality_threshold: u8,
    /// High/low quality split used by the location panels
    #[serde(default)]
    pub location_policy: QualityPolicy,
    /// Time frame of interest
    #[serde(default = "default_window")]
    pub window: DateRange,
    /// Time frame displayed by the interval plot
    #[serde(default = "default_interval_window")]
    pub interval_window: DateRange,
    /// Y range of the interval plot, in minutes
    #[serde(default = "default_interval_range")]
    pub interval_range_minutes: (f64, f64),
    /// Margin around windowed fix locations, in decimal degrees
    #[serde(default = "default_margin")]
    pub margin_deg: f64,
    /// Height at which glider pings are drawn
    #[serde(default = "default_glider_offset")]
    pub glider_offset: f64,
    /// Height at which ship pings are drawn
    #[serde(default = "default_ship_offset")]
    pub ship_offset: f64,
    /// Column layout of both input files
    #[serde(default)]
    pub schema: FixSchema,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quality_threshold: default_threshold(),
            location_policy: QualityPolicy::default(),
            window: default_window(),
            interval_window: default_interval_window(),
            interval_range_minutes: default_interval_range(),
            margin_deg: default_margin(),
            glider_offset: default_glider_offset(),
            ship_offset: default_ship_offset(),
            schema: FixSchema::default(),
        }
    }
}

impl Config {
    /// Loads a [Config] from a JSON file. Missing fields take default values.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&content)?;
        Ok(cfg)
    }
    /// Copies and returns self with updated quality threshold
    pub fn with_quality_threshold(&self, threshold: u8) -> Self {
        let mut s = self.clone();
        s.quality_threshold = threshold;
        s
    }
    /// Copies and returns self with updated time frame of interest
    pub fn with_window(&self, start: &str, end: &str) -> Self {
        let mut s = self.clone();
        s.window = DateRange::new(start, end);
        s
    }
    /// Copies and returns self with updated interval plot time frame
    pub fn with_interval_window(&self, start: &str, end: &str) -> Self {
        let mut s = self.clone();
        s.interval_window = DateRange::new(start, end);
        s
    }
    /// Copies and returns self with updated location policy
    pub fn with_location_policy(&self, policy: QualityPolicy) -> Self {
        let mut s = self.clone();
        s.location_policy = policy;
        s
    }
    /// Quality threshold, as [Quality]
    pub fn threshold(&self) -> Result<Quality, Error> {
        Ok(Quality::new(self.quality_threshold)?)
    }
    /// Time frame of interest, as [TimeWindow]
    pub fn time_window(&self) -> Result<TimeWindow, Error> {
        self.window.to_window("time frame")
    }
    /// Interval plot time frame, as [TimeWindow]
    pub fn interval_time_window(&self) -> Result<TimeWindow, Error> {
        self.interval_window.to_window("interval plot")
    }
    /// Verifies all settings
    pub fn validate(&self) -> Result<(), Error> {
        self.threshold()?;
        self.time_window()?;
        self.interval_time_window()?;
        let (min, max) = self.interval_range_minutes;
        if !(min < max) {
            return Err(Error::Range(min, max));
        }
        if !(self.margin_deg >= 0.0) {
            return Err(Error::Margin(self.margin_deg));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn default_config() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.quality_threshold, 2);
        assert_eq!(cfg.window, DateRange::new("2024-02-13", "2024-02-25"));
        assert_eq!(cfg.interval_window, DateRange::new("2024-02-15", "2024-02-25"));
        assert_eq!(cfg.interval_range_minutes, (-2.0, 100.0));
        assert_eq!(cfg.margin_deg, 0.05);
        assert_eq!(cfg.glider_offset, 0.6);
        assert_eq!(cfg.ship_offset, 0.4);
        assert_eq!(cfg.location_policy, QualityPolicy::LocationPanel);
    }
    #[test]
    fn default_json_config() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, Config::default());

        let content = serde_json::to_string_pretty(&cfg).unwrap();
        let parsed: Config = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, cfg);
    }
    #[test]
    fn partial_json_config() {
        let cfg: Config = serde_json::from_str(
            r#"{
                "quality_threshold": 1,
                "location_policy": "Ordinal",
                "window": { "start": "2024-02-14 06:00:00", "end": "2024-02-16" }
            }"#,
        )
        .unwrap();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.quality_threshold, 1);
        assert_eq!(cfg.location_policy, QualityPolicy::Ordinal);
        assert_eq!(cfg.window.start, "2024-02-14 06:00:00");
        assert_eq!(cfg.interval_window, default_interval_window());
    }
    #[test]
    fn invalid_settings() {
        let cfg = Config::default().with_quality_threshold(4);
        assert!(matches!(cfg.validate(), Err(Error::Threshold(_))));

        let cfg = Config::default().with_window("2024-02-25", "2024-02-13");
        assert!(matches!(cfg.validate(), Err(Error::Reversed { .. })));

        let cfg = Config::default().with_interval_window("2024-02-15", "tomorrow");
        assert!(matches!(
            cfg.validate(),
            Err(Error::Date {
                what: "interval plot",
                ..
            })
        ));

        let mut cfg = Config::default();
        cfg.interval_range_minutes = (100.0, -2.0);
        assert!(matches!(cfg.validate(), Err(Error::Range(_, _))));
    }
}

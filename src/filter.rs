//! Quality and time masks
use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::{
    epoch::{parse_iso, ParsingError},
    quality::Quality,
    track::{Fix, Track},
};

/// [MaskOperand] describes how a fix quality compares to a threshold
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MaskOperand {
    /// Lower than, symbolized by "<"
    LowerThan,
    /// Lower Equals, symbolized by "<="
    LowerEquals,
    /// Greater than, symbolized by ">"
    GreaterThan,
    /// Greater Equals, symbolized by ">="
    GreaterEquals,
}

impl std::str::FromStr for MaskOperand {
    type Err = ParsingError;
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        match content.trim() {
            "<" => Ok(Self::LowerThan),
            "<=" => Ok(Self::LowerEquals),
            ">" => Ok(Self::GreaterThan),
            ">=" => Ok(Self::GreaterEquals),
            c => Err(ParsingError::FormatError(c.to_string())),
        }
    }
}

impl std::fmt::Display for MaskOperand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::LowerThan => f.write_str("<"),
            Self::LowerEquals => f.write_str("<="),
            Self::GreaterThan => f.write_str(">"),
            Self::GreaterEquals => f.write_str(">="),
        }
    }
}

impl std::ops::Not for MaskOperand {
    type Output = Self;
    /// Logical complement: a value passes either self or !self, never both.
    fn not(self) -> Self {
        match self {
            Self::LowerThan => Self::GreaterEquals,
            Self::LowerEquals => Self::GreaterThan,
            Self::GreaterThan => Self::LowerEquals,
            Self::GreaterEquals => Self::LowerThan,
        }
    }
}

impl MaskOperand {
    fn test(&self, value: Quality, threshold: Quality) -> bool {
        match self {
            Self::LowerThan => value < threshold,
            Self::LowerEquals => value <= threshold,
            Self::GreaterThan => value > threshold,
            Self::GreaterEquals => value >= threshold,
        }
    }
}

/// Retains fixes whose quality compares to `threshold` through `operand`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QualityMask {
    pub operand: MaskOperand,
    pub threshold: Quality,
}

impl std::ops::Not for QualityMask {
    type Output = Self;
    fn not(self) -> Self {
        Self {
            operand: !self.operand,
            threshold: self.threshold,
        }
    }
}

impl std::fmt::Display for QualityMask {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "quality {} {}", self.operand, self.threshold)
    }
}

impl QualityMask {
    pub fn new(operand: MaskOperand, threshold: Quality) -> Self {
        Self { operand, threshold }
    }
    /// True if this fix passes the mask
    pub fn retains(&self, fix: &Fix) -> bool {
        self.operand.test(fix.quality, self.threshold)
    }
}

/// How fixes are split into high and low quality sets.
/// Both policies exist side by side: they do not agree at, and below,
/// the threshold.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityPolicy {
    /// Lower code is better: high ⇔ quality <= threshold,
    /// low ⇔ quality > threshold.
    Ordinal,
    /// Partition drawn by the location panels:
    /// high ⇔ quality >= threshold, low ⇔ quality < threshold.
    #[default]
    LocationPanel,
}

impl std::fmt::Display for QualityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Ordinal => f.write_str("ordinal"),
            Self::LocationPanel => f.write_str("location-panel"),
        }
    }
}

impl std::str::FromStr for QualityPolicy {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ordinal" => Ok(Self::Ordinal),
            "location-panel" | "locationpanel" | "panel" => Ok(Self::LocationPanel),
            c => Err(ParsingError::FormatError(c.to_string())),
        }
    }
}

impl QualityPolicy {
    /// High quality mask, for this threshold
    pub fn high(&self, threshold: Quality) -> QualityMask {
        match self {
            Self::Ordinal => QualityMask::new(MaskOperand::LowerEquals, threshold),
            Self::LocationPanel => QualityMask::new(MaskOperand::GreaterEquals, threshold),
        }
    }
    /// Low quality mask, for this threshold: complement of [Self::high]
    pub fn low(&self, threshold: Quality) -> QualityMask {
        !self.high(threshold)
    }
}

/// Inclusive time window
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimeWindow {
    pub start: Epoch,
    pub end: Epoch,
}

impl TimeWindow {
    pub fn new(start: Epoch, end: Epoch) -> Self {
        Self { start, end }
    }
    /// Builds a [TimeWindow] from two ISO datetimes
    /// (time of day being optional).
    pub fn from_iso(start: &str, end: &str) -> Result<Self, ParsingError> {
        Ok(Self {
            start: parse_iso(start)?,
            end: parse_iso(end)?,
        })
    }
    /// True if `start <= t <= end`, `t` being expressed in UNIX seconds
    pub fn contains_seconds(&self, t: f64) -> bool {
        t >= self.start.to_unix_seconds() && t <= self.end.to_unix_seconds()
    }
    /// True if this fix falls within self
    pub fn contains(&self, fix: &Fix) -> bool {
        self.contains_seconds(fix.epoch_seconds())
    }
}

/// Filters that may apply to a [Track]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Filter {
    Quality(QualityMask),
    Time(TimeWindow),
}

impl From<QualityMask> for Filter {
    fn from(mask: QualityMask) -> Self {
        Self::Quality(mask)
    }
}

impl From<TimeWindow> for Filter {
    fn from(window: TimeWindow) -> Self {
        Self::Time(window)
    }
}

impl Filter {
    /// True if this fix passes self
    pub fn retains(&self, fix: &Fix) -> bool {
        match self {
            Self::Quality(mask) => mask.retains(fix),
            Self::Time(window) => window.contains(fix),
        }
    }
    /// Index mask: one boolean per fix
    pub fn index_mask(&self, fixes: &[Fix]) -> Vec<bool> {
        fixes.iter().map(|fix| self.retains(fix)).collect()
    }
}

/// Masking trait, to retain specific subsets of a dataset.
pub trait Masking {
    /// Apply [Filter] to mutable self.
    fn mask_mut(&mut self, filter: &Filter);
    /// Immutable masking.
    fn mask(&self, filter: &Filter) -> Self;
}

impl Masking for Track {
    fn mask_mut(&mut self, filter: &Filter) {
        self.fixes.retain(|fix| filter.retains(fix));
    }
    fn mask(&self, filter: &Filter) -> Self {
        let mut s = self.clone();
        s.mask_mut(filter);
        s
    }
}

impl Track {
    /// Splits self into (high, low) quality tracks
    pub fn partition(&self, policy: QualityPolicy, threshold: Quality) -> (Self, Self) {
        let high = Filter::Quality(policy.high(threshold));
        let low = Filter::Quality(policy.low(threshold));
        (self.mask(&high), self.mask(&low))
    }
}

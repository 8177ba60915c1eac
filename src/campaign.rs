//! Glider vs. ship campaign
use std::path::Path;

use log::info;

use crate::{
    cfg::Config,
    epoch::format_iso,
    filter::{Filter, Masking, QualityPolicy},
    track::{Platform, Track},
    Error,
};

/// [Campaign] pairs the glider and the ship tracks
/// with the settings they are analyzed with.
#[derive(Debug, Clone)]
pub struct Campaign {
    pub glider: Track,
    pub ship: Track,
    pub cfg: Config,
}

impl Campaign {
    /// Builds a new [Campaign]. Settings are verified first.
    pub fn new(glider: Track, ship: Track, cfg: Config) -> Result<Self, Error> {
        cfg.validate()?;
        Ok(Self { glider, ship, cfg })
    }

    /// Loads both Argos exports and builds a new [Campaign]
    pub fn from_paths<P: AsRef<Path>, Q: AsRef<Path>>(
        glider: P,
        ship: Q,
        cfg: Config,
    ) -> Result<Self, Error> {
        cfg.validate()?;
        let glider = Track::from_path(Platform::Glider, glider, &cfg.schema)?;
        let ship = Track::from_path(Platform::Ship, ship, &cfg.schema)?;
        Self::new(glider, ship, cfg)
    }

    /// Returns (glider, ship) tracks reduced to the time frame of interest
    pub fn windowed(&self) -> Result<(Track, Track), Error> {
        let window = Filter::Time(self.cfg.time_window()?);
        Ok((self.glider.mask(&window), self.ship.mask(&window)))
    }

    /// Logs a short description of both tracks
    pub fn summary(&self) -> Result<(), Error> {
        let threshold = self.cfg.threshold()?;
        for track in [&self.glider, &self.ship] {
            let (high, _) = track.partition(QualityPolicy::Ordinal, threshold);
            match track.time_span() {
                Some((first, last)) => info!(
                    "{} (tag: {}): {} fixes from {} to {}, {} with quality <= {}",
                    track.platform,
                    track.tag_id,
                    track.len(),
                    format_iso(first),
                    format_iso(last),
                    high.len(),
                    threshold,
                ),
                None => info!("{} (tag: {}): no fixes", track.platform, track.tag_id),
            }
        }
        Ok(())
    }
}

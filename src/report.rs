//! Chart generation
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::{
    campaign::Campaign,
    cfg::Config,
    plot::{MarkerSymbol, Mode, NamedColor, Plot},
    series,
    track::Track,
    Error,
};

/// Ping rows are drawn within this range
const PING_RANGE: (f64, f64) = (0.2, 0.8);

const STACKED_DIMS: (usize, usize) = (1000, 700);
const QUALITY_DIMS: (usize, usize) = (1000, 500);
const INTERVAL_DIMS: (usize, usize) = (700, 400);

/// Charts produced for each [Campaign]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Chart {
    /// Ping timing and glider locations, whole mission
    Overview,
    /// Ping quality over time, whole mission
    Quality,
    /// Ping timing and glider locations, within time frame of interest
    Windowed,
    /// Time between pings, within time frame of interest
    Intervals,
}

impl Chart {
    /// All charts, in generation order
    pub const ALL: [Chart; 4] = [
        Chart::Overview,
        Chart::Quality,
        Chart::Windowed,
        Chart::Intervals,
    ];

    /// Output file name (without extension) for these settings
    pub fn file_stem(&self, cfg: &Config) -> String {
        let stem = match self {
            Self::Overview => "All Ping Locations".to_string(),
            Self::Quality => "Quality of Pings".to_string(),
            Self::Windowed => format!(
                "Pings between {} and {}",
                cfg.window.start, cfg.window.end
            ),
            Self::Intervals => format!(
                "Time between Pings {} and {}",
                cfg.interval_window.start, cfg.interval_window.end
            ),
        };
        // ':' is not welcome in file names on every platform
        stem.replace(':', "-")
    }
}

impl std::fmt::Display for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Overview => f.write_str("overview"),
            Self::Quality => f.write_str("quality"),
            Self::Windowed => f.write_str("windowed"),
            Self::Intervals => f.write_str("intervals"),
        }
    }
}

fn ping_timing_and_locations(
    plot_id: &str,
    glider: &Track,
    ship: &Track,
    cfg: &Config,
    spatial_ranges: Option<((f64, f64), (f64, f64))>,
) -> Result<Plot, Error> {
    let most_recent = glider.most_recent()?;
    let threshold = cfg.threshold()?;

    let mut plot = Plot::new_stacked(
        plot_id,
        "Time of Pings",
        "Quality of Glider Pings",
        PING_RANGE,
        spatial_ranges,
        STACKED_DIMS,
    );

    let t = ship.epochs().collect::<Vec<_>>();
    plot.add_trace(Plot::new_timedomain_chart(
        "Ship Ping",
        Mode::Markers,
        MarkerSymbol::Circle,
        NamedColor::Black,
        &t,
        series::constant(t.len(), cfg.ship_offset),
    ));

    let t = glider.epochs().collect::<Vec<_>>();
    plot.add_trace(Plot::new_timedomain_chart(
        "Glider Ping",
        Mode::Markers,
        MarkerSymbol::Circle,
        NamedColor::Blue,
        &t,
        series::constant(t.len(), cfg.glider_offset),
    ));

    let (high, low) = glider.partition(cfg.location_policy, threshold);

    plot.add_trace(Plot::on_bottom_panel(Plot::new_chart(
        "High Quality Ping",
        Mode::Markers,
        MarkerSymbol::Cross,
        NamedColor::Black,
        high.longitudes().collect(),
        high.latitudes().collect::<Vec<_>>(),
    )));

    plot.add_trace(Plot::on_bottom_panel(Plot::new_chart(
        "Low Quality Ping",
        Mode::Markers,
        MarkerSymbol::Circle,
        NamedColor::Red,
        low.longitudes().collect(),
        low.latitudes().collect::<Vec<_>>(),
    )));

    plot.add_trace(Plot::on_bottom_panel(Plot::new_chart(
        "Most recent Ping",
        Mode::Markers,
        MarkerSymbol::CircleOpen,
        NamedColor::Blue,
        vec![most_recent.longitude],
        vec![most_recent.latitude],
    )));

    Ok(plot)
}

/// Ping timing (top) and glider locations (bottom), whole mission.
/// Errors with [Error::EmptySelection] on empty glider track.
pub fn overview_plot(glider: &Track, ship: &Track, cfg: &Config) -> Result<Plot, Error> {
    ping_timing_and_locations("overview", glider, ship, cfg, None)
}

/// Ping quality over time, both devices overlaid.
/// Empty tracks simply result in empty charts.
pub fn quality_plot(glider: &Track, ship: &Track) -> Plot {
    let mut plot = Plot::new_time_domain(
        "quality",
        "Quality of Pings",
        "Ping Quality",
        None,
        None,
        QUALITY_DIMS,
    );
    for (track, color) in [(ship, NamedColor::Black), (glider, NamedColor::Blue)] {
        let t = track.epochs().collect::<Vec<_>>();
        plot.add_trace(Plot::new_timedomain_chart(
            &format!("{} Ping", track.platform),
            Mode::Markers,
            MarkerSymbol::Circle,
            color,
            &t,
            track.qualities().map(u8::from).collect(),
        ));
    }
    plot
}

/// Windowed version of [overview_plot]: tracks are expected to be
/// reduced to the time frame of interest already. Spatial axes are clamped
/// to glider locations, with some margin.
/// Errors with [Error::EmptySelection] on empty glider track.
pub fn windowed_plot(glider: &Track, ship: &Track, cfg: &Config) -> Result<Plot, Error> {
    glider.most_recent()?;
    let ranges = glider.bounds().map(|((lon_min, lon_max), (lat_min, lat_max))| {
        let margin = cfg.margin_deg;
        (
            (lon_min - margin, lon_max + margin),
            (lat_min - margin, lat_max + margin),
        )
    });
    ping_timing_and_locations("windowed", glider, ship, cfg, ranges)
}

/// Minutes between pings, for both devices.
/// Y axis is clipped to the configured range,
/// X axis to the configured interval time frame.
pub fn interval_plot(glider: &Track, ship: &Track, cfg: &Config) -> Result<Plot, Error> {
    let window = cfg.interval_time_window()?;
    let mut plot = Plot::new_time_domain(
        "intervals",
        "Time between Pings",
        "Time between pings (Minutes)",
        Some((window.start, window.end)),
        Some(cfg.interval_range_minutes),
        INTERVAL_DIMS,
    );
    for (track, symbol, color) in [
        (ship, MarkerSymbol::Star, NamedColor::DarkOrange),
        (glider, MarkerSymbol::Circle, NamedColor::SteelBlue),
    ] {
        let t = track.epochs().collect::<Vec<_>>();
        plot.add_trace(Plot::new_timedomain_chart(
            &format!("{} Ping", track.platform),
            Mode::Markers,
            symbol,
            color,
            &t,
            track.intervals(),
        ));
    }
    Ok(plot)
}

/// [Report] renders all charts of one [Campaign] into a workspace
pub struct Report<'a> {
    campaign: &'a Campaign,
    workspace: PathBuf,
}

impl<'a> Report<'a> {
    pub fn new<P: AsRef<Path>>(campaign: &'a Campaign, workspace: P) -> Self {
        Self {
            campaign,
            workspace: workspace.as_ref().to_path_buf(),
        }
    }

    /// Output file path of given [Chart]
    pub fn path(&self, chart: Chart) -> PathBuf {
        self.workspace
            .join(format!("{}.html", chart.file_stem(&self.campaign.cfg)))
    }

    /// Renders one [Chart]
    pub fn render(&self, chart: Chart) -> Result<Plot, Error> {
        let Campaign { glider, ship, cfg } = self.campaign;
        match chart {
            Chart::Overview => overview_plot(glider, ship, cfg),
            Chart::Quality => Ok(quality_plot(glider, ship)),
            Chart::Windowed => {
                let (glider, ship) = self.campaign.windowed()?;
                debug!(
                    "time frame of interest: {} glider and {} ship fixes",
                    glider.len(),
                    ship.len()
                );
                windowed_plot(&glider, &ship, cfg)
            },
            Chart::Intervals => {
                let (glider, ship) = self.campaign.windowed()?;
                interval_plot(&glider, &ship, cfg)
            },
        }
    }

    /// Renders and writes all charts, in order. Stops on first error:
    /// charts generated prior that remain available.
    pub fn generate(&self) -> Result<Vec<PathBuf>, Error> {
        let mut generated = Vec::with_capacity(Chart::ALL.len());
        for chart in Chart::ALL {
            let plot = self.render(chart)?;
            let path = self.path(chart);
            plot.write_html(&path)?;
            generated.push(path);
        }
        info!("{} charts generated", generated.len());
        Ok(generated)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn file_names() {
        let cfg = Config::default();
        assert_eq!(Chart::Overview.file_stem(&cfg), "All Ping Locations");
        assert_eq!(Chart::Quality.file_stem(&cfg), "Quality of Pings");
        assert_eq!(
            Chart::Windowed.file_stem(&cfg),
            "Pings between 2024-02-13 and 2024-02-25"
        );
        assert_eq!(
            Chart::Intervals.file_stem(&cfg),
            "Time between Pings 2024-02-15 and 2024-02-25"
        );
        let cfg = cfg.with_window("2024-02-13 06:00", "2024-02-14");
        assert_eq!(
            Chart::Windowed.file_stem(&cfg),
            "Pings between 2024-02-13 06-00 and 2024-02-14"
        );
    }
}

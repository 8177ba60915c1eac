//! Plotly charts, rendered as standalone HTML.
use std::path::Path;

use hifitime::Epoch;
use log::info;

pub use plotly::color::NamedColor;
pub use plotly::common::{MarkerSymbol, Mode};

use plotly::{
    common::{HoverInfo, Marker, Title},
    layout::{Axis, AxisType},
    Layout, Plot as Plotly, Scatter, Trace,
};

use serde::Serialize;

use crate::epoch::format_iso;

/// Date labels are slightly rotated, for readability
const DATE_TICK_ANGLE: f64 = 15.0;

pub struct Plot {
    plotly: Plotly,
    plot_id: String,
}

fn date_axis(title: &str, range: Option<(Epoch, Epoch)>) -> Axis {
    let axis = Axis::new()
        .title(Title::with_text(title))
        .type_(AxisType::Date)
        .tick_angle(DATE_TICK_ANGLE)
        .show_grid(true);
    match range {
        Some((start, end)) => axis.range(vec![format_iso(start), format_iso(end)]),
        None => axis,
    }
}

fn value_axis(title: &str, range: Option<(f64, f64)>) -> Axis {
    let axis = Axis::new().title(Title::with_text(title)).show_grid(true);
    match range {
        Some((min, max)) => axis.range(vec![min, max]),
        None => axis,
    }
}

impl Plot {
    /// Adds one [Trace] to self
    pub fn add_trace(&mut self, t: Box<dyn Trace>) {
        self.plotly.add_trace(t);
    }
    /// Plot identifier
    pub fn plot_id(&self) -> &str {
        &self.plot_id
    }
    /// Builds new standardized 1D Time domain plot
    pub fn new_time_domain(
        plot_id: &str,
        title: &str,
        y_axis_label: &str,
        x_range: Option<(Epoch, Epoch)>,
        y_range: Option<(f64, f64)>,
        dims: (usize, usize),
    ) -> Self {
        let layout = Layout::new()
            .title(Title::with_text(title))
            .x_axis(date_axis("Date", x_range))
            .y_axis(value_axis(y_axis_label, y_range))
            .show_legend(true)
            .width(dims.0)
            .height(dims.1);
        let mut plotly = Plotly::new();
        plotly.set_layout(layout);
        Self {
            plotly,
            plot_id: plot_id.to_string(),
        }
    }
    /// Builds a two panel plot.
    /// Top panel (x, y) is a time domain panel, with fixed Y range.
    /// Bottom panel (x2, y2) is a map of fix locations, in decimal degrees.
    /// Traces are routed to the bottom panel with [Self::on_bottom_panel].
    pub fn new_stacked(
        plot_id: &str,
        top_title: &str,
        bottom_title: &str,
        top_y_range: (f64, f64),
        bottom_ranges: Option<((f64, f64), (f64, f64))>,
        dims: (usize, usize),
    ) -> Self {
        let (lon_range, lat_range) = match bottom_ranges {
            Some((lon, lat)) => (Some(lon), Some(lat)),
            None => (None, None),
        };
        let layout = Layout::new()
            .title(Title::with_text(&format!("{} / {}", top_title, bottom_title)))
            .x_axis(date_axis("Date", None).domain(&[0.0, 1.0]).anchor("y"))
            .y_axis(
                value_axis("", Some(top_y_range))
                    .domain(&[0.58, 1.0])
                    .anchor("x")
                    .show_tick_labels(false),
            )
            .x_axis2(
                value_axis("Longitude [°]", lon_range)
                    .domain(&[0.0, 1.0])
                    .anchor("y2"),
            )
            .y_axis2(
                value_axis("Latitude [°]", lat_range)
                    .domain(&[0.0, 0.42])
                    .anchor("x2"),
            )
            .show_legend(true)
            .width(dims.0)
            .height(dims.1);
        let mut plotly = Plotly::new();
        plotly.set_layout(layout);
        Self {
            plotly,
            plot_id: plot_id.to_string(),
        }
    }
    /// Routes a chart to the bottom panel of a stacked plot
    pub fn on_bottom_panel<X: Serialize + Clone + 'static, Y: Serialize + Clone + 'static>(
        chart: Box<Scatter<X, Y>>,
    ) -> Box<Scatter<X, Y>> {
        chart.x_axis("x2").y_axis("y2")
    }
    /// Builds new standardized Time domain chart, to be stacked
    /// on a Time domain plot.
    pub fn new_timedomain_chart<Y: Clone + Default + Serialize + 'static>(
        chart_id: &str,
        mode: Mode,
        symbol: MarkerSymbol,
        color: NamedColor,
        t: &[Epoch],
        y: Vec<Y>,
    ) -> Box<Scatter<String, Y>> {
        let txt = t.iter().map(|t| format_iso(*t)).collect::<Vec<_>>();
        Scatter::new(txt.clone(), y)
            .name(chart_id)
            .mode(mode)
            .hover_text_array(txt)
            .hover_info(HoverInfo::All)
            .marker(Marker::new().symbol(symbol).color(color))
    }
    /// Builds new 2D chart
    pub fn new_chart<Y: Clone + Default + Serialize + 'static>(
        chart_id: &str,
        mode: Mode,
        symbol: MarkerSymbol,
        color: NamedColor,
        x: Vec<f64>,
        y: Vec<Y>,
    ) -> Box<Scatter<f64, Y>> {
        Scatter::new(x, y)
            .name(chart_id)
            .mode(mode)
            .marker(Marker::new().symbol(symbol).color(color).size(8))
    }
    /// Serializes self (traces and layout) as JSON
    pub fn to_json(&self) -> String {
        self.plotly.to_json()
    }
    /// Renders self as standalone HTML
    pub fn to_html(&self) -> String {
        self.plotly.to_html()
    }
    /// Renders and writes self to given file
    pub fn write_html<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_html())?;
        info!("{} plot generated: \"{}\"", self.plot_id, path.display());
        Ok(())
    }
}

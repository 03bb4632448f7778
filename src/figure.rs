//! Figure and axes state, and rendering through plotters.
//!
//! A [`Figure`] is the drawing context the plotting helpers work on: a grid
//! of [`Axes`] panels plus the one currently selected. Nothing is drawn until
//! [`Figure::show`] renders the whole figure to an [`Output`].

use std::path::{Path, PathBuf};

use ndarray::Array2;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{debug, info};

use crate::colormap;
use crate::error::{PlotError, Result};

/// Pixel size of a figure created with [`Figure::new`].
pub const DEFAULT_SIZE: (u32, u32) = (1200, 800);

const DEFAULT_MARGIN: u32 = 30;
const TIGHT_MARGIN: u32 = 12;
const COLORBAR_WIDTH: u32 = 110;
const AUTOSCALE_PAD: f64 = 0.05;
// Largest axis magnitude handed to plotters. Keeps `hi - lo` finite.
const LIMIT_MAGNITUDE: f64 = 1e300;

// Line colors, cycled per panel in the order artists were added.
const PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub points: Vec<(f64, f64)>,
    pub label: Option<String>,
}

/// Point cloud, color-mapped when `values` is present.
#[derive(Debug, Clone, PartialEq)]
pub struct Scatter {
    pub points: Vec<(f64, f64)>,
    pub values: Option<Vec<f64>>,
    pub label: Option<String>,
}

/// Grid of scalar values spread over a rectangle, row 0 at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatMap {
    pub x_extent: (f64, f64),
    pub y_extent: (f64, f64),
    pub grid: Array2<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Artist {
    Line(Line),
    Scatter(Scatter),
    HeatMap(HeatMap),
}

impl Artist {
    fn label(&self) -> Option<&str> {
        match self {
            Artist::Line(line) => line.label.as_deref(),
            Artist::Scatter(scatter) => scatter.label.as_deref(),
            Artist::HeatMap(_) => None,
        }
    }

    /// Value range of the color mapping, if this artist has one.
    fn mapped_range(&self) -> Option<(f64, f64)> {
        match self {
            Artist::Line(_) => None,
            Artist::Scatter(scatter) => scatter
                .values
                .as_ref()
                .and_then(|values| finite_bounds(values.iter().copied())),
            Artist::HeatMap(map) => finite_bounds(map.grid.iter().copied()),
        }
    }

    fn extend_bounds(&self, x: &mut Option<(f64, f64)>, y: &mut Option<(f64, f64)>) {
        match self {
            Artist::Line(Line { points, .. }) | Artist::Scatter(Scatter { points, .. }) => {
                for &(px, py) in points {
                    if px.is_finite() && py.is_finite() {
                        *x = Some(include(*x, px));
                        *y = Some(include(*y, py));
                    }
                }
            }
            Artist::HeatMap(map) => {
                for v in [map.x_extent.0, map.x_extent.1] {
                    if v.is_finite() {
                        *x = Some(include(*x, v));
                    }
                }
                for v in [map.y_extent.0, map.y_extent.1] {
                    if v.is_finite() {
                        *y = Some(include(*y, v));
                    }
                }
            }
        }
    }
}

/// One chart panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Axes {
    artists: Vec<Artist>,
    xlim: Option<(f64, f64)>,
    ylim: Option<(f64, f64)>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    title: Option<String>,
    legend: bool,
    colorbar: Option<(f64, f64)>,
}

impl Axes {
    pub fn plot<I>(&mut self, points: I, label: Option<&str>)
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.artists.push(Artist::Line(Line {
            points: points.into_iter().collect(),
            label: label.map(str::to_string),
        }));
    }

    pub fn scatter(&mut self, points: Vec<(f64, f64)>, values: Option<Vec<f64>>, label: Option<&str>) {
        self.artists.push(Artist::Scatter(Scatter {
            points,
            values,
            label: label.map(str::to_string),
        }));
    }

    pub fn heatmap(&mut self, x_extent: (f64, f64), y_extent: (f64, f64), grid: Array2<f64>) {
        self.artists.push(Artist::HeatMap(HeatMap {
            x_extent,
            y_extent,
            grid,
        }));
    }

    pub fn set_xlim(&mut self, lo: f64, hi: f64) {
        self.xlim = Some((lo, hi));
    }

    pub fn set_ylim(&mut self, lo: f64, hi: f64) {
        self.ylim = Some((lo, hi));
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = Some(label.into());
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = Some(label.into());
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Request a legend for the labelled artists on this panel.
    pub fn legend(&mut self) {
        self.legend = true;
    }

    /// Attach a color scale for the most recently added color-mapped artist.
    pub fn colorbar(&mut self) -> Result<()> {
        let range = self
            .artists
            .iter()
            .rev()
            .find_map(Artist::mapped_range)
            .ok_or(PlotError::NoColorMapping)?;
        self.colorbar = Some(range);
        Ok(())
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn xlim(&self) -> Option<(f64, f64)> {
        self.xlim
    }

    pub fn ylim(&self) -> Option<(f64, f64)> {
        self.ylim
    }

    pub fn xlabel(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }

    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn has_legend(&self) -> bool {
        self.legend
    }

    pub fn colorbar_range(&self) -> Option<(f64, f64)> {
        self.colorbar
    }

    pub fn labels(&self) -> Vec<&str> {
        self.artists.iter().filter_map(Artist::label).collect()
    }

    /// Axis ranges used for drawing: explicit limits, else padded data bounds.
    ///
    /// Explicit limits with a non-finite end are ignored in favour of the data.
    pub fn view_limits(&self) -> ((f64, f64), (f64, f64)) {
        let mut x_bounds = None;
        let mut y_bounds = None;
        for artist in &self.artists {
            artist.extend_bounds(&mut x_bounds, &mut y_bounds);
        }

        let x = explicit_limits("x", self.xlim).unwrap_or_else(|| autoscale(x_bounds));
        let y = explicit_limits("y", self.ylim).unwrap_or_else(|| autoscale(y_bounds));
        (x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Where [`Figure::show`] renders to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    path: PathBuf,
    format: ImageFormat,
}

impl Output {
    pub fn new(path: impl Into<PathBuf>, format: ImageFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn png(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ImageFormat::Png)
    }

    pub fn svg(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ImageFormat::Svg)
    }

    /// Pick the format from the file extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let format = match extension.as_str() {
            "png" => ImageFormat::Png,
            "svg" => ImageFormat::Svg,
            _ => return Err(PlotError::unsupported_format(extension)),
        };
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

/// A grid of panels with one current panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    size: (u32, u32),
    rows: usize,
    cols: usize,
    axes: Vec<Axes>,
    current: usize,
    tight: bool,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    /// Single-panel figure of [`DEFAULT_SIZE`].
    pub fn new() -> Self {
        Self::subplots(1, 1, DEFAULT_SIZE)
    }

    /// `rows` x `cols` panels, row-major. The first panel is current.
    pub fn subplots(rows: usize, cols: usize, size: (u32, u32)) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            size,
            rows,
            cols,
            axes: vec![Axes::default(); rows * cols],
            current: 0,
            tight: false,
        }
    }

    /// The current panel.
    pub fn gca(&mut self) -> &mut Axes {
        &mut self.axes[self.current]
    }

    /// Make panel `index` current. Returns false if there is no such panel.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.axes.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn panels(&self) -> &[Axes] {
        &self.axes
    }

    pub fn panels_mut(&mut self) -> &mut [Axes] {
        &mut self.axes
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn grid(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Shrink panel margins so neighbouring panels do not overlap.
    pub fn tight_layout(&mut self) {
        self.tight = true;
    }

    pub fn is_tight(&self) -> bool {
        self.tight
    }

    /// Render the figure to `output`, creating parent directories as needed.
    pub fn show(&self, output: &Output) -> Result<()> {
        if let Some(parent) = output.path().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        match output.format() {
            ImageFormat::Png => {
                self.render(BitMapBackend::new(output.path(), self.size).into_drawing_area())?
            }
            ImageFormat::Svg => {
                self.render(SVGBackend::new(output.path(), self.size).into_drawing_area())?
            }
        }

        info!(path = %output.path().display(), "figure written");
        Ok(())
    }

    /// Render the figure as an SVG document in memory.
    pub fn to_svg_string(&self) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            self.render(root)?;
        }
        Ok(svg)
    }

    fn render<DB: DrawingBackend>(&self, root: DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE)?;

        let margin = if self.tight { TIGHT_MARGIN } else { DEFAULT_MARGIN };
        let areas = root.split_evenly((self.rows, self.cols));
        for (area, axes) in areas.iter().zip(&self.axes) {
            draw_axes(area, axes, margin)?;
        }

        root.present()?;
        Ok(())
    }
}

fn draw_axes<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, axes: &Axes, margin: u32) -> Result<()> {
    let ((x0, x1), (y0, y1)) = axes.view_limits();
    debug!(x0, x1, y0, y1, "drawing panel");

    let plot_area = match axes.colorbar_range() {
        Some(range) => {
            let (width, _) = area.dim_in_pixel();
            let split = width.saturating_sub(COLORBAR_WIDTH) as i32;
            let (plot_area, bar_area) = area.split_horizontally(split);
            colormap::draw_colorbar(&bar_area, range, margin, axes.title().is_some())?;
            plot_area
        }
        None => area.clone(),
    };

    let mut builder = ChartBuilder::on(&plot_area);
    builder.margin(margin).x_label_area_size(50).y_label_area_size(70);
    if let Some(title) = axes.title() {
        builder.caption(title, ("sans-serif", 24));
    }
    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .label_style(("sans-serif", 16))
            .axis_desc_style(("sans-serif", 18));
        if let Some(label) = axes.xlabel() {
            mesh.x_desc(label);
        }
        if let Some(label) = axes.ylabel() {
            mesh.y_desc(label);
        }
        mesh.draw()?;
    }

    let mut next_color = 0;
    for artist in axes.artists() {
        match artist {
            Artist::Line(line) => {
                let color = PALETTE[next_color % PALETTE.len()];
                next_color += 1;

                let anno = chart.draw_series(LineSeries::new(
                    line.points
                        .iter()
                        .copied()
                        .filter(|&(x, y)| x.is_finite() && y.is_finite()),
                    color.stroke_width(2),
                ))?;
                if let Some(label) = &line.label {
                    anno.label(label.as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                }
            }
            Artist::Scatter(scatter) => {
                let color = PALETTE[next_color % PALETTE.len()];
                next_color += 1;

                let range = artist.mapped_range();
                let anno = chart.draw_series(
                    scatter
                        .points
                        .iter()
                        .enumerate()
                        .filter(|(_, p)| p.0.is_finite() && p.1.is_finite())
                        .map(|(i, &p)| {
                            let value = scatter.values.as_ref().and_then(|values| values.get(i));
                            let style = match (range, value) {
                                (Some(range), Some(&v)) => {
                                    colormap::color_at(colormap::normalize(v, range)).filled()
                                }
                                _ => color.filled(),
                            };
                            Circle::new(p, 4, style)
                        }),
                )?;
                if let Some(label) = &scatter.label {
                    anno.label(label.as_str())
                        .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
                }
            }
            Artist::HeatMap(map) => {
                let Some(range) = artist.mapped_range() else {
                    debug!("heat map has no finite values, skipped");
                    continue;
                };
                let (rows, cols) = map.grid.dim();
                if rows == 0 || cols == 0 {
                    continue;
                }
                let dx = (map.x_extent.1 - map.x_extent.0) / cols as f64;
                let dy = (map.y_extent.1 - map.y_extent.0) / rows as f64;
                if !dx.is_finite() || !dy.is_finite() {
                    debug!("heat map extent is not finite, skipped");
                    continue;
                }

                chart.draw_series(
                    map.grid
                        .indexed_iter()
                        .filter(|(_, v)| v.is_finite())
                        .map(|((r, c), &v)| {
                            let left = map.x_extent.0 + c as f64 * dx;
                            let bottom = map.y_extent.0 + r as f64 * dy;
                            Rectangle::new(
                                [(left, bottom), (left + dx, bottom + dy)],
                                colormap::color_at(colormap::normalize(v, range)).filled(),
                            )
                        }),
                )?;
            }
        }
    }

    if axes.has_legend() {
        if axes.labels().is_empty() {
            debug!("legend requested but no artist carries a label");
        } else {
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .label_font(("sans-serif", 16))
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }
    }

    Ok(())
}

fn include(bounds: Option<(f64, f64)>, v: f64) -> (f64, f64) {
    match bounds {
        Some((lo, hi)) => (lo.min(v), hi.max(v)),
        None => (v, v),
    }
}

fn finite_bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |bounds, v| Some(include(bounds, v)))
}

/// Clamp a finite range into [`LIMIT_MAGNITUDE`] and widen it if zero-width,
/// so plotters can map it to pixels.
pub(crate) fn nonsingular((lo, hi): (f64, f64)) -> (f64, f64) {
    let lo = lo.clamp(-LIMIT_MAGNITUDE, LIMIT_MAGNITUDE);
    let hi = hi.clamp(-LIMIT_MAGNITUDE, LIMIT_MAGNITUDE);
    if lo == hi {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

fn explicit_limits(axis: &str, limits: Option<(f64, f64)>) -> Option<(f64, f64)> {
    let (lo, hi) = limits?;
    if lo.is_finite() && hi.is_finite() {
        Some(nonsingular((lo, hi)))
    } else {
        debug!(axis, lo, hi, "ignoring non-finite axis limits");
        None
    }
}

fn autoscale(bounds: Option<(f64, f64)>) -> (f64, f64) {
    match bounds {
        None => (0.0, 1.0),
        Some(bounds) => {
            let (lo, hi) = nonsingular(bounds);
            let pad = (hi - lo) * AUTOSCALE_PAD;
            (lo - pad, hi + pad)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util;
    use ndarray::array;

    #[test]
    fn test_colorbar_requires_color_mapping() {
        let mut figure = Figure::new();
        figure.gca().plot(vec![(0.0, 1.0), (1.0, 2.0)], Some("line"));
        figure.gca().scatter(vec![(0.5, 0.5)], None, Some("plain"));

        let err = figure.gca().colorbar().unwrap_err();
        assert!(matches!(err, PlotError::NoColorMapping));
        assert_eq!(figure.gca().colorbar_range(), None);
    }

    #[test]
    fn test_colorbar_uses_latest_mapping() {
        let mut figure = Figure::new();
        figure
            .gca()
            .heatmap((0.0, 1.0), (0.0, 1.0), array![[0.0, 1.0], [2.0, 3.0]]);
        figure.gca().scatter(
            vec![(0.1, 0.1), (0.2, 0.2), (0.3, 0.3)],
            Some(vec![-4.0, f64::NAN, 6.0]),
            None,
        );

        figure.gca().colorbar().unwrap();
        assert_eq!(figure.gca().colorbar_range(), Some((-4.0, 6.0)));
    }

    #[test]
    fn test_view_limits_autoscale() {
        let mut axes = Axes::default();
        assert_eq!(axes.view_limits(), ((0.0, 1.0), (0.0, 1.0)));

        axes.plot(vec![(0.0, 10.0), (100.0, 20.0), (f64::NAN, 1e9)], None);
        let ((x0, x1), (y0, y1)) = axes.view_limits();
        assert!((x0 + 5.0).abs() < 1e-9 && (x1 - 105.0).abs() < 1e-9);
        assert!((y0 - 9.5).abs() < 1e-9 && (y1 - 20.5).abs() < 1e-9);

        axes.set_xlim(0.0, 200.0);
        axes.set_ylim(3.0, 3.0);
        assert_eq!(axes.view_limits(), ((0.0, 200.0), (2.5, 3.5)));
    }

    #[test]
    fn test_view_limits_ignore_infinite_explicit() {
        let mut axes = Axes::default();
        axes.plot(vec![(0.0, 1.0), (10.0, 3.0)], Some("costCurrent"));
        axes.set_ylim(0.0, f64::INFINITY);
        axes.set_xlim(f64::NAN, 5.0);

        let ((x0, x1), (y0, y1)) = axes.view_limits();
        assert!((x0 + 0.5).abs() < 1e-9 && (x1 - 10.5).abs() < 1e-9);
        assert!((y0 - 0.9).abs() < 1e-9 && (y1 - 3.1).abs() < 1e-9);
    }

    #[test]
    fn test_view_limits_extreme_data_stay_finite() {
        let mut axes = Axes::default();
        axes.plot(vec![(0.0, f64::MAX), (1.0, -f64::MAX)], None);
        let ((x0, x1), (y0, y1)) = axes.view_limits();
        assert!((x0 + 0.05).abs() < 1e-9 && (x1 - 1.05).abs() < 1e-9);
        assert!(y0.is_finite() && y1.is_finite() && (y1 - y0).is_finite());
        assert!(y0 < -1e299 && y1 > 1e299);

        let mut axes = Axes::default();
        axes.set_xlim(-f64::MAX, f64::MAX);
        let ((x0, x1), _) = axes.view_limits();
        assert!((x1 - x0).is_finite());
    }

    #[test]
    fn test_extreme_limits_render() {
        if !test_util::fonts_available() {
            return;
        }
        let mut figure = Figure::new();
        figure.gca().plot(vec![(0.0, f64::MAX), (1.0, -f64::MAX)], Some("sCurrent"));
        figure.gca().legend();
        assert!(figure.to_svg_string().is_ok());

        let mut figure = Figure::new();
        figure.gca().plot(vec![(0.0, 1.0), (1.0, 2.0)], Some("sBest"));
        figure.gca().set_ylim(0.0, f64::INFINITY);
        assert!(figure.to_svg_string().is_ok());
    }

    #[test]
    fn test_labels_skip_unlabelled() {
        let mut axes = Axes::default();
        axes.plot(vec![(0.0, 0.0)], None);
        axes.plot(vec![(0.0, 0.0)], Some("sBest"));
        axes.heatmap((0.0, 1.0), (0.0, 1.0), array![[1.0]]);
        assert_eq!(axes.labels(), vec!["sBest"]);
    }

    #[test]
    fn test_output_from_path() {
        assert_eq!(Output::from_path("a/b.PNG").unwrap().format(), ImageFormat::Png);
        assert_eq!(Output::from_path("plot.svg").unwrap().format(), ImageFormat::Svg);

        let err = Output::from_path("plot.gif").unwrap_err();
        assert!(matches!(err, PlotError::UnsupportedFormat { ref extension } if extension == "gif"));
        assert!(Output::from_path("plot").is_err());
    }

    #[test]
    fn test_subplots_layout() {
        let mut figure = Figure::subplots(1, 2, (1200, 600));
        assert_eq!(figure.grid(), (1, 2));
        assert_eq!(figure.panels().len(), 2);
        assert!(figure.set_current(1));
        assert!(!figure.set_current(2));

        figure.gca().set_title("right");
        assert_eq!(figure.panels()[1].title(), Some("right"));
        assert_eq!(figure.panels()[0].title(), None);
    }

    #[test]
    fn test_render_is_repeatable() {
        if !test_util::fonts_available() {
            return;
        }
        let mut figure = Figure::new();
        figure.gca().plot(vec![(0.0, 3.0), (1.0, 2.0), (2.0, 1.0)], Some("costCurrent"));
        figure.gca().set_title("Repeat");
        figure.gca().legend();

        let first = figure.to_svg_string().unwrap();
        let second = figure.to_svg_string().unwrap();
        assert_eq!(first, second);
        assert!(first.contains("costCurrent"));
        assert!(first.contains("Repeat"));
    }
}

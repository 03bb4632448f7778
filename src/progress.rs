//! Progress plots for optimization runs.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::figure::{Figure, ImageFormat, Output};
use crate::options::PlotOptions;
use crate::results::{Results, RunSeries};

/// Algorithm plotted when the caller does not pick one.
pub const DEFAULT_ALGORITHM: &str = "RW";

/// Upper end of the iteration axis when the caller does not pick one.
pub const DEFAULT_ITERATIONS: usize = 200;

/// Pixel size of the state/cost subplot pair.
pub const SINGLE_RUN_SIZE: (u32, u32) = (1200, 600);

/// Apply `options` to the current panel, enable its legend and show the figure.
pub fn configure_and_show(figure: &mut Figure, options: &PlotOptions, output: &Output) -> Result<()> {
    configure(figure, options, false)?;
    figure.show(output)
}

/// Like [`configure_and_show`], optionally adding a color bar first.
///
/// Fails with [`crate::PlotError::NoColorMapping`] before anything is written
/// when `colorbar` is set and the current panel has no color-mapped artist.
pub fn configure_and_show_with_colorbar(
    figure: &mut Figure,
    options: &PlotOptions,
    colorbar: bool,
    output: &Output,
) -> Result<()> {
    configure(figure, options, colorbar)?;
    figure.show(output)
}

fn configure(figure: &mut Figure, options: &PlotOptions, colorbar: bool) -> Result<()> {
    let axes = figure.gca();
    options.apply(axes);
    if colorbar {
        axes.colorbar()?;
    }
    axes.legend();
    Ok(())
}

/// Build the state (left) and cost (right) panels for one run.
pub fn single_run_figure(series: &RunSeries, algorithm: &str, num_iterations: usize) -> Figure {
    let mut figure = Figure::subplots(1, 2, SINGLE_RUN_SIZE);

    if let [left, right] = figure.panels_mut() {
        left.plot(series.against_iterations(&series.s_current), Some("sCurrent"));
        left.plot(series.against_iterations(&series.s_best), Some("sBest"));
        left.set_xlim(0.0, num_iterations as f64);
        left.set_xlabel("Iteration");
        left.set_ylabel("s Values");
        left.set_title(format!("{} Algorithm Single Run", algorithm));
        left.legend();

        right.plot(series.against_iterations(&series.cost_current), Some("costCurrent"));
        right.plot(series.against_iterations(&series.cost_best), Some("costBest"));
        right.set_xlim(0.0, num_iterations as f64);
        right.set_xlabel("Iteration");
        right.set_ylabel("Cost Values");
        right.set_title(format!("{} Algorithm Single Run - Cost Function", algorithm));
        right.legend();
    }

    figure.tight_layout();
    figure
}

/// Plot the first run of `algorithm` as a state/cost subplot pair.
pub fn plot_single_run(results: &Results, algorithm: &str, num_iterations: usize, output: &Output) -> Result<()> {
    let series = RunSeries::extract(results, algorithm)?;
    debug!(algorithm, points = series.len(), "extracted run series");
    single_run_figure(&series, algorithm, num_iterations).show(output)
}

/// Write one single-run figure per algorithm into `out_dir`.
///
/// Every key is extracted before anything is rendered. Figures are then
/// rendered in parallel. Returns the written paths in sorted key order.
pub fn plot_all_runs(
    results: &Results,
    num_iterations: usize,
    out_dir: &Path,
    format: ImageFormat,
) -> Result<Vec<PathBuf>> {
    let mut keys: Vec<&str> = results.keys().map(String::as_str).collect();
    keys.sort_unstable();

    let jobs = keys
        .iter()
        .map(|&key| -> Result<_> {
            let series = RunSeries::extract(results, key)?;
            let file_name = format!("{}_single_run.{}", file_stem(key), format.extension());
            Ok((key, series, Output::new(out_dir.join(file_name), format)))
        })
        .collect::<Result<Vec<_>>>()?;

    std::fs::create_dir_all(out_dir)?;

    let progress_bar = ProgressBar::new(jobs.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );

    let paths = jobs
        .par_iter()
        .map(|(key, series, output)| -> Result<PathBuf> {
            single_run_figure(series, key, num_iterations).show(output)?;
            progress_bar.inc(1);
            Ok(output.path().to_path_buf())
        })
        .collect::<Result<Vec<_>>>()?;

    progress_bar.finish_with_message("done");
    info!(count = paths.len(), dir = %out_dir.display(), "single-run figures written");
    Ok(paths)
}

// Keep algorithm tags usable as file names.
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

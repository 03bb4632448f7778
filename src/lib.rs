//! Progress plots for iterative optimization runs.
//!
//! Optimizers record each run as rows of `(iteration, current state, best
//! state, current cost, best cost)`. This crate turns those records into
//! `plotters` charts.

pub mod colormap;
pub mod error;
pub mod figure;
pub mod options;
pub mod progress;
pub mod results;
pub mod synthetic;

#[cfg(test)]
mod test_util;

pub use error::{PlotError, Result};
pub use figure::{Axes, Figure, ImageFormat, Output};
pub use options::PlotOptions;
pub use progress::{
    configure_and_show, configure_and_show_with_colorbar, plot_all_runs, plot_single_run,
    single_run_figure, DEFAULT_ALGORITHM, DEFAULT_ITERATIONS,
};
pub use results::{Field, Results, RunSeries, FIELD_COUNT};

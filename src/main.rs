//! optim-plots - render progress plots for synthetic optimization runs.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use optim_plots::synthetic::{cost_surface, synthetic_results, DEMO_ALGORITHMS};
use optim_plots::{
    configure_and_show_with_colorbar, plot_all_runs, plot_single_run, Figure, ImageFormat, Output,
    PlotOptions, DEFAULT_ALGORITHM, DEFAULT_ITERATIONS,
};

const LANDSCAPE_EXTENT: (f64, f64) = (-3.0, 3.0);

#[derive(Parser, Debug)]
#[command(name = "optim-plots")]
#[command(about = "Progress plots for iterative optimization runs", long_about = None)]
struct Args {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plot state and cost of the first run of one algorithm
    SingleRun {
        #[arg(long, default_value = DEFAULT_ALGORITHM)]
        algorithm: String,

        /// Upper end of the iteration axis, also the trace length
        #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,

        #[arg(long, default_value_t = 1)]
        runs: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output image, .png or .svg
        #[arg(long, default_value = "figures/single_run.png")]
        output: PathBuf,
    },
    /// Plot every algorithm into a directory
    All {
        #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,

        #[arg(long, default_value = "figures")]
        out_dir: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Png)]
        format: Format,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Heat map of a cost landscape
    Landscape {
        #[arg(long, default_value = "figures/landscape.png")]
        output: PathBuf,

        /// Draw a color scale next to the heat map
        #[arg(long)]
        colorbar: bool,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, default_value_t = 60)]
        resolution: usize,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Png,
    Svg,
}

impl From<Format> for ImageFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Png => ImageFormat::Png,
            Format::Svg => ImageFormat::Svg,
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::SingleRun {
            algorithm,
            iterations,
            runs,
            seed,
            output,
        } => {
            let output = Output::from_path(output)?;
            let results = synthetic_results(&DEMO_ALGORITHMS, runs, iterations, seed);

            println!("Generating {} single run plot...", algorithm);
            plot_single_run(&results, &algorithm, iterations, &output)?;
            println!("Plot saved as '{}'", output.path().display());
        }
        Command::All {
            iterations,
            out_dir,
            format,
            seed,
        } => {
            let results = synthetic_results(&DEMO_ALGORITHMS, 1, iterations, seed);

            println!("Generating single run plots for {} algorithms...", results.len());
            let paths = plot_all_runs(&results, iterations, &out_dir, format.into())?;
            for path in paths {
                println!("Plot saved as '{}'", path.display());
            }
        }
        Command::Landscape {
            output,
            colorbar,
            title,
            resolution,
        } => {
            let output = Output::from_path(output)?;

            let mut figure = Figure::new();
            let axes = figure.gca();
            axes.heatmap(LANDSCAPE_EXTENT, LANDSCAPE_EXTENT, cost_surface(resolution, LANDSCAPE_EXTENT));
            axes.scatter(vec![(0.0, 0.0)], None, Some("origin"));

            let options = PlotOptions::new()
                .with_xlim(LANDSCAPE_EXTENT.0, LANDSCAPE_EXTENT.1)
                .with_ylim(LANDSCAPE_EXTENT.0, LANDSCAPE_EXTENT.1)
                .with_xlabel("x")
                .with_ylabel("y")
                .with_title(title.unwrap_or_else(|| "Cost Landscape".to_string()));

            println!("Generating cost landscape plot...");
            configure_and_show_with_colorbar(&mut figure, &options, colorbar, &output)?;
            println!("Plot saved as '{}'", output.path().display());
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(args.command) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

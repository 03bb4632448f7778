//! Helpers shared by the unit tests.

use std::sync::OnceLock;

use crate::figure::Figure;
use crate::options::PlotOptions;

/// Whether plotters can lay out text on this machine.
///
/// Rendering needs a system sans-serif font. Tests that draw figures return
/// early without one.
pub(crate) fn fonts_available() -> bool {
    static AVAILABLE: OnceLock<bool> = OnceLock::new();
    *AVAILABLE.get_or_init(|| {
        let mut figure = Figure::new();
        figure.gca().set_title("font check");
        let ok = figure.to_svg_string().is_ok();
        if !ok {
            eprintln!("no usable sans-serif font, skipping rendering checks");
        }
        ok
    })
}

/// Bit 0 x range, 1 y range, 2 x label, 3 y label, 4 title.
pub(crate) fn options_from_mask(mask: u32) -> PlotOptions {
    let mut options = PlotOptions::new();
    if mask & 1 != 0 {
        options = options.with_xlim(0.0, 200.0);
    }
    if mask & 2 != 0 {
        options = options.with_ylim(-1.0, 1.0);
    }
    if mask & 4 != 0 {
        options = options.with_xlabel("Iteration");
    }
    if mask & 8 != 0 {
        options = options.with_ylabel("Cost");
    }
    if mask & 16 != 0 {
        options = options.with_title("Random Walk");
    }
    options
}

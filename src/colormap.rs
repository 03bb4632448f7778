//! Scalar-to-color mapping shared by color-mapped artists and the color bar.

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::Result;
use crate::figure::nonsingular;

const COLORBAR_STEPS: usize = 100;

/// Map `t` in `[0, 1]` from blue (low) to red (high).
pub fn color_at(t: f64) -> HSLColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    HSLColor(0.7 * (1.0 - t), 0.85, 0.5)
}

/// Position of `value` inside `range`, clamped to `[0, 1]`.
pub fn normalize(value: f64, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.5
    }
}

/// Draw a vertical gradient strip labelled with the values of `range`.
pub fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    range: (f64, f64),
    margin: u32,
    titled: bool,
) -> Result<()> {
    let (lo, hi) = nonsingular(range);
    // Line the strip up with the plotting area next to it.
    let top = if titled { margin + 34 } else { margin };

    let mut bar = ChartBuilder::on(area)
        .margin(margin)
        .margin_top(top)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..1.0, lo..hi)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .label_style(("sans-serif", 14))
        .draw()?;

    let step = (hi - lo) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let bottom = lo + i as f64 * step;
        let t = (i as f64 + 0.5) / COLORBAR_STEPS as f64;
        Rectangle::new([(0.0, bottom), (1.0, bottom + step)], color_at(t).filled())
    }))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_clamps() {
        assert_eq!(normalize(5.0, (0.0, 10.0)), 0.5);
        assert_eq!(normalize(-1.0, (0.0, 10.0)), 0.0);
        assert_eq!(normalize(11.0, (0.0, 10.0)), 1.0);
        assert_eq!(normalize(3.0, (3.0, 3.0)), 0.5);
    }

    #[test]
    fn test_color_ends_differ() {
        let low = color_at(0.0);
        let high = color_at(1.0);
        assert!(low.0 > high.0);
        assert_eq!(color_at(f64::NAN).0, color_at(0.5).0);
    }
}

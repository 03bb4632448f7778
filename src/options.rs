//! Optional display settings applied to the current panel.

use tracing::debug;

use crate::figure::Axes;

/// Axis ranges, labels and title. Absent fields leave the panel untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotOptions {
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub title: Option<String>,
}

impl PlotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_xlim(mut self, lo: f64, hi: f64) -> Self {
        self.xlim = Some((lo, hi));
        self
    }

    pub fn with_ylim(mut self, lo: f64, hi: f64) -> Self {
        self.ylim = Some((lo, hi));
        self
    }

    pub fn with_xlabel(mut self, label: impl Into<String>) -> Self {
        self.xlabel = Some(label.into());
        self
    }

    pub fn with_ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = Some(label.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Apply the present options: x range, y range, x label, y label, title.
    pub fn apply(&self, axes: &mut Axes) {
        if let Some((lo, hi)) = self.xlim {
            axes.set_xlim(lo, hi);
        }
        if let Some((lo, hi)) = self.ylim {
            axes.set_ylim(lo, hi);
        }
        if let Some(label) = &self.xlabel {
            axes.set_xlabel(label.as_str());
        }
        if let Some(label) = &self.ylabel {
            axes.set_ylabel(label.as_str());
        }
        if let Some(title) = &self.title {
            axes.set_title(title.as_str());
        }
        debug!(options = ?self, "applied plot options");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::options_from_mask;

    #[test]
    fn test_apply_sets_only_present_options() {
        for mask in 0..32 {
            let options = options_from_mask(mask);
            let mut axes = Axes::default();
            axes.set_ylabel("untouched");
            options.apply(&mut axes);

            assert_eq!(axes.xlim(), options.xlim);
            assert_eq!(axes.ylim(), options.ylim);
            assert_eq!(axes.xlabel(), options.xlabel.as_deref());
            assert_eq!(axes.title(), options.title.as_deref());
            let expected_ylabel = options.ylabel.as_deref().unwrap_or("untouched");
            assert_eq!(axes.ylabel(), Some(expected_ylabel), "mask {mask}");
        }
    }

    #[test]
    fn test_apply_twice_is_stable() {
        let options = options_from_mask(31);
        let mut once = Axes::default();
        options.apply(&mut once);
        let mut twice = once.clone();
        options.apply(&mut twice);
        assert_eq!(once, twice);
    }
}

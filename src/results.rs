//! Results container and per-run series extraction.
//!
//! Optimizers record their history as a `[run, iteration, field]` array per
//! algorithm. The trailing axis is positional, see [`Field`].

use std::collections::HashMap;

use ndarray::{s, Array1, Array3};

use crate::error::{PlotError, Result};

/// Algorithm results keyed by a short tag such as `"RW"` or `"GD"`.
pub type Results = HashMap<String, Array3<f64>>;

/// Number of fields every run-slice must carry.
pub const FIELD_COUNT: usize = 5;

/// Column positions in a run-slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Iteration,
    CurrentState,
    BestState,
    CurrentCost,
    BestCost,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Iteration,
        Field::CurrentState,
        Field::BestState,
        Field::CurrentCost,
        Field::BestCost,
    ];

    pub fn index(self) -> usize {
        match self {
            Field::Iteration => 0,
            Field::CurrentState => 1,
            Field::BestState => 2,
            Field::CurrentCost => 3,
            Field::BestCost => 4,
        }
    }
}

/// The five aligned series of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSeries {
    pub iterations: Array1<f64>,
    pub s_current: Array1<f64>,
    pub s_best: Array1<f64>,
    pub cost_current: Array1<f64>,
    pub cost_best: Array1<f64>,
}

impl RunSeries {
    /// Extract the first run recorded for `key`.
    pub fn extract(results: &Results, key: &str) -> Result<Self> {
        Self::extract_run(results, key, 0)
    }

    /// Extract run `run` recorded for `key`.
    pub fn extract_run(results: &Results, key: &str, run: usize) -> Result<Self> {
        let data = results
            .get(key)
            .ok_or_else(|| PlotError::unknown_algorithm(key))?;

        let (runs, _, fields) = data.dim();
        if runs == 0 {
            return Err(PlotError::NoRuns { key: key.to_string() });
        }
        if fields < FIELD_COUNT {
            return Err(PlotError::MissingFields {
                key: key.to_string(),
                found: fields,
                expected: FIELD_COUNT,
            });
        }
        if run >= runs {
            return Err(PlotError::RunOutOfRange {
                key: key.to_string(),
                run,
                runs,
            });
        }

        let column = |field: Field| data.slice(s![run, .., field.index()]).to_owned();

        Ok(Self {
            iterations: column(Field::Iteration),
            s_current: column(Field::CurrentState),
            s_best: column(Field::BestState),
            cost_current: column(Field::CurrentCost),
            cost_best: column(Field::BestCost),
        })
    }

    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    /// Pair the iteration column with another series for plotting.
    pub fn against_iterations(&self, values: &Array1<f64>) -> Vec<(f64, f64)> {
        self.iterations
            .iter()
            .zip(values.iter())
            .map(|(&x, &y)| (x, y))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn decreasing_cost_results(fields: usize) -> Results {
        let mut data = Array3::<f64>::zeros((1, 200, fields));
        for i in 0..200 {
            data[[0, i, 0]] = i as f64;
            if fields >= FIELD_COUNT {
                let cost = 1000.0 - 4.5 * i as f64;
                data[[0, i, 3]] = cost;
                data[[0, i, 4]] = cost;
            }
        }
        let mut results = Results::new();
        results.insert("RW".to_string(), data);
        results
    }

    #[test]
    fn test_extract_cost_endpoints() {
        let results = decreasing_cost_results(FIELD_COUNT);
        let data = &results["RW"];
        let series = RunSeries::extract(&results, "RW").unwrap();

        assert_eq!(series.len(), 200);
        assert_eq!(series.cost_current[0], data[[0, 0, 3]]);
        assert_eq!(series.cost_current[199], data[[0, 199, 3]]);
        assert_eq!(series.cost_best[0], data[[0, 0, 4]]);
        assert_eq!(series.cost_best[199], data[[0, 199, 4]]);
        assert!(series.cost_best[199] < series.cost_best[0]);
    }

    #[test]
    fn test_unknown_algorithm() {
        let results = decreasing_cost_results(FIELD_COUNT);
        let err = RunSeries::extract(&results, "ZZ").unwrap_err();
        assert!(matches!(err, PlotError::UnknownAlgorithm { ref key } if key == "ZZ"));
    }

    #[test]
    fn test_too_few_fields() {
        let results = decreasing_cost_results(3);
        let err = RunSeries::extract(&results, "RW").unwrap_err();
        assert!(matches!(
            err,
            PlotError::MissingFields { found: 3, expected: 5, .. }
        ));
    }

    #[test]
    fn test_zero_runs() {
        let mut results = Results::new();
        results.insert("RW".to_string(), Array3::zeros((0, 200, FIELD_COUNT)));
        let err = RunSeries::extract(&results, "RW").unwrap_err();
        assert!(matches!(err, PlotError::NoRuns { .. }));
    }

    #[test]
    fn test_extract_later_run() {
        let mut data = Array3::<f64>::zeros((3, 10, FIELD_COUNT));
        data[[2, 4, 1]] = 7.5;
        let mut results = Results::new();
        results.insert("GD".to_string(), data);

        let series = RunSeries::extract_run(&results, "GD", 2).unwrap();
        assert_eq!(series.s_current[4], 7.5);

        let err = RunSeries::extract_run(&results, "GD", 3).unwrap_err();
        assert!(matches!(err, PlotError::RunOutOfRange { run: 3, runs: 3, .. }));
    }

    #[test]
    fn test_field_positions() {
        let positions: Vec<usize> = Field::ALL.iter().map(|f| f.index()).collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);
    }
}

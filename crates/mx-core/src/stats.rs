//! Descriptive statistics for diagnostic output.

/// Count, mean, population standard deviation and range of a sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Summary {
    pub count:   usize,
    pub mean:    f64,
    pub std_dev: f64,
    pub min:     f64,
    pub max:     f64,
}

impl Summary {
    /// Summarise `values`.  Returns `None` for an empty sample.
    pub fn of(values: &[f64]) -> Option<Summary> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        Some(Summary { count: values.len(), mean, std_dev: var.sqrt(), min, max })
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "n={} mean={:.3} ±{:.3} range=[{:.3}, {:.3}]",
            self.count, self.mean, self.std_dev, self.min, self.max
        )
    }
}

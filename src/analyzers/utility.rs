/// Incremental arithmetic mean over the non-missing values of one group.
///
/// Every intermediate mean stays within the smallest and largest value
/// pushed so far, rounding included.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RunningMean {
    mean: f64,
    count: usize,
}

impl RunningMean {
    /// Adds a value to the mean. `None` is skipped.
    pub fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.count += 1;
            self.mean += (v - self.mean) / self.count as f64;
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// The mean, or `None` when no value was pushed.
    pub fn value(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }
}

//! Masked mean over extracted grid blocks

use ndarray::ArrayD;

/// Running sum over finite values
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MaskedMean {
    sum: f64,
    count: usize,
}

impl MaskedMean {
    /// Add a value; NaN and infinite values are skipped
    pub fn push(&mut self, value: f64) {
        if value.is_finite() {
            self.sum += value;
            self.count += 1;
        }
    }

    /// Number of values that contributed
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Mean of the contributing values, `None` when nothing contributed
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

impl FromIterator<f64> for MaskedMean {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::default();
        for value in iter {
            acc.push(value);
        }
        acc
    }
}

/// Arithmetic mean over every finite element of `data`, jointly across all axes.
///
/// Returns `None` if the array holds no finite element.
#[must_use]
pub fn finite_mean(data: &ArrayD<f64>) -> Option<f64> {
    data.iter().copied().collect::<MaskedMean>().mean()
}

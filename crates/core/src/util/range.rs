use derive_more::Display;

/// A range between two elevation values, inclusive on both ends. Used to
/// normalize elevation samples into `[0, 1]`, e.g. for visualization.
#[derive(Copy, Clone, Debug, Display, PartialEq)]
#[display(fmt = "[{}, {}]", min, max)]
pub struct NumRange {
    pub min: f32,
    pub max: f32,
}

impl NumRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Find the tightest range containing every given value, in a single pass.
    /// Returns `None` if the iterator is empty.
    pub fn of_values(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        // Start with sentinels so the first value always replaces both bounds
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut any = false;
        for value in values {
            any = true;
            min = min.min(value);
            max = max.max(value);
        }
        any.then(|| Self::new(min, max))
    }

    /// Max minus min
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Map a value from this range to the range [0, 1]. If the span of this
    /// range is zero, we divide by 1 instead, so every value in a degenerate
    /// range maps to 0 rather than NaN.
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.span();
        let divisor = if span > 0.0 { span } else { 1.0 };
        (value - self.min) / divisor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_of_values() {
        assert_eq!(
            NumRange::of_values(vec![3.0, -1.5, 8.25, 0.0]),
            Some(NumRange::new(-1.5, 8.25))
        );
        assert_eq!(
            NumRange::of_values(vec![2.0]),
            Some(NumRange::new(2.0, 2.0))
        );
        assert_eq!(NumRange::of_values(Vec::new()), None);
    }

    #[test]
    fn test_normalize() {
        let range = NumRange::new(1.0, 3.0);
        assert_approx_eq!(range.normalize(1.0), 0.0);
        assert_approx_eq!(range.normalize(2.0), 0.5);
        assert_approx_eq!(range.normalize(3.0), 1.0);

        // Zero-length span divides by one instead of zero
        let range = NumRange::new(5.0, 5.0);
        assert_eq!(range.normalize(5.0), 0.0);
        assert!(range.normalize(5.5).is_finite());
    }

    #[test]
    fn test_display() {
        assert_eq!(NumRange::new(-1.0, 2.5).to_string(), "[-1, 2.5]");
    }
}

/// Summary measures for a dataset of `f64` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes the summary from unsorted samples.
    ///
    /// Returns `None` for an empty dataset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tetrevo_stats::DescriptiveStats;
    /// let stats = DescriptiveStats::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn new<I>(samples: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut samples = samples.into_iter().collect::<Vec<_>>();
        samples.sort_by(f64::total_cmp);

        let min = *samples.first()?;
        let max = *samples.last()?;
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let median = samples[samples.len() / 2];
        let variance = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset() {
        assert_eq!(DescriptiveStats::new([]), None);
    }

    #[test]
    fn test_single_sample() {
        let stats = DescriptiveStats::new([4.5]).unwrap();
        assert_eq!(stats.min, 4.5);
        assert_eq!(stats.max, 4.5);
        assert_eq!(stats.mean, 4.5);
        assert_eq!(stats.median, 4.5);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_known_spread() {
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.std_dev, 2.0);
    }

    #[test]
    fn test_unsorted_input() {
        let stats = DescriptiveStats::new([9.0, 1.0, 5.0]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 9.0);
        assert_eq!(stats.median, 5.0);
    }
}

//! Summary statistics over a department's employees.

use serde::Serialize;

/// Aggregates computed over one numeric attribute (salary or performance)
/// of a department's employees. All figures are `0.0` for an empty
/// department.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeptStats {
    /// Number of employees the aggregates cover
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Largest observed value
    pub highest: f64,
    /// Smallest observed value
    pub lowest: f64,
    /// Median; the mean of the two middle values for an even count
    pub median: f64,
}

impl DeptStats {
    /// Stats for a department with no employees.
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            highest: 0.0,
            lowest: 0.0,
            median: 0.0,
        }
    }

    /// Compute aggregates over the given values.
    pub(crate) fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::empty();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        let sum: f64 = sorted.iter().sum();
        let median = if count % 2 == 1 {
            sorted[count / 2]
        } else {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        };

        Self {
            count,
            mean: sum / count as f64,
            highest: sorted[count - 1],
            lowest: sorted[0],
            median,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        let stats = DeptStats::from_values(&[]);
        assert_eq!(stats, DeptStats::empty());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean, 0.0);
    }

    #[test]
    fn test_single_value() {
        let stats = DeptStats::from_values(&[42.0]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.highest, 42.0);
        assert_eq!(stats.lowest, 42.0);
        assert_eq!(stats.median, 42.0);
    }

    #[test]
    fn test_odd_count_median() {
        let stats = DeptStats::from_values(&[30.0, 10.0, 20.0]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean, 20.0);
        assert_eq!(stats.highest, 30.0);
        assert_eq!(stats.lowest, 10.0);
        assert_eq!(stats.median, 20.0);
    }

    #[test]
    fn test_even_count_median_averages_middle_pair() {
        let stats = DeptStats::from_values(&[40.0, 10.0, 20.0, 30.0]);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 25.0);
        assert_eq!(stats.median, 25.0);
        assert_eq!(stats.highest, 40.0);
        assert_eq!(stats.lowest, 10.0);
    }

    #[test]
    fn test_serialized_label_set() {
        let stats = DeptStats::from_values(&[10.0, 20.0]);
        let value = serde_json::to_value(stats).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["count", "highest", "lowest", "mean", "median"]);
    }
}

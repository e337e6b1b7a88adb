// Series data domain models
use crate::error::SeriesError;
use serde::Deserialize;

/// One labelled value sequence, positionally aligned with its labels.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SeriesData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
}

impl SeriesData {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self { labels, values }
    }

    pub fn validate(&self, name: &str) -> Result<(), SeriesError> {
        check_alignment(name, self.labels.len(), self.values.len())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedValues {
    pub name: String,
    pub values: Vec<f64>,
}

/// Several parallel value sequences sharing one label axis (spend vs revenue).
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSeries {
    pub labels: Vec<String>,
    pub series: Vec<NamedValues>,
}

impl MultiSeries {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            series: Vec::new(),
        }
    }

    pub fn with(mut self, name: &str, values: Vec<f64>) -> Self {
        self.series.push(NamedValues {
            name: name.to_string(),
            values,
        });
        self
    }

    pub fn validate(&self) -> Result<(), SeriesError> {
        for s in &self.series {
            check_alignment(&s.name, self.labels.len(), s.values.len())?;
        }
        Ok(())
    }
}

/// Category totals used by report breakdown charts and share tables.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CategoryBreakdown {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
    #[serde(default)]
    pub total: f64,
}

impl CategoryBreakdown {
    pub fn validate(&self, name: &str) -> Result<(), SeriesError> {
        check_alignment(name, self.labels.len(), self.values.len())
    }

    pub fn as_series(&self) -> SeriesData {
        SeriesData::new(self.labels.clone(), self.values.clone())
    }

    /// Percentage share of each category; zero when the total is zero.
    pub fn shares(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|v| {
                if self.total == 0.0 {
                    0.0
                } else {
                    v / self.total * 100.0
                }
            })
            .collect()
    }
}

fn check_alignment(series: &str, labels: usize, values: usize) -> Result<(), SeriesError> {
    if labels != values {
        return Err(SeriesError::LengthMismatch {
            series: series.to_string(),
            labels,
            values,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("W{}", i + 1)).collect()
    }

    #[test]
    fn test_mismatched_series_rejected() {
        let series = SeriesData::new(labels(3), vec![1.0, 2.0]);
        assert_eq!(
            series.validate("trend"),
            Err(SeriesError::LengthMismatch {
                series: "trend".to_string(),
                labels: 3,
                values: 2,
            })
        );
    }

    #[test]
    fn test_multi_series_checks_every_sequence() {
        let ok = MultiSeries::new(labels(2))
            .with("Spend", vec![1.0, 2.0])
            .with("Revenue", vec![3.0, 4.0]);
        assert!(ok.validate().is_ok());

        let bad = MultiSeries::new(labels(2))
            .with("Spend", vec![1.0, 2.0])
            .with("Revenue", vec![3.0]);
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("Revenue"));
    }

    #[test]
    fn test_shares_handle_zero_total() {
        let breakdown = CategoryBreakdown {
            labels: labels(2),
            values: vec![25.0, 75.0],
            total: 100.0,
        };
        assert_eq!(breakdown.shares(), vec![25.0, 75.0]);

        let empty = CategoryBreakdown {
            total: 0.0,
            ..breakdown
        };
        assert_eq!(empty.shares(), vec![0.0, 0.0]);
    }
}

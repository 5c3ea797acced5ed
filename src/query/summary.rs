use serde::{Deserialize, Serialize};

use crate::{patient::PatientRecord, types::NumericColumn};

use super::{QueryError, QueryResult, filter::column_bounds};

/// Headline figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of rows.
    pub total_count: usize,
    /// Sum of `breach_binary`; rows with an undefined value add nothing.
    pub breach_count: u64,
    /// Mean length of stay rounded to 2 decimals; `None` for an empty table.
    pub mean_length_of_stay: Option<f64>,
}

/// Row counts per derived breach value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BreachDistribution {
    /// Rows with `breach_binary == 0`.
    #[serde(rename = "non-breach")]
    pub non_breach: usize,
    /// Rows with `breach_binary == 1`.
    pub breach: usize,
}

impl BreachDistribution {
    /// Labelled counts in display order.
    pub fn entries(&self) -> [(&'static str, usize); 2] {
        [("non-breach", self.non_breach), ("breach", self.breach)]
    }
}

/// One bar of a histogram. `low` is inclusive; `high` is exclusive except on
/// the last bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    /// Lower edge.
    pub low: f64,
    /// Upper edge.
    pub high: f64,
    /// Rows falling in the bucket.
    pub frequency: usize,
}

/// Total rows, breach count, and mean length of stay.
pub fn summarize(rows: &[PatientRecord]) -> Summary {
    let total_count = rows.len();
    let breach_count = rows
        .iter()
        .filter_map(|r| r.breach_binary)
        .map(u64::from)
        .sum();
    let mean_length_of_stay = (total_count > 0).then(|| {
        let sum: f64 = rows.iter().map(|r| r.length_of_stay as f64).sum();
        round2(sum / total_count as f64)
    });

    Summary {
        total_count,
        breach_count,
        mean_length_of_stay,
    }
}

/// Counts rows by derived breach value.
pub fn breach_distribution(rows: &[PatientRecord]) -> BreachDistribution {
    rows.iter()
        .fold(BreachDistribution::default(), |mut acc, r| {
            match r.breach_binary {
                Some(0) => acc.non_breach += 1,
                Some(1) => acc.breach += 1,
                _ => {}
            }
            acc
        })
}

/// Largest bucket count [`length_of_stay_histogram`] accepts.
pub const MAX_HISTOGRAM_BUCKETS: usize = 1_000;

/// Equal-width histogram of length of stay between the observed min and max.
pub fn length_of_stay_histogram(
    rows: &[PatientRecord],
    bucket_count: usize,
) -> QueryResult<Vec<HistogramBucket>> {
    if bucket_count == 0 || bucket_count > MAX_HISTOGRAM_BUCKETS {
        return Err(QueryError::InvalidBucketCount);
    }
    let Some((min, max)) = column_bounds(rows, NumericColumn::LengthOfStay) else {
        return Ok(Vec::new());
    };

    let (lo, hi) = if min == max {
        (min as f64 - 0.5, max as f64 + 0.5)
    } else {
        (min as f64, max as f64)
    };
    let width = (hi - lo) / bucket_count as f64;

    let mut buckets: Vec<HistogramBucket> = (0..bucket_count)
        .map(|i| HistogramBucket {
            low: lo + width * i as f64,
            high: if i + 1 == bucket_count {
                hi
            } else {
                lo + width * (i + 1) as f64
            },
            frequency: 0,
        })
        .collect();

    for row in rows {
        let offset = (row.length_of_stay as f64 - lo) / width;
        let idx = (offset as usize).min(bucket_count - 1);
        buckets[idx].frequency += 1;
    }

    Ok(buckets)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(20.0), 20.0);
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(2.0 / 3.0), 0.67);
    }
}

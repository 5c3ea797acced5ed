//! Read-only views over the patient table.

/// Range filtering over integer columns.
pub mod filter;
/// Counts, means, and distributions.
pub mod summary;

pub use filter::{column_bounds, filter_by, filter_range};
pub use summary::{
    BreachDistribution, HistogramBucket, MAX_HISTOGRAM_BUCKETS, Summary, breach_distribution,
    length_of_stay_histogram, summarize,
};

/// Rejected query parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Column is not one of the filterable integer columns.
    #[error("column `{0}` cannot be range-filtered")]
    InvalidColumn(String),
    /// Bucket count is zero or above [`MAX_HISTOGRAM_BUCKETS`].
    #[error("histogram bucket count must be between 1 and {max}", max = MAX_HISTOGRAM_BUCKETS)]
    InvalidBucketCount,
}

/// Result alias for query calls.
pub type QueryResult<T> = Result<T, QueryError>;

use aedrecords::{
    patient::{PatientDraft, PatientRecord},
    query::{
        self, BreachDistribution, MAX_HISTOGRAM_BUCKETS, QueryError, Summary, breach_distribution,
        column_bounds, filter_range, length_of_stay_histogram, summarize,
    },
    types::{BreachStatus, NumericColumn},
};

fn record(id: &str, age: i64, los: i64, status: &str) -> PatientRecord {
    PatientRecord::from(PatientDraft {
        id: id.to_string(),
        age,
        length_of_stay: los,
        investigation_count: age % 7,
        treatment_count: age % 3,
        patient_count: 20 + age % 11,
        breach_status: BreachStatus::from(status),
    })
}

fn three_rows() -> Vec<PatientRecord> {
    vec![
        record("P1", 30, 10, "non-breach"),
        record("P2", 45, 20, "breach"),
        record("P3", 60, 30, "breach"),
    ]
}

#[test]
fn summarize_counts_breaches_and_averages_stay() {
    assert_eq!(
        summarize(&three_rows()),
        Summary {
            total_count: 3,
            breach_count: 2,
            mean_length_of_stay: Some(20.0),
        }
    );
}

#[test]
fn summarize_rounds_mean_to_two_decimals() {
    let rows = vec![
        record("A", 1, 10, "breach"),
        record("B", 1, 10, "breach"),
        record("C", 1, 11, "breach"),
    ];
    assert_eq!(summarize(&rows).mean_length_of_stay, Some(10.33));
}

#[test]
fn summarize_on_empty_table_has_no_mean() {
    let summary = summarize(&[]);
    assert_eq!(summary.total_count, 0);
    assert_eq!(summary.breach_count, 0);
    assert_eq!(summary.mean_length_of_stay, None);
}

#[test]
fn unrecognised_status_is_left_out_of_breach_figures() {
    let mut rows = three_rows();
    rows.push(record("P4", 50, 40, "unknown"));

    assert_eq!(summarize(&rows).breach_count, 2);
    assert_eq!(
        breach_distribution(&rows),
        BreachDistribution {
            non_breach: 1,
            breach: 2,
        }
    );
}

#[test]
fn distribution_is_labelled_and_reports_zero_buckets() {
    let rows = vec![record("P1", 30, 10, "non-breach")];
    let dist = breach_distribution(&rows);
    assert_eq!(dist.entries(), [("non-breach", 1), ("breach", 0)]);

    let json = serde_json::to_value(dist).expect("json");
    assert_eq!(json["non-breach"], 1);
    assert_eq!(json["breach"], 0);
}

#[test]
fn histogram_frequencies_sum_to_row_count() {
    let rows: Vec<PatientRecord> = (0..97)
        .map(|i| record(&format!("P{i}"), 20, (i * 37) % 500, "breach"))
        .collect();
    let buckets = length_of_stay_histogram(&rows, 30).expect("histogram");

    assert_eq!(buckets.len(), 30);
    assert_eq!(buckets.iter().map(|b| b.frequency).sum::<usize>(), rows.len());
    assert_eq!(buckets[0].low, 0.0);
    assert_eq!(buckets[29].high, 499.0);
    for pair in buckets.windows(2) {
        assert!((pair[0].high - pair[1].low).abs() < 1e-9);
    }
}

#[test]
fn histogram_puts_max_in_last_bucket() {
    let rows = vec![
        record("A", 1, 0, "breach"),
        record("B", 1, 5, "breach"),
        record("C", 1, 10, "breach"),
    ];
    let freqs: Vec<usize> = length_of_stay_histogram(&rows, 2)
        .expect("histogram")
        .iter()
        .map(|b| b.frequency)
        .collect();
    assert_eq!(freqs, vec![1, 2]);
}

#[test]
fn histogram_handles_single_value_and_empty_tables() {
    let rows = vec![record("A", 1, 42, "breach"), record("B", 2, 42, "breach")];
    let buckets = length_of_stay_histogram(&rows, 4).expect("histogram");
    assert_eq!(buckets.first().expect("first").low, 41.5);
    assert_eq!(buckets.last().expect("last").high, 42.5);
    assert_eq!(buckets.iter().map(|b| b.frequency).sum::<usize>(), 2);

    assert!(length_of_stay_histogram(&[], 10).expect("empty").is_empty());
    assert_eq!(
        length_of_stay_histogram(&rows, 0),
        Err(QueryError::InvalidBucketCount)
    );
}

#[test]
fn histogram_bucket_count_is_capped() {
    let rows = three_rows();
    assert_eq!(
        length_of_stay_histogram(&rows, MAX_HISTOGRAM_BUCKETS)
            .expect("at cap")
            .len(),
        MAX_HISTOGRAM_BUCKETS
    );
    assert_eq!(
        length_of_stay_histogram(&rows, MAX_HISTOGRAM_BUCKETS + 1),
        Err(QueryError::InvalidBucketCount)
    );
    assert_eq!(
        length_of_stay_histogram(&rows, usize::MAX),
        Err(QueryError::InvalidBucketCount)
    );
}

#[test]
fn filter_is_inclusive_on_both_ends() {
    let rows = three_rows();
    let ids = |rows: Vec<PatientRecord>| rows.into_iter().map(|r| r.id).collect::<Vec<_>>();

    assert_eq!(ids(filter_range(&rows, "age", 30, 45).expect("filter")), vec!["P1", "P2"]);
    assert_eq!(ids(filter_range(&rows, "LoS", 20, 20).expect("filter")), vec!["P2"]);
    assert_eq!(ids(filter_range(&rows, "LoS", 31, 100).expect("filter")), Vec::<String>::new());
    assert!(filter_range(&rows, "Age", 60, 30).expect("filter").is_empty());
}

#[test]
fn filter_accepts_every_allowed_column() {
    let rows = three_rows();
    for column in NumericColumn::ALL {
        let (lo, hi) = column_bounds(&rows, column).expect("bounds");
        assert_eq!(
            filter_range(&rows, column.field_name(), lo, hi).expect("field name").len(),
            3
        );
        assert_eq!(filter_range(&rows, column.header(), lo, hi).expect("header").len(), 3);
    }
}

#[test]
fn filter_rejects_columns_outside_the_allow_list() {
    let rows = three_rows();
    for column in ["ID", "Breachornot", "breach_binary", ""] {
        assert_eq!(
            filter_range(&rows, column, 0, 100),
            Err(QueryError::InvalidColumn(column.to_string()))
        );
    }
}

#[test]
fn column_bounds_tracks_min_and_max() {
    let rows = three_rows();
    assert_eq!(column_bounds(&rows, NumericColumn::Age), Some((30, 60)));
    assert_eq!(query::column_bounds(&[], NumericColumn::Age), None);
}

mod common;

use common::{config_for, data_root, hospitals_csv};
use healthboard::data::{
    AggregationError, AggregationRequest, Aggregator, BinRange, BinSpec, DataProcessor, GroupOrder,
    MissingKeyPolicy,
};
use healthboard::pages::{self, hospitals};
use polars::prelude::*;
use std::collections::BTreeSet;

fn hospitals_frame() -> (tempfile::TempDir, DataFrame) {
    let dir = data_root(&[("UAE_hospitals_data.csv", &hospitals_csv())]);
    let config = config_for(dir.path());
    let df = hospitals::load_hospitals::<&str>(&config, &[]).expect("load hospitals");
    (dir, df)
}

#[test]
fn test_yearly_category_sum_end_to_end() {
    let dir = data_root(&[("2021.csv", "Category,Value\nFlu,30\nDiabetes,70\n")]);
    let config = config_for(dir.path());

    let summary = pages::category_summary(&config, 2021).expect("summary");
    assert_eq!(summary.labels(), vec!["Flu", "Diabetes"]);
    assert_eq!(summary.values(), vec![30.0, 70.0]);
    assert_eq!(summary.total(), 100.0);
    assert_eq!(summary.share("Diabetes"), Some(70.0));
}

#[test]
fn test_repeated_categories_are_summed() {
    let df = df!(
        "Category" => ["Flu", "Diabetes", "Flu", "Asthma", "Diabetes"],
        "Value" => [10.0, 20.0, 5.0, 1.0, 2.0]
    )
    .unwrap();

    let summary = Aggregator::aggregate(&df, &AggregationRequest::sum("Category", "Value")).unwrap();
    assert_eq!(summary.labels(), vec!["Flu", "Diabetes", "Asthma"]);
    assert_eq!(summary.values(), vec![15.0, 22.0, 1.0]);
    assert_eq!(summary.total(), 38.0);
}

#[test]
fn test_labels_are_the_distinct_present_keys() {
    let (_dir, df) = hospitals_frame();

    let summary = Aggregator::aggregate(&df, &AggregationRequest::count(hospitals::STATE)).unwrap();
    let labels: BTreeSet<String> = summary.labels().into_iter().map(String::from).collect();
    let distinct: BTreeSet<String> = DataProcessor::unique_values(&df, hospitals::STATE)
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(labels, distinct);
    assert_eq!(summary.len(), labels.len());
    assert_eq!(summary.get("Dubai"), Some(2.0));
    assert_eq!(summary.total(), df.height() as f64);
}

#[test]
fn test_sum_does_not_depend_on_row_order() {
    let (_dir, df) = hospitals_frame();
    let cost = hospitals::cost_column(2021);
    let request = AggregationRequest::sum(hospitals::STATE, cost.as_str()).ordered(GroupOrder::Label);

    let forward = Aggregator::aggregate(&df, &request).unwrap();
    let backward = Aggregator::aggregate(&df.reverse(), &request).unwrap();
    assert_eq!(forward, backward);
    assert_eq!(forward.get("Dubai"), Some(240.0));
    assert_eq!(forward.get("Abu Dhabi"), Some(300.5));
}

#[test]
fn test_sum_of_totals_matches_column_total() {
    let (_dir, df) = hospitals_frame();
    let patients = hospitals::patients_column(2021);

    let summary =
        Aggregator::aggregate(&df, &AggregationRequest::sum(hospitals::STATE, patients.as_str())).unwrap();
    let column_total: f64 = DataProcessor::numeric_values(&df, &patients)
        .unwrap()
        .into_iter()
        .flatten()
        .sum();
    assert_eq!(summary.total(), column_total);
}

#[test]
fn test_explode_counts_each_treatment() {
    let (_dir, df) = hospitals_frame();
    let request = AggregationRequest::count(hospitals::TREATMENTS)
        .exploding(hospitals::TREATMENTS)
        .ordered(GroupOrder::ValueDescending);

    let summary = Aggregator::aggregate(&df, &request).unwrap();
    assert_eq!(
        summary.labels(),
        vec!["Cardiology", "Dermatology", "Oncology", "Pediatrics"]
    );
    assert_eq!(summary.values(), vec![2.0, 1.0, 1.0, 1.0]);
}

#[test]
fn test_explode_with_sum_keeps_row_values() {
    let df = df!(
        "Types" => ["A, B", "B"],
        "Patients" => [10.0, 5.0]
    )
    .unwrap();

    let request = AggregationRequest::sum("Types", "Patients").exploding("Types");
    let summary = Aggregator::aggregate(&df, &request).unwrap();
    assert_eq!(summary.get("A"), Some(10.0));
    assert_eq!(summary.get("B"), Some(15.0));
}

#[test]
fn test_binned_ratings_keep_unclassified_group() {
    let (_dir, df) = hospitals_frame();
    let request = AggregationRequest::count(hospitals::RATING_GROUP)
        .binned(hospitals::HOSPITAL_RATE, BinSpec::hospital_rating())
        .ordered(GroupOrder::Label);

    let summary = Aggregator::aggregate(&df, &request).unwrap();
    assert_eq!(summary.get("4.0 - 5.0"), Some(1.0));
    assert_eq!(summary.get("3.0 - 3.9"), Some(1.0));
    assert_eq!(summary.get("Below 3.0"), Some(1.0));
    assert_eq!(summary.get("unclassified"), Some(1.0));
    assert_eq!(summary.total(), 4.0);
}

#[test]
fn test_every_row_lands_in_exactly_one_bin() {
    let spec = BinSpec::new(vec![
        BinRange::new(0.0, 1.0, "low"),
        BinRange::new(1.0, 2.0, "high"),
    ])
    .unwrap();
    let df = df!("x" => [Some(0.0), Some(0.999), Some(1.0), Some(2.0), None, Some(-1.0)]).unwrap();

    let summary = Aggregator::aggregate(&df, &AggregationRequest::count("bucket").binned("x", spec)).unwrap();
    assert_eq!(summary.get("low"), Some(2.0));
    assert_eq!(summary.get("high"), Some(1.0));
    assert_eq!(summary.get("unclassified"), Some(3.0));
    assert_eq!(summary.total(), df.height() as f64);
}

#[test]
fn test_missing_keys_dropped_or_retained() {
    let df = df!(
        "State" => [Some("Dubai"), None, Some("Dubai")],
        "Doctors" => [1.0, 2.0, 3.0]
    )
    .unwrap();

    let dropped = Aggregator::aggregate(&df, &AggregationRequest::sum("State", "Doctors")).unwrap();
    assert_eq!(dropped.labels(), vec!["Dubai"]);
    assert_eq!(dropped.total(), 4.0);

    let retained = Aggregator::aggregate(
        &df,
        &AggregationRequest::sum("State", "Doctors")
            .with_missing_keys(MissingKeyPolicy::Retain("Unknown".to_string())),
    )
    .unwrap();
    assert_eq!(retained.get("Unknown"), Some(2.0));
    assert_eq!(retained.total(), 6.0);
}

#[test]
fn test_unknown_group_column() {
    let df = df!("Category" => ["Flu"], "Value" => [1.0]).unwrap();
    let err = Aggregator::aggregate(&df, &AggregationRequest::sum("Region", "Value")).unwrap_err();
    assert!(matches!(err, AggregationError::ColumnNotFound(c) if c == "Region"));

    let err = Aggregator::aggregate(&df, &AggregationRequest::sum("Category", "Amount")).unwrap_err();
    assert!(matches!(err, AggregationError::ColumnNotFound(c) if c == "Amount"));
}

#[test]
fn test_no_usable_rows_is_empty_result() {
    let df = df!(
        "Category" => [None::<&str>, None],
        "Value" => [1.0, 2.0]
    )
    .unwrap();
    let err = Aggregator::aggregate(&df, &AggregationRequest::sum("Category", "Value")).unwrap_err();
    assert!(matches!(err, AggregationError::EmptyResult));

    let empty = df.head(Some(0));
    let err = Aggregator::aggregate(&empty, &AggregationRequest::count("Category")).unwrap_err();
    assert!(matches!(err, AggregationError::EmptyResult));
}

#[test]
fn test_summary_converts_to_dataframe() {
    let df = df!("Category" => ["Flu", "Asthma"], "Value" => [3.0, 4.0]).unwrap();
    let summary = Aggregator::aggregate(&df, &AggregationRequest::sum("Category", "Value")).unwrap();

    let table = summary.to_dataframe().unwrap();
    assert_eq!(table.shape(), (2, 2));
    assert_eq!(table.get_column_names_str(), vec!["Category", "Value"]);
}

#[test]
fn test_retained_missing_label_must_not_match_a_state() {
    let (_dir, df) = hospitals_frame();
    let mut with_gap = df.clone();
    with_gap
        .with_column(Column::new(
            hospitals::STATE.into(),
            [Some("Abu Dhabi"), None, Some("Dubai"), Some("Sharjah")],
        ))
        .unwrap();

    let request = AggregationRequest::count(hospitals::STATE)
        .with_missing_keys(MissingKeyPolicy::Retain("Dubai".to_string()));
    let err = Aggregator::aggregate(&with_gap, &request).unwrap_err();
    assert!(matches!(err, AggregationError::MissingKeyCollision(label) if label == "Dubai"));

    let request = AggregationRequest::count(hospitals::STATE)
        .with_missing_keys(MissingKeyPolicy::Retain("Unknown".to_string()));
    let summary = Aggregator::aggregate(&with_gap, &request).unwrap();
    assert_eq!(summary.get("Unknown"), Some(1.0));
}

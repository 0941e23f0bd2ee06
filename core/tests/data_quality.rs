//! Data-quality gate over the synthetic corpus: the checks a training set
//! must pass before its model is worth shipping.

mod common;

use carprice_core::{audit_listings, MIN_TRAINING_ROWS};

use common::synthetic_listings;

#[test]
fn synthetic_corpus_passes_the_quality_gate() {
    let rows = synthetic_listings(MIN_TRAINING_ROWS + 50, 3);
    let report = audit_listings(&rows);

    assert_eq!(report.rows, rows.len());
    assert_eq!(report.negative_prices, 0);
    assert_eq!(report.negative_mileages, 0);
    assert_eq!(report.out_of_range_years, 0);
    assert!(report.is_clean(MIN_TRAINING_ROWS));
}

#[test]
fn undersized_corpus_is_not_clean() {
    let rows = synthetic_listings(500, 3);
    let report = audit_listings(&rows);

    assert_eq!(report.issues(), 0);
    assert!(!report.is_clean(MIN_TRAINING_ROWS));
}

#[test]
fn corrupted_rows_are_counted_per_check() {
    let mut rows = synthetic_listings(100, 9);
    rows[0].price = -500.0;
    rows[1].mileage = -1.0;
    rows[2].year = 1949;
    rows[3].year = 2999;

    let report = audit_listings(&rows);
    assert_eq!(report.negative_prices, 1);
    assert_eq!(report.negative_mileages, 1);
    assert_eq!(report.out_of_range_years, 2);
    assert_eq!(report.issues(), 4);
    assert!(!report.is_clean(MIN_TRAINING_ROWS));
}

#[test]
fn listings_survive_a_csv_round_trip() {
    let rows = synthetic_listings(50, 17);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("listings.csv");
    let mut writer = csv::Writer::from_path(&path).unwrap();
    for row in &rows {
        writer.serialize(row).unwrap();
    }
    writer.flush().unwrap();

    let loaded = carprice_core::load_listings(&path).unwrap();
    assert_eq!(loaded.len(), rows.len());
    assert_eq!(loaded[0].make, rows[0].make);
    assert!((loaded[0].price - rows[0].price).abs() < 1e-9);
}

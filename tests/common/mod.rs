//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// One raw listing, with every column of the input CSV
#[derive(Debug, Clone)]
pub struct ListingRow {
    pub id: i64,
    pub name: Option<&'static str>,
    pub verified: Option<&'static str>,
    pub host_name: Option<&'static str>,
    pub group: Option<&'static str>,
    pub neighbourhood: Option<&'static str>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub country: Option<&'static str>,
    pub country_code: Option<&'static str>,
    pub instant_bookable: Option<&'static str>,
    pub cancellation: Option<&'static str>,
    pub room_type: Option<&'static str>,
    pub construction_year: Option<f64>,
    pub price: Option<&'static str>,
    pub service_fee: Option<&'static str>,
    pub minimum_nights: Option<f64>,
    pub number_of_reviews: Option<f64>,
    pub last_review: Option<&'static str>,
    pub reviews_per_month: Option<f64>,
    pub review_rate: Option<f64>,
    pub host_listings: Option<f64>,
    pub availability: Option<f64>,
    pub house_rules: Option<&'static str>,
    pub license: Option<&'static str>,
}

impl Default for ListingRow {
    fn default() -> Self {
        Self {
            id: 1,
            name: Some("Cozy loft"),
            verified: Some("verified"),
            host_name: Some("Alex"),
            group: Some("Brooklyn"),
            neighbourhood: Some("Williamsburg"),
            lat: Some(40.71),
            long: Some(-73.95),
            country: Some("United States"),
            country_code: Some("US"),
            instant_bookable: Some("TRUE"),
            cancellation: Some("moderate"),
            room_type: Some("Entire home/apt"),
            construction_year: Some(2010.0),
            price: Some("$1,020"),
            service_fee: Some("$204"),
            minimum_nights: Some(3.0),
            number_of_reviews: Some(12.0),
            last_review: Some("10/19/2021"),
            reviews_per_month: Some(0.8),
            review_rate: Some(4.0),
            host_listings: Some(1.0),
            availability: Some(200.0),
            house_rules: None,
            license: None,
        }
    }
}

/// Build a raw listings table from rows
pub fn listings_frame(rows: &[ListingRow]) -> DataFrame {
    fn text(rows: &[ListingRow], f: impl Fn(&ListingRow) -> Option<&'static str>) -> Vec<Option<&'static str>> {
        rows.iter().map(f).collect()
    }
    fn num(rows: &[ListingRow], f: impl Fn(&ListingRow) -> Option<f64>) -> Vec<Option<f64>> {
        rows.iter().map(f).collect()
    }

    let columns = vec![
        Column::new("id".into(), rows.iter().map(|r| r.id).collect::<Vec<i64>>()),
        Column::new("NAME".into(), text(rows, |r| r.name)),
        Column::new("host_identity_verified".into(), text(rows, |r| r.verified)),
        Column::new("host name".into(), text(rows, |r| r.host_name)),
        Column::new("neighbourhood group".into(), text(rows, |r| r.group)),
        Column::new("neighbourhood".into(), text(rows, |r| r.neighbourhood)),
        Column::new("lat".into(), num(rows, |r| r.lat)),
        Column::new("long".into(), num(rows, |r| r.long)),
        Column::new("country".into(), text(rows, |r| r.country)),
        Column::new("country code".into(), text(rows, |r| r.country_code)),
        Column::new("instant_bookable".into(), text(rows, |r| r.instant_bookable)),
        Column::new("cancellation_policy".into(), text(rows, |r| r.cancellation)),
        Column::new("room type".into(), text(rows, |r| r.room_type)),
        Column::new("Construction year".into(), num(rows, |r| r.construction_year)),
        Column::new("price".into(), text(rows, |r| r.price)),
        Column::new("service fee".into(), text(rows, |r| r.service_fee)),
        Column::new("minimum nights".into(), num(rows, |r| r.minimum_nights)),
        Column::new("number of reviews".into(), num(rows, |r| r.number_of_reviews)),
        Column::new("last review".into(), text(rows, |r| r.last_review)),
        Column::new("reviews per month".into(), num(rows, |r| r.reviews_per_month)),
        Column::new("review rate number".into(), num(rows, |r| r.review_rate)),
        Column::new("calculated host listings count".into(), num(rows, |r| r.host_listings)),
        Column::new("availability 365".into(), num(rows, |r| r.availability)),
        Column::new("house_rules".into(), text(rows, |r| r.house_rules)),
        Column::new("license".into(), text(rows, |r| r.license)),
    ];

    DataFrame::new(columns).unwrap()
}

/// Eight varied listings with gaps in several columns
pub fn sample_rows() -> Vec<ListingRow> {
    vec![
        ListingRow::default(),
        ListingRow {
            id: 2,
            group: Some("Manhattan"),
            neighbourhood: Some("Harlem"),
            price: Some("$350"),
            service_fee: Some("$70"),
            minimum_nights: Some(30.0),
            number_of_reviews: Some(45.0),
            availability: Some(340.0),
            room_type: Some("Private room"),
            instant_bookable: Some("FALSE"),
            cancellation: Some("strict"),
            ..Default::default()
        },
        ListingRow {
            id: 3,
            verified: None,
            group: None,
            price: None,
            service_fee: Some("$120"),
            minimum_nights: None,
            number_of_reviews: Some(2.0),
            reviews_per_month: None,
            last_review: Some("not a date"),
            room_type: None,
            ..Default::default()
        },
        ListingRow {
            id: 4,
            group: Some("Manhattan"),
            price: Some("$880"),
            service_fee: Some("$176"),
            minimum_nights: Some(1.0),
            number_of_reviews: Some(270.0),
            reviews_per_month: Some(5.2),
            host_listings: Some(120.0),
            availability: Some(12.0),
            last_review: Some("06/01/2019"),
            verified: Some("unconfirmed"),
            ..Default::default()
        },
        ListingRow {
            id: 5,
            lat: None,
            ..Default::default()
        },
        ListingRow {
            id: 6,
            group: Some("Queens"),
            price: Some("$95"),
            service_fee: None,
            minimum_nights: Some(2.0),
            number_of_reviews: Some(0.0),
            reviews_per_month: None,
            last_review: None,
            availability: Some(90.0),
            room_type: Some("Shared room"),
            cancellation: None,
            construction_year: None,
            ..Default::default()
        },
        ListingRow {
            id: 7,
            group: Some("Brooklyn"),
            price: Some("$610"),
            service_fee: Some("$122"),
            minimum_nights: Some(5.0),
            number_of_reviews: Some(8.0),
            last_review: Some("12/31/2999"),
            availability: Some(150.0),
            host_name: None,
            instant_bookable: None,
            ..Default::default()
        },
        ListingRow {
            id: 7,
            group: Some("Brooklyn"),
            price: Some("$610"),
            service_fee: Some("$122"),
            minimum_nights: Some(5.0),
            number_of_reviews: Some(8.0),
            last_review: Some("12/31/2999"),
            availability: Some(150.0),
            host_name: None,
            instant_bookable: None,
            ..Default::default()
        },
    ]
}

pub fn sample_listings() -> DataFrame {
    listings_frame(&sample_rows())
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("listings.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Float values of a column, panicking on unknown columns
pub fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .iter()
        .collect()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}

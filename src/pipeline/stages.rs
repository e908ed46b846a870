//! The three pipeline stages, each consuming and returning the owned table

use anyhow::Result;
use chrono::NaiveDateTime;
use polars::prelude::*;
use tracing::info;

use super::config::PipelineConfig;
use super::correlation::{
    indicator_columns, rank_subgroup_correlations, rank_target_correlations,
    SubgroupCorrelations, TargetCorrelation,
};
use super::currency::split_compound_column;
use super::dates::{parse_date_column, reset_future_dates};
use super::dedup::{count_duplicate_rows, drop_duplicate_rows};
use super::encoding::{booleans_to_int, normalize_flag_column, one_hot_encode};
use super::features::derive_sum_column;
use super::missing::{
    analyze_missing_values, drop_rows_missing, fill_missing_with, impute_categorical_mode,
    impute_numeric_median, missing_counts, select_sparse_columns,
};
use super::outliers::{cap_outliers_iqr, IqrBounds};
use super::profile::{distribution_shapes, DistributionShape};
use super::scaling::{min_max_scale, standardize, ScaleParams};
use super::schema::{column_names, drop_present, ColumnRegistry};

/// What the cleaning stage changed
#[derive(Debug, Clone, Default)]
pub struct CleaningSummary {
    pub initial_shape: (usize, usize),
    pub dropped_columns: Vec<String>,
    pub rows_missing_coordinates: usize,
    /// Per compound column, cells whose amount did not parse
    pub unparsed_amounts: Vec<(String, usize)>,
    pub unparsed_dates: usize,
    pub future_dates_reset: usize,
    pub duplicates_removed: usize,
    /// Duplicates left after the dedup pass; zero unless something is wrong
    pub residual_duplicates: usize,
    pub missing_after_cleaning: Vec<(String, usize)>,
    pub final_shape: (usize, usize),
}

#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub df: DataFrame,
    pub summary: CleaningSummary,
}

/// What the feature transform stage fitted
#[derive(Debug, Clone, Default)]
pub struct FeatureSummary {
    pub indicators: Vec<String>,
    pub shapes: Vec<DistributionShape>,
    pub bounds: Vec<IqrBounds>,
    pub min_max: Vec<ScaleParams>,
    pub standardized: Vec<ScaleParams>,
    pub converted_booleans: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FeatureOutcome {
    pub df: DataFrame,
    pub summary: FeatureSummary,
}

#[derive(Debug, Clone, Default)]
pub struct CorrelationAnalysis {
    pub overall: Vec<TargetCorrelation>,
    /// False when the table has no indicator columns for the subgroup source
    pub has_subgroups: bool,
    pub subgroups: Vec<SubgroupCorrelations>,
}

/// Cleaning stage: drop unusable data, split compound fields, impute,
/// sanitise dates, dedup and normalise the flag column.
///
/// `now` is the processing timestamp used by the future-date filter.
pub fn clean_listings(df: DataFrame, cfg: &PipelineConfig, now: NaiveDateTime) -> Result<CleanOutcome> {
    cfg.validate()?;
    let registry = ColumnRegistry::from_config(cfg);
    registry.validate(&df)?;

    let mut summary = CleaningSummary {
        initial_shape: df.shape(),
        ..Default::default()
    };

    // Columns too sparse to impute
    let ratios = analyze_missing_values(&df);
    let mut to_drop = cfg.high_missing_columns.clone();
    for name in select_sparse_columns(&ratios, cfg.missing_threshold, &registry) {
        if !to_drop.contains(&name) {
            to_drop.push(name);
        }
    }
    let present = column_names(&df);
    summary.dropped_columns = to_drop
        .iter()
        .filter(|name| present.contains(name))
        .cloned()
        .collect();
    let df = drop_present(df, &to_drop);

    let (mut df, removed) = drop_rows_missing(df, &cfg.coordinate_columns)?;
    summary.rows_missing_coordinates = removed;

    for (source, prefix) in &cfg.compound_columns {
        let (split, unparsed) = split_compound_column(df, source, prefix)?;
        df = split;
        summary.unparsed_amounts.push((source.clone(), unparsed));
    }

    for name in &cfg.numeric_impute_columns {
        impute_numeric_median(&mut df, name)?;
    }
    for name in &cfg.categorical_impute_columns {
        impute_categorical_mode(&mut df, name)?;
    }

    summary.unparsed_dates = parse_date_column(&mut df, &cfg.date_column)?;
    for name in &cfg.zero_fill_columns {
        fill_missing_with(&mut df, name, 0.0)?;
    }

    summary.future_dates_reset = reset_future_dates(&mut df, &cfg.date_column, now)?;

    let (mut df, duplicates) = drop_duplicate_rows(df)?;
    summary.duplicates_removed = duplicates;
    summary.residual_duplicates = count_duplicate_rows(&df)?;

    normalize_flag_column(&mut df, &cfg.flag_column)?;

    summary.missing_after_cleaning = missing_counts(&df);
    summary.final_shape = df.shape();
    info!(
        rows = summary.final_shape.0,
        columns = summary.final_shape.1,
        "cleaning stage complete"
    );

    Ok(CleanOutcome { df, summary })
}

/// Feature transform stage: derive the target, one-hot encode, cap outliers,
/// scale, and turn leftover booleans into 0/1 integers.
pub fn engineer_features(df: DataFrame, cfg: &PipelineConfig) -> Result<FeatureOutcome> {
    let mut summary = FeatureSummary::default();

    let inputs: Vec<String> = cfg
        .compound_columns
        .iter()
        .map(|(_, prefix)| PipelineConfig::value_column(prefix))
        .collect();
    let mut df = derive_sum_column(df, &inputs, &cfg.target_column)?;

    for name in &cfg.one_hot_columns {
        let (encoded, indicators) = one_hot_encode(df, name)?;
        df = encoded;
        summary.indicators.extend(indicators);
    }

    summary.shapes = distribution_shapes(&df, &cfg.shape_columns())?;

    for name in &cfg.iqr_columns {
        if let Some(bounds) = cap_outliers_iqr(&mut df, name, cfg.iqr_multiplier)? {
            summary.bounds.push(bounds);
        }
    }

    summary.min_max = min_max_scale(&mut df, &cfg.iqr_columns)?;
    summary.standardized = standardize(&mut df, &cfg.standardize_columns)?;
    summary.converted_booleans = booleans_to_int(&mut df)?;

    info!(
        indicators = summary.indicators.len(),
        columns = df.width(),
        "feature transform stage complete"
    );

    Ok(FeatureOutcome { df, summary })
}

/// Analysis stage: rank features against the target overall and per subgroup
pub fn analyze_correlations(df: &DataFrame, cfg: &PipelineConfig) -> Result<CorrelationAnalysis> {
    let overall = rank_target_correlations(df, &cfg.target_column, cfg.top_n)?;
    let has_subgroups = !indicator_columns(df, &cfg.subgroup_column).is_empty();
    let subgroups = if has_subgroups {
        rank_subgroup_correlations(df, &cfg.target_column, &cfg.subgroup_column, cfg.subgroup_top_n)?
    } else {
        Vec::new()
    };

    Ok(CorrelationAnalysis {
        overall,
        has_subgroups,
        subgroups,
    })
}

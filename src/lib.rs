//! Rentcorr: listing cleanup and price correlation library
//!
//! Cleans a short-term rental listings table (currency strings, missing values,
//! invalid dates, duplicates), engineers a normalized numeric feature table, and
//! ranks features by their correlation with the total nightly price.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;

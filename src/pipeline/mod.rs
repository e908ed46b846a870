//! Pipeline module - cleaning, feature transforms and correlation analysis

pub mod config;
pub mod correlation;
pub mod currency;
pub mod dates;
pub mod dedup;
pub mod encoding;
pub mod error;
pub mod features;
pub mod loader;
pub mod missing;
pub mod outliers;
pub mod profile;
pub mod scaling;
pub mod schema;
pub mod stages;

pub use config::*;
pub use correlation::*;
pub use currency::*;
pub use dates::*;
pub use dedup::*;
pub use encoding::*;
pub use error::*;
pub use features::*;
pub use loader::*;
pub use missing::*;
pub use outliers::*;
pub use profile::*;
pub use scaling::*;
pub use schema::*;
pub use stages::*;

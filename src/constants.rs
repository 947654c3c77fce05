//! Application constants
//!
//! Centralized location for magic strings and wire-contract defaults.

/// API version prefix joined between the endpoint and every relative path
pub const API_VERSION: &str = "v2";

/// Relative path of the reference-data (blah types) listing
pub const BLAH_TYPES_PATH: &str = "blahs/types";

/// Reference-data name of the time-bounded prediction blah type
pub const PREDICTION_TYPE_NAME: &str = "predicts";

/// Reference-data name of the multi-choice poll blah type
pub const POLL_TYPE_NAME: &str = "polls";

/// External host serving blah image renditions
pub const IMAGE_BASE_URL: &str = "http://blahguaimages.s3-website-us-west-2.amazonaws.com/image/";

/// Image rendition suffixes served for each image reference
pub const IMAGE_VARIANTS: [&str; 4] = ["A", "B", "C", "D"];

/// Log file written next to the working directory
pub const LOG_FILE: &str = "blah-console.log";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

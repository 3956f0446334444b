//! Core types shared across the BeanScan backend.

pub mod error;
pub mod extraction;
pub mod review;
pub mod scan;

pub use error::BeanScanError;
pub use extraction::CoffeeExtraction;
pub use review::{RatingDistribution, ReviewEntry, ReviewSummary};
pub use scan::{ProcessingMethod, ScanData, ScanRecord, ScanResponse};

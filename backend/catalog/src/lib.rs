//! Catalog services around a scan: roaster matching, brew recommendations,
//! and scan persistence. All three are placeholder implementations
//! returning mock data until real backends land.

pub mod recommend;
pub mod roaster;
pub mod store;

pub use recommend::brew_recommendations;
pub use roaster::{RoasterMatch, RoasterMatcher};
pub use store::ScanStore;

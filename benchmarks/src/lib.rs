//! Benchmark utilities for price-estimator.
//!
//! Provides a deterministic synthetic car market so benchmarks need no data
//! files: mileages spread over `[0, max_mileage]`, prices on a known line
//! plus bounded noise.

pub mod data;

pub use data::SyntheticMarket;

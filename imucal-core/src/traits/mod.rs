//! Core Traits and Abstractions
//!
//! The extension points of the crate, grouped by functional area:
//!
//! - [`observer`] - progress reporting from the optimizer
//! - [`stream`] - pull-based sources of raw samples
//!
//! ## Usage Example
//!
//! ```rust
//! use imucal_core::traits::ProgressObserver;
//! use imucal_core::optimizer::PassReport;
//!
//! struct BestScore(f64);
//!
//! impl ProgressObserver for BestScore {
//!     fn on_pass(&mut self, report: &PassReport) {
//!         self.0 = self.0.max(report.stats.score);
//!     }
//! }
//! ```

pub mod observer;
pub mod stream;

pub use observer::{NoopObserver, ProgressObserver};
pub use stream::Stream;

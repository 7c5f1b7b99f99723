//! Export functionality for analysis
//!
//! Currently supports CSV export of a training run's learning curve.

mod curve_csv;

pub use curve_csv::{CurveRecord, write_learning_curve};

//! Classification core for Weathervane
//!
//! A small, deterministic random-forest implementation over `ndarray`
//! matrices, plus the train/test split and evaluation report the trainer
//! needs. Everything here is pure computation: no I/O, no async.
//!
//! Given the same data and the same seed, fitting produces an identical
//! forest and identical metrics.

pub mod error;
pub mod forest;
pub mod metrics;
pub mod split;
pub mod tree;

pub use error::MlError;
pub use forest::{ForestConfig, RandomForest};
pub use metrics::{ClassMetrics, ClassificationReport};
pub use split::{SplitIndices, train_test_split};
pub use tree::DecisionTree;

//! Storage implementations.

pub mod dataset;

pub use dataset::DatasetStore;

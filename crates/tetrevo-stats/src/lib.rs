//! Small, dependency-free statistics helpers for summarizing training runs.

pub use self::descriptive::DescriptiveStats;

pub mod descriptive;

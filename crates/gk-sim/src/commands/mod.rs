pub mod batch;
pub mod generators;
pub mod rule;

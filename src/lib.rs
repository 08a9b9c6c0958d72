pub mod algorithm;
pub mod config;
pub mod core;
pub mod report;
pub mod sequence;

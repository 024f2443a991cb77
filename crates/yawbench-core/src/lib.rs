pub mod collector;
pub mod datasets;
pub mod error;
pub mod processing;
pub mod registry;
pub mod runner;
pub mod strategies;

pub use error::{BenchmarkError, Result};
pub use yawbench_parser as parser;
pub use yawbench_parser::schema;

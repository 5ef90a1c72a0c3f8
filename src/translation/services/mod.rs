//! Application services for translation dispatch and comparison.

mod comparison;
mod dispatcher;

pub use comparison::ComparisonAggregator;
pub use dispatcher::{DispatchPolicy, EngineDispatcher, RetryPolicy};

pub mod batch;
pub mod builder;
pub mod calculator;
pub mod chart;
pub mod config;
pub mod currency;
pub mod engine;
pub mod format;
pub mod inputs;
pub mod prelude;
pub mod schema;
pub mod traits;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::InterestConfig;
pub use engine::{InterestEngine, compute};
pub use inputs::{CalculationInput, InputPolicy};
pub use traits::CalculateInterest;
pub use types::{CalculationResult, InterestError};

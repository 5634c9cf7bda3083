//! Prelude module for the interest crate
//!
//! This module re-exports commonly used structs, traits, and types to allow
//! for easier usage of the library.
//!
//! # Usage
//!
//! ```rust
//! use interest::prelude::*;
//! ```

// Core exports
pub use crate::batch::{BatchItemResult, BatchResult, BatchStatus, InterestBatch};
pub use crate::builder::Build;
pub use crate::calculator::SimpleInterestCalculator;
pub use crate::chart::{ChartData, ChartSlice, SliceKind};
pub use crate::config::InterestConfig;
pub use crate::currency::Currency;
pub use crate::engine::{InterestEngine, compute};
pub use crate::format::ResultView;
pub use crate::inputs::{CalculationInput, InputPolicy, IntoInterestDecimal, RawInput};
pub use crate::traits::CalculateInterest;
pub use crate::types::{CalculationResult, CalculationStep, InterestError};

#[cfg(feature = "async")]
pub use crate::batch::AsyncInterestBatch;
#[cfg(feature = "async")]
pub use crate::traits::AsyncCalculateInterest;

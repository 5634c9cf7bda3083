//! JSON Schema for the wire types, for front ends that validate before submitting.

use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::calculator::SimpleInterestCalculator;
use crate::inputs::CalculationInput;
use crate::types::CalculationResult;

pub fn input_schema() -> RootSchema {
    schema_for!(CalculationInput)
}

/// Schema of a raw scenario, as accepted by batch files.
pub fn scenario_schema() -> RootSchema {
    schema_for!(SimpleInterestCalculator)
}

pub fn result_schema() -> RootSchema {
    schema_for!(CalculationResult)
}

//! Valuation inputs and loading

mod data;
pub mod loader;

pub use data::{LabeledInput, ValuationInput};
pub use loader::{load_inputs, load_inputs_from_reader};

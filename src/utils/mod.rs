// file: src/utils/mod.rs
// description: utility functions module exports
// reference: internal module structure

pub mod logging;
pub mod timer;
pub mod validation;

pub use timer::OperationTimer;
pub use validation::Validator;

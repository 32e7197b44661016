pub mod field;
pub mod inputs;
pub mod result;

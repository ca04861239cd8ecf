pub mod gate;

pub use gate::{GateError, authenticate, extract_bearer, validate_token};

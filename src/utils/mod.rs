pub mod error;
pub mod logger;
pub mod serialization;
pub mod validation;

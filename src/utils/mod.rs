pub mod error;
pub mod interrupt;
pub mod logger;
pub mod validation;

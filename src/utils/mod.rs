pub mod error;
pub mod logger;
pub mod scrub;
pub mod validation;

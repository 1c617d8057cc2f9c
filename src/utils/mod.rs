pub mod error;
pub mod logger;
pub mod output;
pub mod shutdown;
pub mod validation;

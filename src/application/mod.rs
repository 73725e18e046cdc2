pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::AppError;

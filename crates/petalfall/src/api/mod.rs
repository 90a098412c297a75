pub mod error;
pub mod sketch;
pub mod types;

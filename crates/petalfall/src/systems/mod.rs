pub mod field;
#[cfg(feature = "vectors")]
pub mod vector;

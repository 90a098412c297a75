pub mod detection;
pub mod pointer;

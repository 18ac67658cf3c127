pub mod gesture;
pub mod pointer;

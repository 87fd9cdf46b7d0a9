pub mod buffer;
pub mod segment;

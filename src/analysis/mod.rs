pub mod analyzer;
pub mod chords;
pub mod consolidate;
pub mod sheet;
pub mod types;

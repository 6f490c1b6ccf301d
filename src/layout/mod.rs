pub mod band;
pub mod grid;

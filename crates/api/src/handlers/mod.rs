pub mod generation;
pub mod images;

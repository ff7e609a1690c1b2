pub mod generator;
pub mod summary;

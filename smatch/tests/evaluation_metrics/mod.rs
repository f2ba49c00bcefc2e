pub mod alignment;
pub mod scoring;

pub mod sampler;
pub mod scoring;

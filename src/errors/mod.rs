pub mod sample;

pub use sample::{SampleError, SampleResult};

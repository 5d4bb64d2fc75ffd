pub mod pipeline;
pub mod preprocess;

pub use pipeline::Pipeline;
pub use preprocess::Preprocessor;

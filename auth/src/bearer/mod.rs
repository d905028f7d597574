pub mod errors;
pub mod extractor;

pub use errors::BearerError;
pub use extractor::BearerExtractor;

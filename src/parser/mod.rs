use crate::error::ConversionError;

pub mod html;
pub mod markdown;

/// A single step of the conversion pipeline.
pub trait ParserProcedure: Clone {
    fn process(&self, input: &str) -> Result<String, ConversionError>;
}

//! Error types shared across crates.

/// The shorthand result type carrying an [`error_stack::Report`].
pub type CustomResult<T, E> = Result<T, error_stack::Report<E>>;

#[derive(Debug, thiserror::Error)]
pub enum ParsingError {
    #[error("Failed to parse {0} from the response")]
    StructParseFailure(&'static str),
    #[error("Failed to serialize {0}")]
    EncodeError(&'static str),
    #[error("Failed to convert i64 value {0} to decimal")]
    I64ToDecimalConversionFailure(i64),
    #[error("Failed to convert f64 value {0} to decimal")]
    FloatToDecimalConversionFailure(f64),
    #[error("Failed to convert decimal value to i64")]
    DecimalToI64ConversionFailure,
    #[error("Failed to convert decimal value to f64")]
    DecimalToF64ConversionFailure,
}

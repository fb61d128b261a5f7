/// Errors raised while turning a .ui document into Swift
use thiserror::Error;

/// A document-level failure. Any of these aborts the current document; nothing is written.
#[derive(Error, Debug)]
pub enum TransformError {
    /// The byte stream is not well-formed XML.
    #[error("malformed XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// An end tag arrived with no open element left to close.
    #[error("unbalanced end tag </{0}>")]
    UnbalancedElement(String),

    /// The document ended while elements were still open.
    #[error("document ended inside <{0}>")]
    UnclosedElement(String),

    /// The document has no `<ui>` element or no top-level `<widget>`.
    #[error("missing <{0}> element")]
    MissingElement(&'static str),

    /// A mandatory attribute is absent.
    #[error("<{element}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    /// A `<property>` (or similar wrapper) has no value child.
    #[error("property '{0}' has no value")]
    MissingValue(String),

    /// A value that must be an integer is not one.
    #[error("expected an integer for '{context}', found '{value}'")]
    InvalidNumber { context: String, value: String },
}

impl TransformError {
    pub fn missing_attribute(element: &str, attribute: &'static str) -> Self {
        TransformError::MissingAttribute {
            element: element.to_string(),
            attribute,
        }
    }

    pub fn invalid_number(context: &str, value: &str) -> Self {
        TransformError::InvalidNumber {
            context: context.to_string(),
            value: value.to_string(),
        }
    }
}

/// Parse a decimal integer the way Designer writes them (surrounding whitespace allowed).
pub fn parse_int(context: &str, value: &str) -> Result<i64, TransformError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| TransformError::invalid_number(context, value))
}

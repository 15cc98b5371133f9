use crate::schema::FieldType;

/// Category of a decode error. Lets the caller decide between skipping a
/// record and stopping the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input data: skip the record (dead-letter candidate).
    Format,
    /// Schema or decoder configuration the format cannot serve: permanent,
    /// every following record will fail the same way.
    Config,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Format => f.write_str("format"),
            ErrorKind::Config => f.write_str("config"),
        }
    }
}

/// Failure while converting one payload node to its declared type.
///
/// Raised at the point of detection and propagated unchanged through the
/// recursive container cases.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoerceError {
    #[error("expected {expected}, found JSON {found}")]
    TypeMismatch { expected: FieldType, found: &'static str },

    #[error("type is not supported: {0}")]
    UnsupportedType(FieldType),

    #[error("cannot read {text:?} as {expected}")]
    InvalidScalar { expected: FieldType, text: String },
}

/// Terminal error of a single `deserialize` call. One bad field fails the
/// whole record; there is no partial row.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("field '{field}' ({field_type}): {source}")]
    Coercion {
        field: String,
        field_type: FieldType,
        source: CoerceError,
    },

    #[error("config error: {0}")]
    Config(String),
}

impl DecodeError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        DecodeError::MalformedPayload(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        DecodeError::Config(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::MalformedPayload(_) => ErrorKind::Format,
            DecodeError::Coercion { source: CoerceError::UnsupportedType(_), .. } => ErrorKind::Config,
            DecodeError::Coercion { .. } => ErrorKind::Format,
            DecodeError::Config(_) => ErrorKind::Config,
        }
    }

    /// Add context to the error.
    ///
    /// For message-carrying variants, context is prepended to the message.
    /// `Coercion` already names its field and is returned as is.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            DecodeError::MalformedPayload(msg) => DecodeError::MalformedPayload(format!("{ctx}: {msg}")),
            DecodeError::Config(msg) => DecodeError::Config(format!("{ctx}: {msg}")),
            other => other,
        }
    }
}

// ---------------------------------------------------------------------------
// From impls: parser errors → DecodeError::MalformedPayload
// ---------------------------------------------------------------------------

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        Self::malformed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_separates_config_from_data() {
        let unsupported = DecodeError::Coercion {
            field: "T.RAW".into(),
            field_type: FieldType::Bytes,
            source: CoerceError::UnsupportedType(FieldType::Bytes),
        };
        assert_eq!(unsupported.kind(), ErrorKind::Config);

        let mismatch = DecodeError::Coercion {
            field: "T.ITEMS".into(),
            field_type: FieldType::array(FieldType::Int64),
            source: CoerceError::TypeMismatch {
                expected: FieldType::array(FieldType::Int64),
                found: "object",
            },
        };
        assert_eq!(mismatch.kind(), ErrorKind::Format);
        assert_eq!(DecodeError::malformed("x").kind(), ErrorKind::Format);
        assert_eq!(DecodeError::config("x").kind(), ErrorKind::Config);
    }

    #[test]
    fn test_display() {
        let err = DecodeError::Coercion {
            field: "T.ITEMS".into(),
            field_type: FieldType::array(FieldType::Int64),
            source: CoerceError::TypeMismatch {
                expected: FieldType::array(FieldType::Int64),
                found: "object",
            },
        };
        assert_eq!(
            err.to_string(),
            "field 'T.ITEMS' (array<int64>): expected array<int64>, found JSON object"
        );
        assert_eq!(
            DecodeError::malformed("eof").with_context("orders").to_string(),
            "malformed payload: orders: eof"
        );
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = DecodeError::from(parse_err);
        assert!(matches!(err, DecodeError::MalformedPayload(_)));
    }
}

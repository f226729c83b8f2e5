//! Decode failures.

use snipgraph_bytecode::{CodecError, LookupError};
use snipgraph_core::MethodKey;

use super::NotDefined;

/// Fatal decode error. Every variant names the key or symbol at fault.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("no snippet graph registered for {0}")]
    NotFound(MethodKey),
    #[error("no graph variant of {key} for receiver {}", receiver.as_deref().unwrap_or("<none>"))]
    AmbiguousReceiver {
        key: MethodKey,
        receiver: Option<String>,
    },
    #[error("cannot resolve {symbol} from any of [{}]: {cause}", tried.join(", "))]
    UnresolvableSymbol {
        symbol: String,
        /// Accessing types in the order they were tried.
        tried: Vec<String>,
        #[source]
        cause: NotDefined,
    },
    #[error("graph for {key} is malformed: {violation}")]
    StructuralViolation { key: MethodKey, violation: String },
    #[error("corrupt encoding of {key}")]
    Corrupt {
        key: MethodKey,
        #[source]
        cause: CodecError,
    },
}

impl From<LookupError> for DecodeError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound(key) => DecodeError::NotFound(key),
            LookupError::AmbiguousReceiver { key, receiver } => {
                DecodeError::AmbiguousReceiver { key, receiver }
            }
        }
    }
}

impl DecodeError {
    pub(crate) fn structural(key: &MethodKey, violation: impl Into<String>) -> Self {
        DecodeError::StructuralViolation {
            key: key.clone(),
            violation: violation.into(),
        }
    }
}

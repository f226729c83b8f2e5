//! Encoding failures. All of them are build-fatal.

use snipgraph_bytecode::RegistryError;
use snipgraph_core::{InternalKind, KeyError, MethodKey};
use snipgraph_decoder::DecodeError;

/// An object that must not leave the producer process.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{} object cannot be encoded: {description}", kind.name())]
pub struct FilterError {
    pub kind: InternalKind,
    pub description: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("{key} is claimed by two distinct methods")]
    DuplicateKey { key: MethodKey },
    #[error("static snippet {key} cannot have a receiver")]
    StaticWithReceiver { key: MethodKey },
    #[error("conflicting graph for {key} with receiver {}", receiver.as_deref().unwrap_or("<none>"))]
    ConflictingVariant {
        key: MethodKey,
        receiver: Option<String>,
    },
    #[error(
        "constant parameter {index} of {key} has type {type_name}, which is neither primitive nor compiler-internal"
    )]
    NonConstantType {
        key: MethodKey,
        index: usize,
        type_name: String,
    },
    #[error("method {method} not inlined in snippet {snippet}")]
    NotInlined { method: MethodKey, snippet: MethodKey },
    #[error("invalid graph for {key}: {reason}")]
    InvalidGraph { key: MethodKey, reason: String },
    #[error("cannot encode {key}")]
    Filter {
        key: MethodKey,
        #[source]
        cause: FilterError,
    },
    #[error("round trip of {key} failed")]
    RoundTrip {
        key: MethodKey,
        #[source]
        cause: DecodeError,
    },
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

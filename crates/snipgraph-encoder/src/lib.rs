#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Build-time encoder for snipgraph.
//!
//! Collects snippet graphs, checks that they can leave the producer process,
//! rewrites their objects into symbolic form, and freezes everything into a
//! [`snipgraph_bytecode::Container`]. Optionally re-decodes each graph to
//! prove the encoding round-trips.

mod canonical;
mod checks;
mod config;
mod encoder;
mod error;
mod filter;
mod invariants;
mod publish;
mod verify;

#[cfg(test)]
mod publish_tests;
#[cfg(test)]
mod test_utils;

pub use canonical::{canonical_graph_string, compare_graph_strings};
pub use config::EncoderConfig;
pub use encoder::{SnippetEncoder, SnippetRegistration};
pub use error::{EncodeError, FilterError};
pub use filter::SymbolicObjectFilter;
pub use publish::Publication;
pub use verify::{RestrictedReflection, RoundTrip, verify_round_trip};

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Decoder for encoded snippet containers.
//!
//! Turns a `(method, receiver, constant arguments)` request into a live
//! graph whose handles belong to the consuming process.

pub mod decode;

pub use decode::{
    ContainerDecode, DecodeError, DecodeOptions, DecodeRequest, DecodedGraph, NotDefined,
    Resolver, TableResolver, verify_graph,
};

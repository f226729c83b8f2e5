//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use snipgraph_core::{MethodKey, Object};

use crate::SnippetRegistration;

/// Key of the first registered graph embedding `object`.
pub(crate) fn ensure_owner(pending: &[SnippetRegistration], object: &Object) -> MethodKey {
    pending
        .iter()
        .find(|r| r.graph.objects().any(|o| o == object))
        .map(SnippetRegistration::key)
        .unwrap_or_else(|| panic!("object table holds a {} no graph embeds", object.kind_name()))
}

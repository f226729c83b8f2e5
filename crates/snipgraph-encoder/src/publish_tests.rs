use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::test_utils::{load_count_graph, static_method};
use crate::{EncodeError, EncoderConfig, Publication, SnippetEncoder, SnippetRegistration};

fn build() -> Result<snipgraph_bytecode::Container, EncodeError> {
    let mut enc = SnippetEncoder::new(EncoderConfig::new());
    enc.register_snippet(SnippetRegistration::new(static_method("make", "()I"), load_count_graph()))?;
    enc.freeze()
}

#[test]
fn builds_once_across_threads() {
    static PUBLICATION: Publication = Publication::new();
    let builds = AtomicUsize::new(0);
    let builds = &builds;

    let containers: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                s.spawn(move || {
                    PUBLICATION
                        .get_or_build(|| {
                            builds.fetch_add(1, Ordering::SeqCst);
                            build()
                        })
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(builds.load(Ordering::SeqCst), 1);
    assert!(containers.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert!(PUBLICATION.get().is_some());
}

#[test]
fn failed_build_publishes_nothing() {
    let publication = Publication::new();

    let err = publication
        .get_or_build(|| Err::<snipgraph_bytecode::Container, _>("not yet"))
        .unwrap_err();
    assert_eq!(err, "not yet");
    assert!(publication.get().is_none());

    let container = publication.get_or_build(build).unwrap();
    assert_eq!(container.graphs().len(), 1);
    assert!(Arc::ptr_eq(&container, &publication.get().unwrap()));
}

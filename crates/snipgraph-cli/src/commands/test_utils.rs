//! Container fixtures written to temporary files.

use std::path::PathBuf;

use snipgraph_bytecode::{
    Container, ContainerParts, GraphRegistry, ObjectTable, Parameter, ParameterInfo,
    SnippetTypeRegistry, SymbolicRef, SymbolicType, TableEntry,
};
use snipgraph_core::{MethodKey, NodeKind, Object};
use tempfile::TempDir;

pub(crate) fn key(s: &str) -> MethodKey {
    MethodKey::parse(s).unwrap()
}

pub(crate) fn sample_container() -> Container {
    let objects = ObjectTable::new([
        TableEntry::Plain(Object::Int(7)),
        TableEntry::Symbolic(SymbolicRef::Type(SymbolicType { name: "Foo".into() })),
    ]);

    let mut graphs = GraphRegistry::new();
    let params = ParameterInfo::new([Parameter::named("n").constant()]);
    graphs
        .register(key("Foo.bar(I)I"), 0, None, params, None)
        .unwrap();
    for (receiver, offset) in [("X", 40), ("Y", 88)] {
        graphs
            .register(
                key("Foo.baz()V"),
                offset,
                Some(key("Foo.orig()V")),
                ParameterInfo::new([Parameter::new().non_null()]),
                Some(receiver),
            )
            .unwrap();
    }

    let mut snippet_types = SnippetTypeRegistry::new();
    snippet_types.lookup_or_create("Word");

    Container::new(ContainerParts {
        blob: vec![0; 96],
        objects,
        node_classes: vec![NodeKind::Start, NodeKind::Return],
        graphs,
        snippet_types,
    })
}

/// Persist the sample container; the directory must outlive the path.
pub(crate) fn sample_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snippets.snpg");
    sample_container().write_to(&path).unwrap();
    (dir, path)
}

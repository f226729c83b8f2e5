//! Hand-built containers for decoder tests.

use snipgraph_bytecode::{
    Container, ContainerParts, GraphEncoder, GraphRegistry, ObjectTable, ParameterInfo,
    SnippetTypeRegistry, SymbolicField, SymbolicMethod, SymbolicRef, SymbolicStamp, SymbolicType,
    TableEntry,
};
use snipgraph_core::{FieldHandle, Graph, MethodKey, Object, Stamp};

struct Snippet {
    key: MethodKey,
    graph: Graph,
    receiver: Option<String>,
    original: Option<MethodKey>,
    params: ParameterInfo,
    at: Option<u32>,
}

/// Collects graphs and freezes them into a [`Container`] with a minimal
/// symbolizing filter.
#[derive(Default)]
pub(super) struct Fixture {
    snippets: Vec<Snippet>,
    snippet_types: SnippetTypeRegistry,
}

impl Fixture {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn graph(mut self, key: &str, receiver: Option<&str>, graph: Graph) -> Self {
        self.snippets.push(Snippet {
            key: MethodKey::parse(key).unwrap(),
            graph,
            receiver: receiver.map(str::to_string),
            original: None,
            params: ParameterInfo::default(),
            at: None,
        });
        self
    }

    /// Place the last graph at a fixed blob offset.
    pub(super) fn at(mut self, offset: u32) -> Self {
        self.snippets.last_mut().unwrap().at = Some(offset);
        self
    }

    pub(super) fn original(mut self, key: &str) -> Self {
        self.snippets.last_mut().unwrap().original = Some(MethodKey::parse(key).unwrap());
        self
    }

    pub(super) fn params(mut self, params: ParameterInfo) -> Self {
        self.snippets.last_mut().unwrap().params = params;
        self
    }

    pub(super) fn snippet_method(mut self, declaring: &str, name: &str, descriptor: &str) -> Self {
        self.snippet_types.add_method(declaring, name, descriptor, true);
        self
    }

    pub(super) fn build(self) -> Container {
        let mut encoder = GraphEncoder::new();
        let natural: Vec<u32> = self
            .snippets
            .iter()
            .map(|s| encoder.encode(&s.graph))
            .collect();
        let parts = encoder.into_parts();

        let mut blob = parts.blob;
        let mut offsets = natural.clone();
        if self.snippets.iter().any(|s| s.at.is_some()) {
            let mut placed = Vec::new();
            for (i, snippet) in self.snippets.iter().enumerate() {
                let start = natural[i] as usize;
                let end = natural.get(i + 1).map_or(blob.len(), |&o| o as usize);
                let target = snippet.at.map_or(placed.len(), |o| o as usize);
                assert!(target >= placed.len(), "graph {i} overlaps its predecessor");
                placed.resize(target, 0);
                placed.extend_from_slice(&blob[start..end]);
                offsets[i] = target as u32;
            }
            blob = placed;
        }

        let mut graphs = GraphRegistry::new();
        for (snippet, offset) in self.snippets.into_iter().zip(offsets) {
            graphs
                .register(
                    snippet.key,
                    offset,
                    snippet.original,
                    snippet.params,
                    snippet.receiver.as_deref(),
                )
                .unwrap();
        }

        Container::new(ContainerParts {
            blob,
            objects: ObjectTable::new(parts.objects.iter().map(symbolize)),
            node_classes: parts.node_classes,
            graphs,
            snippet_types: self.snippet_types,
        })
    }
}

fn symbolic_field(f: &FieldHandle) -> SymbolicField {
    SymbolicField {
        declaring: f.declaring().name().to_string(),
        name: f.name().to_string(),
        field_type: f.field_type().name().to_string(),
        is_static: f.is_static(),
    }
}

pub(super) fn symbolize(object: &Object) -> TableEntry {
    let symbolic = match object {
        Object::Type(t) => SymbolicRef::Type(SymbolicType {
            name: t.name().to_string(),
        }),
        Object::Method(m) => SymbolicRef::Method(SymbolicMethod {
            declaring: m.declaring().name().to_string(),
            name: m.name().to_string(),
            descriptor: m.descriptor().to_string(),
        }),
        Object::Field(f) => SymbolicRef::Field(symbolic_field(f)),
        Object::FieldLocation(f) => SymbolicRef::FieldLocation(symbolic_field(f)),
        Object::Stamp(Stamp::Object(s)) if s.type_.is_some() => SymbolicRef::Stamp(SymbolicStamp {
            type_name: s.type_.as_ref().map(|t| t.name().to_string()).unwrap_or_default(),
            exact: s.exact,
            non_null: s.non_null,
            always_null: s.always_null,
        }),
        Object::Constant(c) => return TableEntry::Wrapped(c.clone()),
        Object::SourcePosition(_) => return TableEntry::Null,
        other => return TableEntry::Plain(other.clone()),
    };
    TableEntry::Symbolic(symbolic)
}

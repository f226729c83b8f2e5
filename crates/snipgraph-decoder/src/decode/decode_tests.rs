use snipgraph_bytecode::{ContainerParts, GraphRegistry, ParameterInfo};
use snipgraph_core::{
    BlockId, FieldHandle, Graph, MethodKey, Node, NodeKind, Object, ObjectConstant, TypeHandle,
    TypeOrigin,
};

use super::test_fixtures::Fixture;
use super::*;

/// Start, one payload node, return.
fn graph_with(payload: Node) -> Graph {
    let mut g = Graph::new();
    g.add_node(BlockId::START, Node::new(NodeKind::Start));
    let value = g.add_node(BlockId::START, payload);
    g.add_node(BlockId::START, Node::new(NodeKind::Return).with_inputs([value]));
    g
}

fn constant_graph(value: i64) -> Graph {
    graph_with(Node::new(NodeKind::Constant).with_object(Object::Int(value)))
}

fn new_instance_of(name: &str) -> Graph {
    graph_with(Node::new(NodeKind::New).with_object(Object::Type(TypeHandle::new(name, 900))))
}

fn payload(decoded: &DecodedGraph) -> &Node {
    decoded.graph.node(NodeId::new(1)).unwrap()
}

fn key(text: &str) -> MethodKey {
    MethodKey::parse(text).unwrap()
}

#[test]
fn static_and_virtual_variants() {
    let container = Fixture::new()
        .graph("Foo.bar(I)I", None, constant_graph(0))
        .at(0)
        .graph("Foo.baz()V", Some("X"), constant_graph(40))
        .at(40)
        .graph("Foo.baz()V", Some("Y"), constant_graph(88))
        .at(88)
        .build();

    let mut resolver = TableResolver::new();
    let foo = resolver.add_type("Foo");
    let bar = resolver.add_method(&foo, "bar", "(I)I", true);
    let baz = resolver.add_method(&foo, "baz", "()V", false);
    let y = resolver.add_type("Y");
    let z = resolver.add_type("Z");

    let decoded = container.decode(&DecodeRequest::new(bar), &resolver).unwrap();
    assert_eq!(decoded.offset, 0);
    assert_eq!(decoded.method, key("Foo.bar(I)I"));

    let request = DecodeRequest::new(baz.clone()).receiver(y);
    let decoded = container.decode(&request, &resolver).unwrap();
    assert_eq!(decoded.offset, 88);
    assert_eq!(payload(&decoded).objects, vec![Object::Int(88)]);

    let request = DecodeRequest::new(baz.clone()).receiver(z);
    let err = container.decode(&request, &resolver).unwrap_err();
    assert_eq!(
        err,
        DecodeError::AmbiguousReceiver {
            key: key("Foo.baz()V"),
            receiver: Some("Z".to_string()),
        }
    );

    let err = container.decode(&DecodeRequest::new(baz), &resolver).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::AmbiguousReceiver { receiver: None, .. }
    ));
}

#[test]
fn static_lookup_ignores_receiver() {
    let container = Fixture::new()
        .graph("Foo.bar(I)I", None, constant_graph(7))
        .build();
    let mut resolver = TableResolver::new();
    let foo = resolver.add_type("Foo");
    let bar = resolver.add_method(&foo, "bar", "(I)I", true);

    let request = DecodeRequest::new(bar).receiver(foo);
    let decoded = container.decode(&request, &resolver).unwrap();

    assert_eq!(payload(&decoded).objects, vec![Object::Int(7)]);
}

#[test]
fn instance_method_with_static_entry() {
    let container = Fixture::new()
        .graph("Foo.baz()V", None, constant_graph(12))
        .build();
    let mut resolver = TableResolver::new();
    let foo = resolver.add_type("Foo");
    let baz = resolver.add_method(&foo, "baz", "()V", false);

    let with_receiver = DecodeRequest::new(baz.clone()).receiver(foo);
    let decoded = container.decode(&with_receiver, &resolver).unwrap();
    assert_eq!(decoded.offset, 0);
    assert_eq!(payload(&decoded).objects, vec![Object::Int(12)]);

    let decoded = container.decode(&DecodeRequest::new(baz), &resolver).unwrap();
    assert_eq!(payload(&decoded).objects, vec![Object::Int(12)]);
}

#[test]
fn missing_key_is_not_found() {
    let container = Fixture::new()
        .graph("Foo.bar(I)I", None, constant_graph(0))
        .build();
    let mut resolver = TableResolver::new();
    let foo = resolver.add_type("Foo");
    let other = resolver.add_method(&foo, "other", "()V", true);

    let err = container.decode(&DecodeRequest::new(other), &resolver).unwrap_err();

    assert_eq!(err, DecodeError::NotFound(key("Foo.other()V")));
    insta::assert_snapshot!(err, @"no snippet graph registered for Foo.other()V");
}

#[test]
fn unresolvable_symbol_lists_every_accessing_type() {
    let container = Fixture::new()
        .graph("Foo.bar(I)I", None, new_instance_of("Removed.Type"))
        .build();
    let mut resolver = TableResolver::new();
    let foo = resolver.add_type("Foo");
    let bar = resolver.add_method(&foo, "bar", "(I)I", true);
    let a = resolver.add_type("A");
    let b = resolver.add_type("B");

    let request = DecodeRequest::new(bar).accessing_type(a).accessing_type(b);
    let err = container.decode(&request, &resolver).unwrap_err();

    assert_eq!(
        err,
        DecodeError::UnresolvableSymbol {
            symbol: "type Removed.Type".to_string(),
            tried: vec!["A".to_string(), "B".to_string()],
            cause: NotDefined("Removed.Type".to_string()),
        }
    );
    insta::assert_snapshot!(err, @"cannot resolve type Removed.Type from any of [A, B]: Removed.Type is not defined");
}

#[test]
fn later_accessing_type_resolves_after_earlier_fails() {
    let container = Fixture::new()
        .graph("Foo.bar(I)I", None, new_instance_of("Bar"))
        .build();
    let mut resolver = TableResolver::new();
    let foo = resolver.add_type("Foo");
    let bar_type = resolver.add_type("Bar");
    let bar = resolver.add_method(&foo, "bar", "(I)I", true);
    let a = resolver.add_type("A");
    let b = resolver.add_type("B");
    resolver.restrict("A", ["Foo"]);

    let only_a = DecodeRequest::new(bar.clone()).accessing_type(a.clone());
    assert!(matches!(
        container.decode(&only_a, &resolver),
        Err(DecodeError::UnresolvableSymbol { .. })
    ));

    let both = DecodeRequest::new(bar).accessing_type(a).accessing_type(b);
    let decoded = container.decode(&both, &resolver).unwrap();
    assert_eq!(payload(&decoded).objects, vec![Object::Type(bar_type)]);
}

#[test]
fn accessing_type_defaults_to_declaring_type() {
    let container = Fixture::new()
        .graph("Foo.bar(I)I", None, new_instance_of("Bar"))
        .build();
    let mut resolver = TableResolver::new();
    let foo = resolver.add_type("Foo");
    resolver.add_type("Bar");
    let bar = resolver.add_method(&foo, "bar", "(I)I", true);
    resolver.restrict("Foo", []);

    let err = container.decode(&DecodeRequest::new(bar), &resolver).unwrap_err();

    let DecodeError::UnresolvableSymbol { tried, .. } = err else {
        panic!("expected UnresolvableSymbol, got {err:?}");
    };
    assert_eq!(tried, vec!["Foo".to_string()]);
}

#[test]
fn fields_bind_to_consumer_handles() {
    let producer_foo = TypeHandle::new("Foo", 900);
    let producer_field = FieldHandle::new(
        producer_foo,
        "count",
        TypeHandle::new("int", 901),
        false,
        902,
    );
    let graph = graph_with(
        Node::new(NodeKind::LoadField).with_object(Object::Field(producer_field)),
    );
    let container = Fixture::new().graph("Foo.bar(I)I", None, graph).build();

    let mut resolver = TableResolver::new();
    let foo = resolver.add_type("Foo");
    let int = resolver.add_type("int");
    let count = resolver.add_field(&foo, "count", &int, false);
    let bar = resolver.add_method(&foo, "bar", "(I)I", true);

    let decoded = container.decode(&DecodeRequest::new(bar), &resolver).unwrap();

    assert_eq!(payload(&decoded).field(), Some(&count));
}

#[test]
fn snippet_types_resolve_before_consumer() {
    let word = TypeHandle::new("Word", 900);
    let read = snipgraph_core::MethodHandle::new(word.clone(), "read", "(J)J", true, 901);
    let graph = graph_with(
        Node::new(NodeKind::ForeignCall)
            .with_object(Object::Method(read))
            .with_object(Object::Type(word)),
    );
    let container = Fixture::new()
        .graph("Foo.bar(I)I", None, graph)
        .snippet_method("Word", "read", "(J)J")
        .build();
    let mut resolver = TableResolver::new();
    let foo = resolver.add_type("Foo");
    let bar = resolver.add_method(&foo, "bar", "(I)I", true);
    let before = resolver.resolution_count();

    let decoded = container.decode(&DecodeRequest::new(bar), &resolver).unwrap();

    let node = payload(&decoded);
    let Object::Type(ty) = &node.objects[1] else {
        panic!("expected a type, got {:?}", node.objects[1]);
    };
    assert_eq!(ty.origin(), TypeOrigin::Snippet);
    assert_eq!(node.objects[0].as_method().map(|m| m.declaring().origin()), Some(TypeOrigin::Snippet));
    assert_eq!(resolver.resolution_count(), before);
}

#[test]
fn counters_fold_unless_enabled() {
    let counter = ObjectConstant::new("SnippetCounter", "allocations");
    let graph = graph_with(
        Node::new(NodeKind::Constant).with_object(Object::Constant(counter.clone())),
    );
    let container = Fixture::new().graph("Foo.bar(I)I", None, graph).build();
    let mut resolver = TableResolver::new();
    let foo = resolver.add_type("Foo");
    let bar = resolver.add_method(&foo, "bar", "(I)I", true);

    let folded = container
        .decode(&DecodeRequest::new(bar.clone()), &resolver)
        .unwrap();
    assert_eq!(
        payload(&folded).objects,
        vec![Object::Constant(ObjectConstant::new("SnippetCounter", "DISABLED"))]
    );

    let live = DecodeRequest::new(bar).options(DecodeOptions::new().counters_enabled(true));
    let decoded = container.decode(&live, &resolver).unwrap();
    assert_eq!(payload(&decoded).objects, vec![Object::Constant(counter)]);
}

#[test]
fn wrapped_constants_go_through_resolver() {
    struct NoHeap(TableResolver);

    impl Resolver for NoHeap {
        fn resolve_type(&self, name: &str, accessing: &TypeHandle) -> Result<TypeHandle, NotDefined> {
            self.0.resolve_type(name, accessing)
        }

        fn resolve_method(
            &self,
            declaring: &TypeHandle,
            name: &str,
            descriptor: &str,
            accessing: &TypeHandle,
        ) -> Result<snipgraph_core::MethodHandle, NotDefined> {
            self.0.resolve_method(declaring, name, descriptor, accessing)
        }

        fn resolve_field(
            &self,
            declaring: &TypeHandle,
            name: &str,
            field_type: &TypeHandle,
            is_static: bool,
            accessing: &TypeHandle,
        ) -> Result<FieldHandle, NotDefined> {
            self.0
                .resolve_field(declaring, name, field_type, is_static, accessing)
        }

        fn resolve_constant(&self, constant: &ObjectConstant) -> Result<ObjectConstant, NotDefined> {
            Err(NotDefined(constant.to_string()))
        }
    }

    let graph = graph_with(
        Node::new(NodeKind::Constant)
            .with_object(Object::Constant(ObjectConstant::new("Config", "INSTANCE"))),
    );
    let container = Fixture::new().graph("Foo.bar(I)I", None, graph).build();
    let mut inner = TableResolver::new();
    let foo = inner.add_type("Foo");
    let bar = inner.add_method(&foo, "bar", "(I)I", true);

    let err = container
        .decode(&DecodeRequest::new(bar), &NoHeap(inner))
        .unwrap_err();

    insta::assert_snapshot!(err, @"cannot resolve constant Config:INSTANCE from any of []: Config:INSTANCE is not defined");
}

#[test]
fn out_of_range_object_index_is_corrupt() {
    let mut graphs = GraphRegistry::new();
    graphs
        .register(key("Foo.bar(I)I"), 0, None, ParameterInfo::default(), None)
        .unwrap();
    // one node of class 0 referencing object 3, no assumptions, no blocks
    let container = snipgraph_bytecode::Container::new(ContainerParts {
        blob: vec![1, 0, 0, 1, 3, 0, 0],
        node_classes: vec![NodeKind::Start],
        graphs,
        ..ContainerParts::default()
    });
    let mut resolver = TableResolver::new();
    let foo = resolver.add_type("Foo");
    let bar = resolver.add_method(&foo, "bar", "(I)I", true);

    let err = container.decode(&DecodeRequest::new(bar), &resolver).unwrap_err();

    assert_eq!(
        err,
        DecodeError::Corrupt {
            key: key("Foo.bar(I)I"),
            cause: snipgraph_bytecode::CodecError::ObjectIndexOutOfRange { index: 3, len: 0 },
        }
    );
}

#[test]
fn truncated_blob_is_corrupt() {
    let mut graphs = GraphRegistry::new();
    graphs
        .register(key("Foo.bar(I)I"), 0, None, ParameterInfo::default(), None)
        .unwrap();
    let container = snipgraph_bytecode::Container::new(ContainerParts {
        blob: vec![2, 0, 0],
        node_classes: vec![NodeKind::Start],
        graphs,
        ..ContainerParts::default()
    });
    let mut resolver = TableResolver::new();
    let foo = resolver.add_type("Foo");
    let bar = resolver.add_method(&foo, "bar", "(I)I", true);

    let err = container.decode(&DecodeRequest::new(bar), &resolver).unwrap_err();

    assert!(matches!(err, DecodeError::Corrupt { .. }), "{err:?}");
}

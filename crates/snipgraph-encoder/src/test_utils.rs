//! Producer-side fixtures shared by encoder tests.

use snipgraph_core::{BlockId, FieldHandle, Graph, MethodHandle, Node, NodeKind, Object, TypeHandle};
use snipgraph_decoder::TableResolver;

pub(crate) fn foo() -> TypeHandle {
    TypeHandle::new("Foo", 1)
}

pub(crate) fn int() -> TypeHandle {
    TypeHandle::new("int", 2)
}

pub(crate) fn count_field() -> FieldHandle {
    FieldHandle::new(foo(), "count", int(), false, 3)
}

pub(crate) fn static_method(name: &str, descriptor: &str) -> MethodHandle {
    MethodHandle::new(foo(), name, descriptor, true, 10)
}

pub(crate) fn virtual_method(name: &str, descriptor: &str) -> MethodHandle {
    MethodHandle::new(foo(), name, descriptor, false, 11)
}

/// Start block holding `Start`, the given nodes, then `Return`.
pub(crate) fn straight_line(nodes: impl IntoIterator<Item = Node>) -> Graph {
    let mut g = Graph::new();
    g.add_node(BlockId::START, Node::new(NodeKind::Start));
    let mut last = None;
    for node in nodes {
        last = Some(g.add_node(BlockId::START, node));
    }
    g.add_node(
        BlockId::START,
        Node::new(NodeKind::Return).with_inputs(last),
    );
    g
}

/// `new Foo; load count; return`.
pub(crate) fn load_count_graph() -> Graph {
    let mut g = Graph::new();
    g.add_node(BlockId::START, Node::new(NodeKind::Start));
    let obj = g.add_node(
        BlockId::START,
        Node::new(NodeKind::New).with_object(Object::Type(foo())),
    );
    let load = g.add_node(
        BlockId::START,
        Node::new(NodeKind::LoadField)
            .with_inputs([obj])
            .with_object(Object::Field(count_field())),
    );
    g.add_node(BlockId::START, Node::new(NodeKind::Return).with_inputs([load]));
    g
}

/// Resolver that knows everything the fixtures reference.
pub(crate) fn producer() -> TableResolver {
    let mut resolver = TableResolver::new();
    let foo = resolver.add_type("Foo");
    let int = resolver.add_type("int");
    resolver.add_field(&foo, "count", &int, false);
    for (name, descriptor) in [("bar", "(I)I"), ("make", "()I"), ("helper", "()V")] {
        resolver.add_method(&foo, name, descriptor, true);
    }
    resolver.add_method(&foo, "baz", "()V", false);
    resolver
}

use super::*;

fn foo() -> TypeHandle {
    TypeHandle::new("Foo", 1)
}

#[test]
fn build_two_block_graph() {
    let mut g = Graph::new();
    let p = g.add_floating(Node::new(NodeKind::Parameter).with_object(Object::Int(0)));
    g.add_node(BlockId::START, Node::new(NodeKind::Start));
    let exit = g.add_block();
    g.connect(BlockId::START, exit);
    let ret = g.add_node(exit, Node::new(NodeKind::Return).with_inputs([p]));

    assert_eq!(g.block_count(), 2);
    assert_eq!(g.node(ret).map(|n| n.inputs.clone()), Some(vec![p]));
    let floating: Vec<_> = g.floating_nodes().map(|(id, _)| id).collect();
    assert_eq!(floating, vec![p]);
    let (_, start) = g.blocks().next().unwrap();
    assert_eq!(start.successors, vec![exit]);
}

#[test]
fn node_accessors() {
    let field = FieldHandle::new(foo(), "count", TypeHandle::new("int", 0), false, 7);
    let load = Node::new(NodeKind::LoadField)
        .with_object(Object::Field(field.clone()))
        .with_object(Object::Stamp(Stamp::Int { bits: 32 }));

    assert_eq!(load.field(), Some(&field));
    assert_eq!(load.stamp(), Some(&Stamp::Int { bits: 32 }));
    assert_eq!(load.call_target(), None);

    let m = MethodHandle::new(foo(), "bar", "()V", true, 3);
    let target = Node::new(NodeKind::MethodCallTarget).with_object(Object::Method(m.clone()));
    assert_eq!(target.call_target(), Some(&m));
}

#[test]
fn stamps_include_pair_halves() {
    let pair = StampPair::new(
        Stamp::object(ObjectStamp::of(foo())),
        Stamp::object(ObjectStamp::default()),
    );
    let node = Node::new(NodeKind::Parameter).with_object(Object::StampPair(pair));

    assert_eq!(node.stamps().count(), 2);
}

#[test]
fn replace_node_keeps_id() {
    let mut g = Graph::new();
    let id = g.add_node(BlockId::START, Node::new(NodeKind::PartialIntrinsicCallTarget));

    let old = g.replace_node(id, Node::new(NodeKind::MethodCallTarget));

    assert_eq!(old.kind, NodeKind::PartialIntrinsicCallTarget);
    assert_eq!(g.node(id).map(|n| n.kind), Some(NodeKind::MethodCallTarget));
}

#[test]
fn objects_lists_assumptions_first() {
    let mut g = Graph::new();
    g.add_floating(Node::new(NodeKind::Constant).with_object(Object::Int(4)));
    g.add_assumption(Object::Str("leaf type".into()));

    let objects: Vec<_> = g.objects().cloned().collect();
    assert_eq!(objects, vec![Object::Str("leaf type".into()), Object::Int(4)]);
}

#[test]
fn kind_names_round_trip() {
    for kind in NodeKind::ALL {
        assert_eq!(NodeKind::from_name(kind.name()), Some(kind));
    }
}

#[test]
#[should_panic(expected = "referenced before it was added")]
fn dangling_input_panics() {
    let mut g = Graph::new();
    g.add_node(
        BlockId::START,
        Node::new(NodeKind::Return).with_inputs([NodeId::new(5)]),
    );
}

#[test]
fn parameter_index_reads_first_int() {
    let p = Node::new(NodeKind::Parameter)
        .with_object(Object::Stamp(Stamp::Int { bits: 32 }))
        .with_object(Object::Int(2));
    let k = Node::new(NodeKind::Constant).with_object(Object::Int(2));

    assert_eq!(p.parameter_index(), Some(2));
    assert_eq!(k.parameter_index(), None);
}

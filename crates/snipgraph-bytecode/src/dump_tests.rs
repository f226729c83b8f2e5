use indoc::indoc;
use snipgraph_core::{Colors, MethodKey, NodeKind, Object, ObjectConstant};

use super::*;

fn key(s: &str) -> MethodKey {
    MethodKey::parse(s).unwrap()
}

fn sample_container() -> Container {
    let objects = ObjectTable::new([
        TableEntry::Plain(Object::Int(1)),
        TableEntry::Symbolic(SymbolicRef::Type(SymbolicType { name: "Foo".into() })),
        TableEntry::Symbolic(SymbolicRef::Method(SymbolicMethod {
            declaring: "Foo".into(),
            name: "bar".into(),
            descriptor: "(I)I".into(),
        })),
        TableEntry::Wrapped(ObjectConstant::new("SnippetCounter", "hits")),
        TableEntry::Null,
        TableEntry::Plain(Object::NamedLocation("ANY".into())),
    ]);

    let mut graphs = GraphRegistry::new();
    let params = ParameterInfo::new([Parameter::new().constant(), Parameter::new()]);
    graphs
        .register(key("Foo.bar(I)I"), 0, None, params, None)
        .unwrap();
    for (receiver, offset) in [("X", 40), ("Y", 88)] {
        graphs
            .register(
                key("Foo.baz()V"),
                offset,
                Some(key("Foo.orig()V")),
                ParameterInfo::default(),
                Some(receiver),
            )
            .unwrap();
    }

    let mut snippet_types = SnippetTypeRegistry::new();
    snippet_types.add_method("SnippetCounter", "inc", "()V", false);
    snippet_types.lookup_or_create("Word[]");

    Container::new(ContainerParts {
        blob: vec![0; 96],
        objects,
        node_classes: vec![NodeKind::Start, NodeKind::Return],
        graphs,
        snippet_types,
    })
}

#[test]
fn dump_sections() {
    let res = dump(&sample_container(), Colors::OFF);

    insta::assert_snapshot!(res, @r"
    [objects]
    O0 int 1
    O1 type Foo
    O2 method Foo.bar(I)I
    O3 wrapped SnippetCounter:hits
    O4 null
    O5 location ANY

    [snippet_types]
    T0 SnippetCounter
      inc()V
    T1 Word
    T2 Word[]  ; component Word

    [graphs]
    Foo.bar(I)I  static @0000  ; const params 0
    Foo.baz()V   X @0040  ; substitutes Foo.orig()V
                 Y @0088

    [blob]
    size = 96
    node_classes = [Start, Return]
    ");
}

#[test]
fn dump_marks_resolved_slots() {
    let container = sample_container();
    container
        .objects()
        .get(ObjectIndex(1))
        .unwrap()
        .publish(Object::Int(0));

    let res = dump(&container, Colors::OFF);
    assert!(res.contains("O1 type Foo *\n"));
    assert!(res.contains("O2 method Foo.bar(I)I\n"));
}

#[test]
fn dump_with_colors() {
    let res = dump(&sample_container(), Colors::ON);

    assert!(res.starts_with("\x1b[34m[objects]\x1b[0m\n"));
    assert!(res.contains("\x1b[33mtype Foo\x1b[0m"));
    assert!(res.contains("\x1b[36mFoo.bar(I)I\x1b[0m"));
}

#[test]
fn dump_empty_container() {
    let res = dump(&Container::new(ContainerParts::default()), Colors::OFF);

    assert_eq!(
        res,
        indoc! {"
            [objects]

            [snippet_types]

            [graphs]

            [blob]
            size = 0
            node_classes = []
        "}
    );
}

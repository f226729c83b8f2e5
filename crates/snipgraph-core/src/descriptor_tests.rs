use super::*;

#[test]
fn key_formats_and_splits() {
    let key = MethodKey::new("Foo", "bar", "(I)I");

    assert_eq!(key.as_str(), "Foo.bar(I)I");
    assert_eq!(
        key.parts(),
        KeyParts {
            declaring: "Foo",
            name: "bar",
            descriptor: "(I)I",
        }
    );
}

#[test]
fn key_parse_keeps_dotted_declaring_type() {
    let key = MethodKey::parse("java.lang.String.valueOf(I)Ljava/lang/String;").unwrap();

    assert_eq!(key.declaring_type(), "java.lang.String");
    assert_eq!(key.name(), "valueOf");
    assert_eq!(key.descriptor(), "(I)Ljava/lang/String;");
}

#[test]
fn key_parse_constructor() {
    let key = MethodKey::parse("Foo.<init>([CI)V").unwrap();
    assert_eq!(key.name(), "<init>");
}

#[test]
fn key_parse_rejects_malformed() {
    assert_eq!(
        MethodKey::parse("Foo.bar"),
        Err(KeyError::MissingDescriptor("Foo.bar".into()))
    );
    assert_eq!(
        MethodKey::parse("bar()V"),
        Err(KeyError::MissingName("bar()V".into()))
    );
    assert!(matches!(
        MethodKey::parse("Foo.bar(Q)V"),
        Err(KeyError::MalformedDescriptor { position: 1, .. })
    ));
}

#[test]
fn descriptor_parses_params() {
    let desc = MethodDescriptor::parse("(IJ[Ljava/lang/Object;Z)V").unwrap();

    assert_eq!(desc.params(), ["I", "J", "[Ljava/lang/Object;", "Z"]);
    assert_eq!(desc.return_descriptor(), "V");
    assert_eq!(desc.param_type_name(2).as_deref(), Some("java.lang.Object[]"));
    assert_eq!(desc.param_type_name(4), None);
}

#[test]
fn descriptor_rejects_void_param_and_trailing_bytes() {
    assert!(MethodDescriptor::parse("(V)V").is_err());
    assert!(MethodDescriptor::parse("()VV").is_err());
    assert!(MethodDescriptor::parse("(I").is_err());
    assert!(MethodDescriptor::parse("(L;)V").is_err());
}

#[test]
fn type_names_from_descriptors() {
    assert_eq!(descriptor_to_type_name("I"), "int");
    assert_eq!(descriptor_to_type_name("[[B"), "byte[][]");
    assert_eq!(descriptor_to_type_name("Lfoo/Bar;"), "foo.Bar");
}

use super::CliError;
use super::lookup::{LookupArgs, render};
use super::test_utils::sample_file;

fn lookup(key: &str, receiver: Option<&str>) -> Result<String, CliError> {
    let (_dir, path) = sample_file();
    render(&LookupArgs {
        container: path,
        key: key.to_string(),
        receiver: receiver.map(str::to_string),
    })
}

#[test]
fn static_graph() {
    let out = lookup("Foo.bar(I)I", None).unwrap();

    insta::assert_snapshot!(out, @r"
    Foo.bar(I)I
      static
      offset    0
      param 0   n constant
    ");
}

#[test]
fn static_graph_ignores_receiver() {
    let out = lookup("Foo.bar(I)I", Some("X")).unwrap();

    assert!(out.contains("  static\n"));
}

#[test]
fn virtual_graph_by_receiver() {
    let out = lookup("Foo.baz()V", Some("Y")).unwrap();

    insta::assert_snapshot!(out, @r"
    Foo.baz()V
      receiver  Y
      offset    88
      original  Foo.orig()V
      param 0   _ non-null
    ");
}

#[test]
fn unknown_receiver() {
    let err = lookup("Foo.baz()V", Some("Z")).unwrap_err();

    insta::assert_snapshot!(err.to_string(), @r#"no graph variant of Foo.baz()V for receiver Some("Z")"#);
}

#[test]
fn unknown_key() {
    let err = lookup("Foo.nope()V", None).unwrap_err();

    assert!(matches!(err, CliError::Lookup(_)));
}

#[test]
fn malformed_key() {
    let err = lookup("Foo.bar", None).unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"method key `Foo.bar` has no descriptor");
}

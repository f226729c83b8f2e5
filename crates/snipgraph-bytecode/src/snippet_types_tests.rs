use snipgraph_core::TypeOrigin;

use super::*;

#[test]
fn array_types_create_component_chain() {
    let mut reg = SnippetTypeRegistry::new();
    let arr = reg.lookup_or_create("Word[][]").clone();

    assert_eq!(arr.component.as_deref(), Some("Word[]"));
    assert_eq!(reg.len(), 3);
    assert_eq!(reg.get("Word").unwrap().array_of.as_deref(), Some("Word[]"));
    assert_eq!(reg.get("Word[]").unwrap().array_of.as_deref(), Some("Word[][]"));
    assert_eq!(reg.get("Word").unwrap().component, None);
}

#[test]
fn lookup_or_create_is_idempotent() {
    let mut reg = SnippetTypeRegistry::new();
    let first = reg.lookup_or_create("SnippetCounter").id;
    let again = reg.lookup_or_create("SnippetCounter").id;

    assert_eq!(first, again);
    assert!(first >= SNIPPET_ID_BASE);
    assert_eq!(reg.len(), 1);
}

#[test]
fn methods_become_snippet_handles() {
    let mut reg = SnippetTypeRegistry::new();
    reg.add_method("SnippetCounter", "inc", "()V", false);
    reg.add_method("SnippetCounter", "inc", "()V", false);

    assert_eq!(reg.get("SnippetCounter").unwrap().methods.len(), 1);

    let handle = reg.method_handle("SnippetCounter", "inc", "()V").unwrap();
    assert_eq!(handle.key().as_str(), "SnippetCounter.inc()V");
    assert_eq!(handle.declaring().origin(), TypeOrigin::Snippet);
    assert!(reg.method_handle("SnippetCounter", "dec", "()V").is_none());
    assert!(reg.type_handle("Missing").is_none());
}

use crate::{Interner, Symbol};

#[test]
fn intern_deduplicates() {
    let mut interner = Interner::new();

    let a = interner.intern_str("foo");
    let b = interner.intern_str("foo");
    let c = interner.intern_str("bar");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.len(), 2);
}

#[test]
fn resolve_returns_value() {
    let mut interner = Interner::new();

    let sym = interner.intern("hello".to_string());
    assert_eq!(interner.resolve(sym), "hello");
    assert_eq!(interner.try_resolve(Symbol::from_raw(7)), None);
}

#[test]
fn structural_keys_alias() {
    let mut interner: Interner<(u8, String, String)> = Interner::new();

    let a = interner.intern((1, "Foo".into(), "bar".into()));
    let b = interner.intern((1, "Foo".into(), "bar".into()));
    let c = interner.intern((2, "Foo".into(), "bar".into()));

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.get(&(2, "Foo".to_string(), "bar".to_string())), Some(c));
}

#[test]
fn symbol_ordering_is_insertion_order() {
    let mut interner = Interner::new();

    let z = interner.intern_str("z");
    let a = interner.intern_str("a");

    assert!(z < a);
    assert_eq!(z.as_u32(), 0);
}

#[test]
fn iter_yields_in_insertion_order() {
    let mut interner = Interner::new();
    interner.intern_str("x");
    interner.intern_str("y");
    interner.intern_str("x");

    let items: Vec<_> = interner.iter().map(|(s, v)| (s.as_u32(), v.as_str())).collect();
    assert_eq!(items, vec![(0, "x"), (1, "y")]);
    assert!(!interner.is_empty());
}

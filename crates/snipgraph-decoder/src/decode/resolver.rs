//! Consumer-side resolution of symbolic names.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use snipgraph_core::{FieldHandle, Interner, MethodHandle, MethodKey, ObjectConstant, TypeHandle};

/// A name the consumer cannot see from a given accessing type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0} is not defined")]
pub struct NotDefined(pub String);

/// Binds symbolic names to the consumer's live handles.
///
/// Every method must be a pure function of its arguments: concurrent decodes
/// may resolve the same slot and race to publish the result.
pub trait Resolver: Send + Sync {
    fn resolve_type(&self, name: &str, accessing: &TypeHandle) -> Result<TypeHandle, NotDefined>;

    fn resolve_method(
        &self,
        declaring: &TypeHandle,
        name: &str,
        descriptor: &str,
        accessing: &TypeHandle,
    ) -> Result<MethodHandle, NotDefined>;

    fn resolve_field(
        &self,
        declaring: &TypeHandle,
        name: &str,
        field_type: &TypeHandle,
        is_static: bool,
        accessing: &TypeHandle,
    ) -> Result<FieldHandle, NotDefined>;

    /// Re-materialize a wrapped heap constant.
    fn resolve_constant(&self, constant: &ObjectConstant) -> Result<ObjectConstant, NotDefined> {
        Ok(constant.clone())
    }
}

const PRIMITIVES: [&str; 9] = [
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Array handles share the elemental id, shifted by the dimension count.
const ARRAY_DIM_SHIFT: u32 = 40;

/// In-memory [`Resolver`] over explicitly registered handles.
///
/// Primitive types and arrays of any resolvable type are always defined.
/// Visibility can be narrowed per accessing type with [`TableResolver::restrict`].
#[derive(Debug)]
pub struct TableResolver {
    types: Interner<String>,
    methods: HashMap<MethodKey, MethodHandle>,
    fields: HashMap<(String, String), FieldHandle>,
    visible: HashMap<String, HashSet<String>>,
    next_member_id: u64,
    resolutions: AtomicUsize,
}

impl Default for TableResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TableResolver {
    pub fn new() -> Self {
        let mut types = Interner::new();
        for name in PRIMITIVES {
            types.intern_str(name);
        }
        Self {
            types,
            methods: HashMap::new(),
            fields: HashMap::new(),
            visible: HashMap::new(),
            next_member_id: 0,
            resolutions: AtomicUsize::new(0),
        }
    }

    pub fn add_type(&mut self, name: &str) -> TypeHandle {
        let sym = self.types.intern_str(name);
        TypeHandle::new(name, u64::from(sym.as_u32()))
    }

    pub fn add_method(
        &mut self,
        declaring: &TypeHandle,
        name: &str,
        descriptor: &str,
        is_static: bool,
    ) -> MethodHandle {
        let key = MethodKey::new(declaring.name(), name, descriptor);
        if let Some(existing) = self.methods.get(&key) {
            return existing.clone();
        }
        let handle = MethodHandle::new(
            declaring.clone(),
            name,
            descriptor,
            is_static,
            self.fresh_member_id(),
        );
        self.methods.insert(key, handle.clone());
        handle
    }

    pub fn add_field(
        &mut self,
        declaring: &TypeHandle,
        name: &str,
        field_type: &TypeHandle,
        is_static: bool,
    ) -> FieldHandle {
        let key = (declaring.name().to_string(), name.to_string());
        if let Some(existing) = self.fields.get(&key) {
            return existing.clone();
        }
        let handle = FieldHandle::new(
            declaring.clone(),
            name,
            field_type.clone(),
            is_static,
            self.fresh_member_id(),
        );
        self.fields.insert(key, handle.clone());
        handle
    }

    /// Limit the types visible from `accessing` to `visible` (plus itself and primitives).
    pub fn restrict<'a>(&mut self, accessing: &str, visible: impl IntoIterator<Item = &'a str>) {
        let set = self.visible.entry(accessing.to_string()).or_default();
        set.extend(visible.into_iter().map(str::to_string));
        set.insert(accessing.to_string());
    }

    /// Number of successful resolutions served so far.
    pub fn resolution_count(&self) -> usize {
        self.resolutions.load(Ordering::Relaxed)
    }

    fn fresh_member_id(&mut self) -> u64 {
        self.next_member_id += 1;
        self.next_member_id
    }

    fn is_visible(&self, name: &str, accessing: &TypeHandle) -> bool {
        let elemental = name.trim_end_matches("[]");
        if PRIMITIVES.contains(&elemental) {
            return true;
        }
        self.visible
            .get(accessing.name())
            .is_none_or(|set| set.contains(elemental))
    }

    fn hit<T>(&self, value: T) -> Result<T, NotDefined> {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
        Ok(value)
    }
}

impl Resolver for TableResolver {
    fn resolve_type(&self, name: &str, accessing: &TypeHandle) -> Result<TypeHandle, NotDefined> {
        let elemental = name.trim_end_matches("[]");
        let dims = ((name.len() - elemental.len()) / 2) as u64;
        let sym = self
            .types
            .get(elemental)
            .filter(|_| self.is_visible(name, accessing))
            .ok_or_else(|| NotDefined(name.to_string()))?;
        let id = u64::from(sym.as_u32()) | (dims << ARRAY_DIM_SHIFT);
        self.hit(TypeHandle::new(name, id))
    }

    fn resolve_method(
        &self,
        declaring: &TypeHandle,
        name: &str,
        descriptor: &str,
        accessing: &TypeHandle,
    ) -> Result<MethodHandle, NotDefined> {
        let key = MethodKey::new(declaring.name(), name, descriptor);
        if !self.is_visible(declaring.name(), accessing) {
            return Err(NotDefined(key.to_string()));
        }
        match self.methods.get(&key) {
            Some(m) => self.hit(m.clone()),
            None => Err(NotDefined(key.to_string())),
        }
    }

    fn resolve_field(
        &self,
        declaring: &TypeHandle,
        name: &str,
        field_type: &TypeHandle,
        is_static: bool,
        accessing: &TypeHandle,
    ) -> Result<FieldHandle, NotDefined> {
        let label = format!("{}.{name}", declaring.name());
        if !self.is_visible(declaring.name(), accessing) {
            return Err(NotDefined(label));
        }
        let key = (declaring.name().to_string(), name.to_string());
        match self.fields.get(&key) {
            Some(f) if f.is_static() == is_static && f.field_type().name() == field_type.name() => {
                self.hit(f.clone())
            }
            _ => Err(NotDefined(label)),
        }
    }
}

//! Live values as seen by the recorder at an instrumentation point.
//!
//! Composite values are shared (`Rc`) so that the walker can tell two
//! references to the same object apart from two equal objects.

use std::any::type_name;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Capability for values with enumerable named fields.
///
/// Anything that does not implement this is treated as opaque by the walker.
pub trait Inspect {
    /// Runtime type name used for snapshot nodes and reference markers.
    fn type_name(&self) -> &str;

    /// Current field bindings, in declaration order.
    fn fields(&self) -> Vec<(String, Value)>;
}

impl<T: Inspect> Inspect for RefCell<T> {
    fn type_name(&self) -> &str {
        // The name is needed even while the cell is mutably borrowed.
        short_type_name::<T>()
    }

    fn fields(&self) -> Vec<(String, Value)> {
        match self.try_borrow() {
            Ok(inner) => inner.fields(),
            Err(_) => Vec::new(),
        }
    }
}

/// Shared handle to a composite value.
#[derive(Clone)]
pub struct ObjectRef(Rc<dyn Inspect>);

impl ObjectRef {
    pub fn new<T: Inspect + 'static>(object: Rc<T>) -> Self {
        Self(object)
    }

    /// Address of the shared allocation; stable for the object's lifetime.
    pub fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn type_name(&self) -> &str {
        self.0.type_name()
    }

    pub fn fields(&self) -> Vec<(String, Value)> {
        self.0.fields()
    }

    pub fn same_object(&self, other: &ObjectRef) -> bool {
        self.identity() == other.identity()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} @ {:#x}>", self.type_name(), self.identity())
    }
}

/// A host value with no field structure and no serializable form
/// (file handles, closures, sockets).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque {
    type_name: String,
}

impl Opaque {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }

    /// Opaque stand-in for any Rust value, named after its type.
    pub fn of<T: ?Sized>(_value: &T) -> Self {
        Self::new(short_type_name::<T>())
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// A variable binding visible at an instrumentation point.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Object(ObjectRef),
    Opaque(Opaque),
}

impl Value {
    pub fn object<T: Inspect + 'static>(object: &Rc<T>) -> Self {
        Value::Object(ObjectRef::new(Rc::clone(object)))
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::None
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! int_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(value as i64)
                }
            }
        )*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32, usize, isize);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::None)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Inspect + 'static> From<Rc<T>> for Value {
    fn from(value: Rc<T>) -> Self {
        Value::Object(ObjectRef::new(value))
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Value::Object(value)
    }
}

impl From<Opaque> for Value {
    fn from(value: Opaque) -> Self {
        Value::Opaque(value)
    }
}

/// Dynamic object with a type name and a mutable attribute bag.
///
/// Attributes keep their first-assignment order. Reference cycles between
/// instances are allowed and are never freed.
pub struct Instance {
    type_name: String,
    attrs: RefCell<Vec<(String, Value)>>,
}

impl Instance {
    pub fn new(type_name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            type_name: type_name.into(),
            attrs: RefCell::new(Vec::new()),
        })
    }

    pub fn set(&self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        let mut attrs = self.attrs.borrow_mut();
        match attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, slot)) => *slot = value,
            None => attrs.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.attrs
            .borrow()
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
}

impl Inspect for Instance {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn fields(&self) -> Vec<(String, Value)> {
        self.attrs.borrow().clone()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} instance>", self.type_name)
    }
}

/// Last path segment of a type name, with generics left intact.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

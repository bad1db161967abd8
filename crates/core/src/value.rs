//! Runtime values.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::{OrderedMap, ValueError};

// ──────────────────────────────────────────────
// Shared cells
// ──────────────────────────────────────────────

/// A mutable slot shared by every holder of the handle.
///
/// Cloning a `SharedCell` clones the handle. A write through any clone is
/// seen by all of them, which is how a by-reference collection element is
/// represented.
#[derive(Clone, Default)]
pub struct SharedCell(Rc<RefCell<Value>>);

impl SharedCell {
    pub fn new(value: Value) -> Self {
        SharedCell(Rc::new(RefCell::new(value)))
    }

    /// Returns a copy of the current contents.
    pub fn get(&self) -> Value {
        self.0.borrow().clone()
    }

    /// Replaces the contents, returning the previous value.
    pub fn set(&self, value: Value) -> Value {
        self.0.replace(value)
    }

    /// Applies `f` to the contents in place.
    pub fn update<R>(&self, f: impl FnOnce(&mut Value) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    /// True when both handles point at the same cell.
    pub fn ptr_eq(&self, other: &SharedCell) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(inner) => f.debug_tuple("SharedCell").field(&*inner).finish(),
            Err(_) => f.write_str("SharedCell(<borrowed>)"),
        }
    }
}

// ──────────────────────────────────────────────
// Values
// ──────────────────────────────────────────────

/// A runtime value. `Null` doubles as the absent sentinel.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Decimal(Decimal),
    Text(String),
    Map(OrderedMap),
    Ref(SharedCell),
}

impl Value {
    /// Wraps `value` in a fresh shared cell.
    pub fn shared(value: Value) -> Value {
        Value::Ref(SharedCell::new(value))
    }

    /// Returns a human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Decimal(_) => "Decimal",
            Value::Text(_) => "Text",
            Value::Map(_) => "Map",
            Value::Ref(_) => "Ref",
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Ref(cell) => cell.get().is_null(),
            _ => false,
        }
    }

    pub fn is_ref(&self) -> bool {
        matches!(self, Value::Ref(_))
    }

    /// The value itself, or a copy of the contents of a shared cell.
    pub fn get_value(&self) -> Value {
        match self {
            Value::Ref(cell) => cell.get().get_value(),
            other => other.clone(),
        }
    }

    /// Like [`Value::get_value`], but consumes `self`.
    pub fn into_value(self) -> Value {
        match self {
            Value::Ref(cell) => cell.get().into_value(),
            other => other,
        }
    }

    /// Copies nested maps recursively. Shared cells keep pointing at the
    /// same cell in the copy.
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::Map(m) => Value::Map(m.deep_copy()),
            other => other.clone(),
        }
    }

    /// Extracts an integer or returns a type error.
    pub fn as_int(&self) -> Result<i64, ValueError> {
        match self {
            Value::Int(i) => Ok(*i),
            Value::Ref(cell) => cell.get().as_int(),
            other => Err(ValueError::TypeMismatch {
                expected: "Int",
                got: other.type_name(),
            }),
        }
    }

    /// Borrows a string or returns a type error. Shared cells are rejected;
    /// use [`Value::get_value`] first.
    pub fn as_str(&self) -> Result<&str, ValueError> {
        match self {
            Value::Text(s) => Ok(s),
            other => Err(ValueError::TypeMismatch {
                expected: "Text",
                got: other.type_name(),
            }),
        }
    }

    /// Borrows a nested map or returns a type error.
    pub fn as_map(&self) -> Result<&OrderedMap, ValueError> {
        match self {
            Value::Map(m) => Ok(m),
            other => Err(ValueError::TypeMismatch {
                expected: "Map",
                got: other.type_name(),
            }),
        }
    }

    /// Loose integer conversion.
    ///
    /// Null is 0, booleans are 0 or 1, decimals truncate toward zero, text
    /// reads its leading integer (0 when there is none) and maps are 0 when
    /// empty and 1 otherwise.
    pub fn to_int(&self) -> i64 {
        match self {
            Value::Null => 0,
            Value::Bool(b) => i64::from(*b),
            Value::Int(i) => *i,
            Value::Decimal(d) => d.trunc().to_i64().unwrap_or(0),
            Value::Text(s) => leading_int(s),
            Value::Map(m) => i64::from(!m.is_empty()),
            Value::Ref(cell) => cell.get().to_int(),
        }
    }
}

fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let magnitude = rest[..end].parse::<i64>().unwrap_or(0);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Ref(a), Value::Ref(b)) if a.ptr_eq(b) => true,
            (Value::Ref(a), b) => a.get() == *b,
            (a, Value::Ref(b)) => *a == b.get(),
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a.same_entries(b),
            _ => false,
        }
    }
}

/// Loose string form: null and `false` are empty, `true` is `1`, maps
/// render as `Array`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::Bool(false) => Ok(()),
            Value::Bool(true) => f.write_str("1"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Decimal(d) => write!(f, "{}", d.normalize()),
            Value::Text(s) => f.write_str(s),
            Value::Map(_) => f.write_str("Array"),
            Value::Ref(cell) => write!(f, "{}", cell.get()),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<OrderedMap> for Value {
    fn from(m: OrderedMap) -> Self {
        Value::Map(m)
    }
}

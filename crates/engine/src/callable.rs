//! Combining functions.
//!
//! The engine hands a callable one tuple per round. Arguments arrive as a
//! mutable slice: a callable may overwrite a slot, and the engine writes the
//! slot back into the input collection after the call. Slots that hold a
//! shared cell alias the input element, so writing through the cell is seen
//! by every holder.

use zipmap_core::{OrderedMap, Value};

use crate::CallbackError;

/// A function from a fixed-arity tuple of values to one value.
pub trait Callable {
    fn invoke(&mut self, args: &mut [Value]) -> Result<Value, CallbackError>;

    /// Rejects a call shape before any round runs. `arity` is the number of
    /// input collections.
    fn check(&self, _arity: usize) -> Result<(), String> {
        Ok(())
    }
}

impl<F> Callable for F
where
    F: FnMut(&mut [Value]) -> Result<Value, CallbackError>,
{
    fn invoke(&mut self, args: &mut [Value]) -> Result<Value, CallbackError> {
        self(args)
    }
}

/// Adapts an infallible function that only reads its arguments.
pub fn pure<F>(f: F) -> Pure<F>
where
    F: FnMut(&[Value]) -> Value,
{
    Pure(f)
}

/// See [`pure`].
pub struct Pure<F>(F);

impl<F> Callable for Pure<F>
where
    F: FnMut(&[Value]) -> Value,
{
    fn invoke(&mut self, args: &mut [Value]) -> Result<Value, CallbackError> {
        Ok((self.0)(args))
    }
}

/// Wraps a callable that only accepts a fixed number of arguments.
pub struct Arity<C> {
    inner: C,
    arity: usize,
}

impl<C: Callable> Arity<C> {
    pub fn new(arity: usize, inner: C) -> Self {
        Self { inner, arity }
    }
}

impl<C: Callable> Callable for Arity<C> {
    fn invoke(&mut self, args: &mut [Value]) -> Result<Value, CallbackError> {
        self.inner.invoke(args)
    }

    fn check(&self, arity: usize) -> Result<(), String> {
        if arity != self.arity {
            return Err(format!(
                "callback expects {} argument(s), {} input collection(s) given",
                self.arity, arity
            ));
        }
        self.inner.check(arity)
    }
}

/// The implicit function used when several inputs are given without one.
///
/// Each round becomes a row: a new map holding copies of the tuple values
/// under keys `0..N`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipRows;

impl Callable for ZipRows {
    fn invoke(&mut self, args: &mut [Value]) -> Result<Value, CallbackError> {
        let row: OrderedMap = args.iter().map(|v| v.get_value().deep_copy()).collect();
        Ok(Value::Map(row))
    }
}

//! Forward-only cursor over one input collection.

use zipmap_core::{Key, OrderedMap, Value};

use crate::CursorError;

/// Position of a cursor within its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    NotStarted,
    /// Positioned on the entry at this insertion index.
    At(usize),
    /// Past the last entry. Never left once entered.
    Exhausted,
}

/// Walks one [`OrderedMap`] in insertion order and can write values back
/// into it.
#[derive(Debug)]
pub struct Adapter<'a> {
    map: &'a mut OrderedMap,
    state: CursorState,
}

impl<'a> Adapter<'a> {
    pub fn new(map: &'a mut OrderedMap) -> Self {
        Self {
            map,
            state: CursorState::NotStarted,
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Number of entries in the bound collection.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn is_positioned(&self) -> bool {
        matches!(self.state, CursorState::At(_))
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == CursorState::Exhausted
    }

    /// Moves to the next entry. Returns false once there is none; an
    /// exhausted cursor stays exhausted.
    pub fn advance(&mut self) -> bool {
        let next = match self.state {
            CursorState::NotStarted => 0,
            CursorState::At(i) => i + 1,
            CursorState::Exhausted => return false,
        };
        if next < self.map.len() {
            self.state = CursorState::At(next);
            true
        } else {
            self.state = CursorState::Exhausted;
            false
        }
    }

    pub fn current_key(&self) -> Option<&Key> {
        match self.state {
            CursorState::At(i) => self.map.get_index(i).map(|(k, _)| k),
            _ => None,
        }
    }

    /// The current value, or `Null` when not positioned.
    ///
    /// A shared cell is returned as a handle to the same cell.
    pub fn current_value(&self) -> Value {
        match self.state {
            CursorState::At(i) => self
                .map
                .get_index(i)
                .map(|(_, v)| v.clone())
                .unwrap_or_default(),
            _ => Value::Null,
        }
    }

    /// Stores `value` at the current position.
    ///
    /// When the slot holds a shared cell, the cell's contents are replaced
    /// so that every alias observes the write; otherwise the slot itself is
    /// rebound.
    pub fn write_back(&mut self, value: Value) -> Result<(), CursorError> {
        let CursorState::At(i) = self.state else {
            return Err(CursorError::NotPositioned);
        };
        let (_, slot) = self
            .map
            .get_index_mut(i)
            .ok_or(CursorError::NotPositioned)?;
        match slot {
            Value::Ref(cell) => {
                cell.set(value);
            }
            other => *other = value,
        }
        Ok(())
    }
}

//! Shared in-process table with a monotonic id counter.

use std::collections::BTreeMap;
use std::sync::RwLock;

/// Failures of the in-process table itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A writer panicked while holding the lock.
    #[error("{table} table lock poisoned")]
    Poisoned { table: &'static str },
    /// The `i32` id space is used up.
    #[error("{table} table ran out of identifiers")]
    IdsExhausted { table: &'static str },
}

/// Rows keyed by id plus the last id handed out.
///
/// `last_id` only ever grows, so deleted ids are never reissued.
#[derive(Debug)]
pub(crate) struct TableState<T> {
    last_id: i32,
    rows: BTreeMap<i32, T>,
}

impl<T> TableState<T> {
    /// Reserve the next identifier.
    pub(crate) fn allocate_id(&mut self, table: &'static str) -> Result<i32, TableError> {
        let next = self
            .last_id
            .checked_add(1)
            .ok_or(TableError::IdsExhausted { table })?;
        self.last_id = next;
        Ok(next)
    }

    pub(crate) fn rows(&self) -> &BTreeMap<i32, T> {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut BTreeMap<i32, T> {
        &mut self.rows
    }
}

impl<T> Default for TableState<T> {
    fn default() -> Self {
        Self {
            last_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

/// Lock-protected table. Iteration order is id order, which is insertion order.
#[derive(Debug)]
pub(crate) struct MemoryTable<T> {
    name: &'static str,
    state: RwLock<TableState<T>>,
}

impl<T> MemoryTable<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            state: RwLock::new(TableState::default()),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    /// Run `f` under the read lock.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&TableState<T>) -> R) -> Result<R, TableError> {
        let guard = self
            .state
            .read()
            .map_err(|_| TableError::Poisoned { table: self.name })?;
        Ok(f(&guard))
    }

    /// Run `f` under the write lock, so checks and mutations inside it are atomic.
    pub(crate) fn write<R>(
        &self,
        f: impl FnOnce(&mut TableState<T>) -> R,
    ) -> Result<R, TableError> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| TableError::Poisoned { table: self.name })?;
        Ok(f(&mut guard))
    }
}

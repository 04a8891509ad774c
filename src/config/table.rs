//! Ordered state table.

use super::StateDescriptor;
use crate::core::{Event, State};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Declared states in declaration order, with constant-time lookup.
///
/// Serializes as a map so that it reads naturally in JSON, but unlike a
/// plain map it remembers the order keys appeared in.
#[derive(Clone, Debug)]
pub struct StateTable<S: State, E: Event> {
    entries: Vec<(S, StateDescriptor<S, E>)>,
    index: HashMap<S, usize>,
}

impl<S: State, E: Event> Default for StateTable<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> PartialEq for StateTable<S, E> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<S: State, E: Event> StateTable<S, E> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Declare a state.
    ///
    /// Returns the descriptor back as `Err` if the state is already declared;
    /// the table is left unchanged in that case.
    pub fn insert(
        &mut self,
        state: S,
        descriptor: StateDescriptor<S, E>,
    ) -> Result<(), StateDescriptor<S, E>> {
        if self.index.contains_key(&state) {
            return Err(descriptor);
        }
        self.index.insert(state.clone(), self.entries.len());
        self.entries.push((state, descriptor));
        Ok(())
    }

    /// Descriptor of a declared state.
    pub fn get(&self, state: &S) -> Option<&StateDescriptor<S, E>> {
        self.index.get(state).map(|&i| &self.entries[i].1)
    }

    pub(crate) fn get_mut(&mut self, state: &S) -> Option<&mut StateDescriptor<S, E>> {
        match self.index.get(state) {
            Some(&i) => Some(&mut self.entries[i].1),
            None => None,
        }
    }

    /// Whether `state` is declared.
    pub fn contains(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// State names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &S> {
        self.entries.iter().map(|(state, _)| state)
    }

    /// States and descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &StateDescriptor<S, E>)> {
        self.entries.iter().map(|(state, descriptor)| (state, descriptor))
    }
}

impl<S: State, E: Event> Serialize for StateTable<S, E> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (state, descriptor) in &self.entries {
            map.serialize_entry(state, descriptor)?;
        }
        map.end()
    }
}

struct TableVisitor<S, E>(PhantomData<(S, E)>);

impl<'de, S: State, E: Event> Visitor<'de> for TableVisitor<S, E> {
    type Value = StateTable<S, E>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of state names to state descriptors")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut table = StateTable::new();
        while let Some((state, descriptor)) = map.next_entry::<S, StateDescriptor<S, E>>()? {
            let name = state.name().to_string();
            if table.insert(state, descriptor).is_err() {
                return Err(de::Error::custom(format!("duplicate state `{name}`")));
            }
        }
        Ok(table)
    }
}

impl<'de, S: State, E: Event> Deserialize<'de> for StateTable<S, E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

//! # Named State
//!
//! Typed views over the flat key space. A `StateMap` named
//! `"Balances.balances"` stores entry `k` at
//! `hash_fields([hash_name(name), hash_fields(k.to_fields())])`; a
//! `StateSlot` stores its single value at `hash_fields([hash_name(name)])`.
//! Distinct names therefore never share keys.

use super::{StateAccess, StateError, StateKey};
use shared_types::{hash_fields, hash_name, Field, ToFields, TokenId, TokenIdId};
use std::marker::PhantomData;

/// Values that fit in a single leaf.
pub trait StateValue: Sized {
    /// Type name used in decode errors.
    const TYPE_NAME: &'static str;

    fn to_field(&self) -> Field;

    fn from_field(field: Field) -> Option<Self>;
}

impl StateValue for Field {
    const TYPE_NAME: &'static str = "Field";

    fn to_field(&self) -> Field {
        *self
    }

    fn from_field(field: Field) -> Option<Self> {
        Some(field)
    }
}

impl StateValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn to_field(&self) -> Field {
        Field::from(*self)
    }

    fn from_field(field: Field) -> Option<Self> {
        field.to_bool()
    }
}

impl StateValue for u64 {
    const TYPE_NAME: &'static str = "u64";

    fn to_field(&self) -> Field {
        Field::from(*self)
    }

    fn from_field(field: Field) -> Option<Self> {
        field.to_u64()
    }
}

impl StateValue for u128 {
    const TYPE_NAME: &'static str = "u128";

    fn to_field(&self) -> Field {
        Field::from(*self)
    }

    fn from_field(field: Field) -> Option<Self> {
        field.to_u128()
    }
}

impl StateValue for TokenId {
    const TYPE_NAME: &'static str = "TokenId";

    fn to_field(&self) -> Field {
        TokenId::to_field(self)
    }

    fn from_field(field: Field) -> Option<Self> {
        Some(TokenId::from_field(field))
    }
}

impl StateValue for TokenIdId {
    const TYPE_NAME: &'static str = "TokenIdId";

    fn to_field(&self) -> Field {
        Field::from(self.value())
    }

    fn from_field(field: Field) -> Option<Self> {
        field.to_u64().map(TokenIdId)
    }
}

fn decode<V: StateValue>(key: StateKey, field: Field) -> Result<V, StateError> {
    V::from_field(field).ok_or(StateError::ValueDecode {
        key,
        expected: V::TYPE_NAME,
    })
}

/// Named map from `K` to `V`.
pub struct StateMap<K, V> {
    name_hash: Field,
    _marker: PhantomData<fn(K) -> V>,
}

impl<K: ToFields, V: StateValue> StateMap<K, V> {
    pub fn new(name: &str) -> Self {
        Self {
            name_hash: hash_name(name),
            _marker: PhantomData,
        }
    }

    /// Store key for entry `key`.
    pub fn key(&self, key: &K) -> StateKey {
        hash_fields(&[self.name_hash, key.digest()])
    }

    /// Entry at `key`, `None` when absent.
    pub fn get<S: StateAccess + ?Sized>(&self, state: &S, key: &K) -> Result<Option<V>, StateError> {
        let state_key = self.key(key);
        state
            .read(&state_key)
            .map(|field| decode(state_key, field))
            .transpose()
    }

    pub fn set<S: StateAccess + ?Sized>(&self, state: &mut S, key: &K, value: &V) -> Result<(), StateError> {
        state.write(self.key(key), Some(value.to_field()))
    }

    pub fn remove<S: StateAccess + ?Sized>(&self, state: &mut S, key: &K) -> Result<(), StateError> {
        state.write(self.key(key), None)
    }
}

/// Named single value.
pub struct StateSlot<V> {
    key: StateKey,
    _marker: PhantomData<fn() -> V>,
}

impl<V: StateValue> StateSlot<V> {
    pub fn new(name: &str) -> Self {
        Self {
            key: hash_fields(&[hash_name(name)]),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> StateKey {
        self.key
    }

    pub fn get<S: StateAccess + ?Sized>(&self, state: &S) -> Result<Option<V>, StateError> {
        state
            .read(&self.key)
            .map(|field| decode(self.key, field))
            .transpose()
    }

    pub fn set<S: StateAccess + ?Sized>(&self, state: &mut S, value: &V) -> Result<(), StateError> {
        state.write(self.key, Some(value.to_field()))
    }
}

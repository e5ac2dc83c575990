//! Flat key-value persistence. Every engine stores its fields under
//! `<namespace>/<Field>` and its maps under `<namespace>/<Prefix>:<key>...`,
//! with borsh-encoded values.

use anchor_lang::prelude::*;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::ErrorCode;

pub trait StateStore {
    fn get(&self, key: &str) -> Option<&[u8]>;
    fn put(&mut self, key: String, value: Vec<u8>);
    fn remove(&mut self, key: &str);
    /// Keys starting with `prefix`, in key order.
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;
}

/// An engine that can write itself into a [`StateStore`] and read itself back.
pub trait Persist: Sized {
    fn save(&self, namespace: &str, store: &mut dyn StateStore) -> Result<()>;
    fn load(namespace: &str, store: &dyn StateStore) -> Result<Self>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.entries
    }

    pub fn into_entries(self) -> BTreeMap<String, Vec<u8>> {
        self.entries
    }
}

impl From<BTreeMap<String, Vec<u8>>> for MemoryStore {
    fn from(entries: BTreeMap<String, Vec<u8>>) -> Self {
        Self { entries }
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    fn put(&mut self, key: String, value: Vec<u8>) {
        self.entries.insert(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect()
    }
}

pub fn field_key(namespace: &str, field: &str) -> String {
    format!("{}/{}", namespace, field)
}

/// Drop everything stored under `namespace`, so a save never leaves stale map entries.
pub fn clear(store: &mut dyn StateStore, namespace: &str) {
    for key in store.keys_with_prefix(&format!("{}/", namespace)) {
        store.remove(&key);
    }
}

pub fn put<T: AnchorSerialize>(store: &mut dyn StateStore, key: &str, value: &T) -> Result<()> {
    let mut buf = Vec::new();
    value
        .serialize(&mut buf)
        .map_err(|_| ErrorCode::StateCorrupted)?;
    store.put(key.to_string(), buf);
    Ok(())
}

pub fn get<T: AnchorDeserialize>(store: &dyn StateStore, key: &str) -> Result<Option<T>> {
    store
        .get(key)
        .map(|bytes| T::try_from_slice(bytes).map_err(|_| error!(ErrorCode::StateCorrupted)))
        .transpose()
}

/// Read a required field.
pub fn require_field<T: AnchorDeserialize>(store: &dyn StateStore, namespace: &str, field: &str) -> Result<T> {
    get(store, &field_key(namespace, field))?.ok_or_else(|| error!(ErrorCode::StateCorrupted))
}

/// Every entry of the map `prefix`, with the `:`-separated key parts that
/// follow the prefix.
pub fn scan<T: AnchorDeserialize>(
    store: &dyn StateStore,
    namespace: &str,
    prefix: &str,
) -> Result<Vec<(Vec<String>, T)>> {
    let head = format!("{}/{}:", namespace, prefix);
    store
        .keys_with_prefix(&head)
        .into_iter()
        .map(|key| {
            let value = get(store, &key)?.ok_or(ErrorCode::StateCorrupted)?;
            let parts = key[head.len()..].split(':').map(str::to_string).collect();
            Ok((parts, value))
        })
        .collect()
}

pub fn key_parts<const N: usize>(parts: &[String]) -> Result<&[String; N]> {
    Ok(<&[String; N]>::try_from(parts).map_err(|_| ErrorCode::StateCorrupted)?)
}

pub fn parse_address(text: &str) -> Result<Pubkey> {
    Ok(Pubkey::from_str(text).map_err(|_| ErrorCode::StateCorrupted)?)
}

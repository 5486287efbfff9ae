//! Serde support for [`Key`] and [`Value`].
//!
//! Sequences serialize as sequences and every mapping variant as a map.
//! Deserialization produces mutable containers (`List` and `Dict`); pass
//! the result through [`freeze`](crate::freeze) to obtain a frozen snapshot.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Key, MappingRef, Value};

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Bool(boolean) => serializer.serialize_bool(*boolean),
            Self::Int(integer) => serializer.serialize_i64(*integer),
            Self::Str(string) => serializer.serialize_str(string),
            Self::Frozen(hashable) => hashable.get().serialize(serializer),
        }
    }
}

struct KeyVisitor;

impl Visitor<'_> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a boolean, integer or string key")
    }

    fn visit_bool<E: de::Error>(self, boolean: bool) -> Result<Key, E> {
        Ok(Key::Bool(boolean))
    }

    fn visit_i64<E: de::Error>(self, integer: i64) -> Result<Key, E> {
        Ok(Key::Int(integer))
    }

    fn visit_u64<E: de::Error>(self, integer: u64) -> Result<Key, E> {
        i64::try_from(integer)
            .map(Key::Int)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(integer), &self))
    }

    fn visit_str<E: de::Error>(self, string: &str) -> Result<Key, E> {
        Ok(Key::from(string))
    }

    fn visit_string<E: de::Error>(self, string: String) -> Result<Key, E> {
        Ok(Key::Str(string))
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(KeyVisitor)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(boolean) => serializer.serialize_bool(*boolean),
            Self::Int(integer) => serializer.serialize_i64(*integer),
            Self::Float(float) => serializer.serialize_f64(*float),
            Self::Str(string) => serializer.serialize_str(string),
            Self::List(items) => serialize_items(items, serializer),
            Self::Tuple(items) => serialize_items(items, serializer),
            Self::Dict(entries) => serialize_mapping(MappingRef::Dict(entries), serializer),
            Self::OrderedDict(entries) => {
                serialize_mapping(MappingRef::OrderedDict(entries), serializer)
            }
            Self::Map(map) => serialize_mapping(MappingRef::Map(map), serializer),
            Self::OrderedMap(map) => serialize_mapping(MappingRef::OrderedMap(map), serializer),
        }
    }
}

fn serialize_mapping<S: Serializer>(mapping: MappingRef<'_>, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(mapping.len()))?;
    for (key, value) in mapping.iter() {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

fn serialize_items<S: Serializer>(items: &[Value], serializer: S) -> Result<S::Ok, S::Error> {
    let mut sequence = serializer.serialize_seq(Some(items.len()))?;
    for item in items {
        sequence.serialize_element(item)?;
    }
    sequence.end()
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, boolean: bool) -> Result<Value, E> {
        Ok(Value::Bool(boolean))
    }

    fn visit_i64<E: de::Error>(self, integer: i64) -> Result<Value, E> {
        Ok(Value::Int(integer))
    }

    fn visit_u64<E: de::Error>(self, integer: u64) -> Result<Value, E> {
        i64::try_from(integer)
            .map(Value::Int)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(integer), &self))
    }

    fn visit_f64<E: de::Error>(self, float: f64) -> Result<Value, E> {
        Ok(Value::Float(float))
    }

    fn visit_str<E: de::Error>(self, string: &str) -> Result<Value, E> {
        Ok(Value::from(string))
    }

    fn visit_string<E: de::Error>(self, string: String) -> Result<Value, E> {
        Ok(Value::Str(string))
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = access.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = HashMap::with_capacity(access.size_hint().unwrap_or(0).min(4096));
        while let Some((key, value)) = access.next_entry()? {
            entries.insert(key, value);
        }
        Ok(Value::Dict(entries))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

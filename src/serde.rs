//! Module for [Serde](https://docs.rs/serde/latest/serde/) integration
//!
//! [`JsonElement`] implements Serde's `Serialize` and `Deserialize`, so a tree can be created
//! from and converted to any Serde data format, for example with `serde_json`:
//! ```
//! # use treeson::tree::*;
//! let element: JsonElement = serde_json::from_str(r#"{"a": [1, 2.5, null]}"#)?;
//! assert_eq!(r#"{"a":[1,2.5,null]}"#, element.to_string());
//!
//! let json = serde_json::to_string(&element)?;
//! assert_eq!(r#"{"a":[1,2.5,null]}"#, json);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Lazy numbers ([`JsonNumber::Lazy`]) are serialized as integer or floating point number
//! depending on their text, and as string if the text is not a number at all.

use std::fmt::Formatter;

use ::serde::{
    de::{MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::tree::{JsonElement, JsonNumber, JsonObject};

impl Serialize for JsonNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonNumber::Integer(i) => serializer.serialize_i64(*i),
            JsonNumber::Unsigned(u) => serializer.serialize_u64(*u),
            JsonNumber::Float(f) => serializer.serialize_f64(*f),
            JsonNumber::Float32(f) => serializer.serialize_f32(*f),
            JsonNumber::Lazy(s) => {
                if let Ok(i) = s.parse::<i64>() {
                    serializer.serialize_i64(i)
                } else if let Ok(u) = s.parse::<u64>() {
                    serializer.serialize_u64(u)
                } else if let Ok(f) = s.parse::<f64>() {
                    serializer.serialize_f64(f)
                } else {
                    serializer.serialize_str(s)
                }
            }
        }
    }
}

impl Serialize for JsonObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for JsonElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonElement::Null => serializer.serialize_unit(),
            JsonElement::Bool(b) => serializer.serialize_bool(*b),
            JsonElement::Number(n) => n.serialize(serializer),
            JsonElement::String(s) => serializer.serialize_str(s),
            JsonElement::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            JsonElement::Object(object) => object.serialize(serializer),
        }
    }
}

struct ElementVisitor;

impl<'de> Visitor<'de> for ElementVisitor {
    type Value = JsonElement;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E> {
        Ok(JsonElement::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
        Ok(JsonElement::Number(JsonNumber::Integer(v)))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
        Ok(JsonElement::Number(JsonNumber::from(v)))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
        Ok(JsonElement::Number(JsonNumber::Float(v)))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
        Ok(JsonElement::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E> {
        Ok(JsonElement::String(v))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(JsonElement::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(JsonElement::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        JsonElement::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(JsonElement::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut object = JsonObject::new();
        while let Some((name, value)) = map.next_entry::<String, JsonElement>()? {
            object.insert(name, value);
        }
        Ok(JsonElement::Object(object))
    }
}

impl<'de> Deserialize<'de> for JsonElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ElementVisitor)
    }
}

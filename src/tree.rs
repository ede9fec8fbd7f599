//! Module for the in-memory JSON tree
//!
//! A [`JsonElement`] is a complete JSON value held in memory. It can be read token by token
//! with a [`JsonTreeReader`](crate::reader::JsonTreeReader), written to any
//! [`JsonWriter`](crate::writer::JsonWriter), and built from writer calls with a
//! [`JsonTreeWriter`](crate::writer::JsonTreeWriter).
//!
//! # Examples
//! ```
//! # use treeson::tree::*;
//! let mut object = JsonObject::new();
//! object.add_property("name", "treeson");
//! object.insert("tags", JsonElement::Array(vec!["json".into(), "tree".into()]));
//!
//! let element = JsonElement::Object(object);
//! assert_eq!(r#"{"name":"treeson","tags":["json","tree"]}"#, element.to_string());
//! ```

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use duplicate::duplicate_item;
use thiserror::Error;

use crate::{
    json_number::{format_java_fp, format_java_fp32},
    writer::{JsonStreamWriter, JsonWriter, WriterError, WriterSettings},
};

/// A JSON value held in memory
///
/// Cloning an element performs a deep copy.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum JsonElement {
    /// JSON `null`
    #[default]
    Null,
    /// JSON boolean value, `true` or `false`
    Bool(bool),
    /// JSON number value
    Number(JsonNumber),
    /// JSON string value
    String(String),
    /// JSON array: `[ ... ]`
    Array(Vec<JsonElement>),
    /// JSON object: `{ ... }`
    Object(JsonObject),
}

/// A JSON number value
///
/// Numbers keep the representation they were created from; no conversion happens until
/// one of the `to_...` methods is called.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonNumber {
    /// Signed integral number
    Integer(i64),
    /// Unsigned integral number which does not fit into `i64`
    Unsigned(u64),
    /// Floating point number
    ///
    /// The value may be NaN or infinite; such values can only be written by lenient writers.
    Float(f64),
    /// Single precision floating point number
    ///
    /// Kept separate from [`Float`](Self::Float) so that it is written with the shortest
    /// `f32` digits, for example `1.1` instead of `1.100000023841858`.
    Float32(f32),
    /// Number kept in its textual form, parsed on demand
    Lazy(String),
}

/// Error which occurs when a JSON value cannot be converted to a requested number type
#[derive(Error, PartialEq, Eq, Clone, Debug)]
#[error("cannot convert '{value}' to {target}")]
pub struct NumberConversionError {
    /// String representation of the value which could not be converted
    pub value: String,
    /// Name of the requested type, for example `i32`
    pub target: &'static str,
}

impl NumberConversionError {
    fn new(value: impl Display, target: &'static str) -> Self {
        NumberConversionError {
            value: value.to_string(),
            target,
        }
    }
}

/// Truncates toward zero if the value fits into `i64`
fn truncate_f64(value: f64) -> Option<i64> {
    // `i64::MAX as f64` rounds up to 2^63, which itself is out of range
    if value.is_finite() && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Some(value.trunc() as i64)
    } else {
        None
    }
}

pub(crate) fn parse_f64(value: &str) -> Result<f64, NumberConversionError> {
    let trimmed = value.trim();
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    // `f64::from_str` also accepts spellings such as `inf` or `nan`; only `NaN` and
    // `Infinity` are supported
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic())
        && !matches!(unsigned, "NaN" | "Infinity")
    {
        return Err(NumberConversionError::new(value, "f64"));
    }
    f64::from_str(trimmed).map_err(|_| NumberConversionError::new(value, "f64"))
}

pub(crate) fn parse_i64(value: &str) -> Result<i64, NumberConversionError> {
    i64::from_str(value).map_err(|_| NumberConversionError::new(value, "i64"))
}

pub(crate) fn parse_i32(value: &str) -> Result<i32, NumberConversionError> {
    i32::from_str(value).map_err(|_| NumberConversionError::new(value, "i32"))
}

impl JsonNumber {
    /// Converts this number to `f64`
    ///
    /// Integral numbers may lose precision. Lazy numbers are parsed.
    pub fn to_f64(&self) -> Result<f64, NumberConversionError> {
        match self {
            JsonNumber::Integer(i) => Ok(*i as f64),
            JsonNumber::Unsigned(u) => Ok(*u as f64),
            JsonNumber::Float(f) => Ok(*f),
            JsonNumber::Float32(f) => Ok(f64::from(*f)),
            JsonNumber::Lazy(s) => parse_f64(s),
        }
    }

    /// Converts this number to `i64`
    ///
    /// Floating point numbers are truncated toward zero. An error is returned if the
    /// value is out of range for `i64` or is not a number at all.
    pub fn to_i64(&self) -> Result<i64, NumberConversionError> {
        match self {
            JsonNumber::Integer(i) => Ok(*i),
            JsonNumber::Unsigned(u) => {
                i64::try_from(*u).map_err(|_| NumberConversionError::new(u, "i64"))
            }
            JsonNumber::Float(f) => {
                truncate_f64(*f).ok_or_else(|| NumberConversionError::new(f, "i64"))
            }
            JsonNumber::Float32(f) => {
                truncate_f64(f64::from(*f)).ok_or_else(|| NumberConversionError::new(f, "i64"))
            }
            JsonNumber::Lazy(s) => parse_i64(s).or_else(|e| {
                // Fall back to decimal form, for example "1.5e2"
                parse_f64(s)
                    .ok()
                    .and_then(truncate_f64)
                    .ok_or(e)
            }),
        }
    }

    /// Converts this number to `i32`
    ///
    /// Same as [`to_i64`](Self::to_i64), with an additional range check for `i32`.
    pub fn to_i32(&self) -> Result<i32, NumberConversionError> {
        let value = self
            .to_i64()
            .map_err(|e| NumberConversionError::new(e.value, "i32"))?;
        i32::try_from(value).map_err(|_| NumberConversionError::new(self, "i32"))
    }

    /// Whether this number is NaN or infinite
    pub fn is_non_finite(&self) -> bool {
        match self {
            JsonNumber::Float(f) => !f.is_finite(),
            JsonNumber::Float32(f) => !f.is_finite(),
            JsonNumber::Lazy(s) => crate::json_number::is_non_finite_literal(s),
            _ => false,
        }
    }
}

impl Display for JsonNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonNumber::Integer(i) => write!(f, "{i}"),
            JsonNumber::Unsigned(u) => write!(f, "{u}"),
            JsonNumber::Float(v) => f.write_str(&format_java_fp(*v)),
            JsonNumber::Float32(v) => f.write_str(&format_java_fp32(*v)),
            JsonNumber::Lazy(s) => f.write_str(s),
        }
    }
}

impl From<i64> for JsonNumber {
    fn from(v: i64) -> Self {
        JsonNumber::Integer(v)
    }
}

impl From<u64> for JsonNumber {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => JsonNumber::Integer(i),
            Err(_) => JsonNumber::Unsigned(v),
        }
    }
}

impl From<f32> for JsonNumber {
    fn from(v: f32) -> Self {
        JsonNumber::Float32(v)
    }
}

impl From<f64> for JsonNumber {
    fn from(v: f64) -> Self {
        JsonNumber::Float(v)
    }
}

impl JsonElement {
    /// Creates a number element which keeps the given text as is
    ///
    /// The text is not validated; writing it with a [`JsonWriter`] fails if it is not a
    /// valid JSON number. [`Display`] writes it verbatim.
    pub fn lazy_number(value: impl Into<String>) -> Self {
        JsonElement::Number(JsonNumber::Lazy(value.into()))
    }

    /// Whether this is JSON `null`
    pub fn is_null(&self) -> bool {
        matches!(self, JsonElement::Null)
    }

    /// Whether this is a JSON boolean
    pub fn is_bool(&self) -> bool {
        matches!(self, JsonElement::Bool(_))
    }

    /// Whether this is a JSON number
    pub fn is_number(&self) -> bool {
        matches!(self, JsonElement::Number(_))
    }

    /// Whether this is a JSON string
    pub fn is_string(&self) -> bool {
        matches!(self, JsonElement::String(_))
    }

    /// Whether this is a JSON array
    pub fn is_array(&self) -> bool {
        matches!(self, JsonElement::Array(_))
    }

    /// Whether this is a JSON object
    pub fn is_object(&self) -> bool {
        matches!(self, JsonElement::Object(_))
    }

    /// Whether this is a boolean, number or string
    pub fn is_primitive(&self) -> bool {
        self.is_bool() || self.is_number() || self.is_string()
    }

    #[allow(missing_docs)]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonElement::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[allow(missing_docs)]
    pub fn as_number(&self) -> Option<&JsonNumber> {
        match self {
            JsonElement::Number(n) => Some(n),
            _ => None,
        }
    }

    #[allow(missing_docs)]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonElement::String(s) => Some(s),
            _ => None,
        }
    }

    #[allow(missing_docs)]
    pub fn as_array(&self) -> Option<&Vec<JsonElement>> {
        match self {
            JsonElement::Array(a) => Some(a),
            _ => None,
        }
    }

    #[allow(missing_docs)]
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<JsonElement>> {
        match self {
            JsonElement::Array(a) => Some(a),
            _ => None,
        }
    }

    #[allow(missing_docs)]
    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonElement::Object(o) => Some(o),
            _ => None,
        }
    }

    #[allow(missing_docs)]
    pub fn as_object_mut(&mut self) -> Option<&mut JsonObject> {
        match self {
            JsonElement::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Gets the string form of a primitive value
    ///
    /// Strings are returned as is, numbers in their display form and booleans as
    /// `true` or `false`. Returns `None` for `null`, arrays and objects.
    pub fn to_string_value(&self) -> Option<String> {
        match self {
            JsonElement::Bool(b) => Some(b.to_string()),
            JsonElement::Number(n) => Some(n.to_string()),
            JsonElement::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Converts a number or numeric string to `f64`
    pub fn to_f64(&self) -> Result<f64, NumberConversionError> {
        match self {
            JsonElement::Number(n) => n.to_f64(),
            JsonElement::String(s) => parse_f64(s),
            other => Err(NumberConversionError::new(other, "f64")),
        }
    }

    /// Converts a number or integral string to `i64`
    ///
    /// Strings must contain a plain integer, optionally with leading `+` or `-`.
    pub fn to_i64(&self) -> Result<i64, NumberConversionError> {
        match self {
            JsonElement::Number(n) => n.to_i64(),
            JsonElement::String(s) => parse_i64(s),
            other => Err(NumberConversionError::new(other, "i64")),
        }
    }

    /// Converts a number or integral string to `i32`
    pub fn to_i32(&self) -> Result<i32, NumberConversionError> {
        match self {
            JsonElement::Number(n) => n.to_i32(),
            JsonElement::String(s) => parse_i32(s),
            other => Err(NumberConversionError::new(other, "i32")),
        }
    }
}

/// Like [`JsonWriter::element_value`], except that lazy numbers are written verbatim
fn write_display<W: std::io::Write>(
    json_writer: &mut JsonStreamWriter<W>,
    element: &JsonElement,
) -> Result<(), WriterError> {
    match element {
        JsonElement::Number(JsonNumber::Lazy(s)) => json_writer.json_value(s),
        JsonElement::Array(items) => {
            json_writer.begin_array()?;
            for item in items {
                write_display(json_writer, item)?;
            }
            json_writer.end_array()
        }
        JsonElement::Object(object) => {
            json_writer.begin_object()?;
            for (name, value) in object {
                json_writer.name(name)?;
                write_display(json_writer, value)?;
            }
            json_writer.end_object()
        }
        _ => json_writer.element_value(element),
    }
}

/// Writes the element as compact JSON
///
/// A lenient writer is used, so non-finite numbers are written as `NaN`, `Infinity`
/// and `-Infinity` instead of causing an error. Lazy numbers are written as they are,
/// even if they are not valid JSON numbers.
impl Display for JsonElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut json_writer = JsonStreamWriter::new_custom(
            Vec::<u8>::new(),
            WriterSettings {
                lenient: true,
                ..Default::default()
            },
        );
        write_display(&mut json_writer, self).map_err(|_| std::fmt::Error)?;
        let bytes = json_writer.into_inner().map_err(|_| std::fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}

impl From<bool> for JsonElement {
    fn from(v: bool) -> Self {
        JsonElement::Bool(v)
    }
}

impl From<JsonNumber> for JsonElement {
    fn from(v: JsonNumber) -> Self {
        JsonElement::Number(v)
    }
}

// `u64` is converted separately because it might not fit into `i64`
#[duplicate_item(type_template; [u8]; [i8]; [u16]; [i16]; [u32]; [i32]; [i64])]
impl From<type_template> for JsonElement {
    fn from(v: type_template) -> Self {
        JsonElement::Number(JsonNumber::Integer(i64::from(v)))
    }
}

impl From<u64> for JsonElement {
    fn from(v: u64) -> Self {
        JsonElement::Number(JsonNumber::from(v))
    }
}

impl From<f32> for JsonElement {
    fn from(v: f32) -> Self {
        JsonElement::Number(JsonNumber::Float32(v))
    }
}

impl From<f64> for JsonElement {
    fn from(v: f64) -> Self {
        JsonElement::Number(JsonNumber::Float(v))
    }
}

impl From<&str> for JsonElement {
    fn from(v: &str) -> Self {
        JsonElement::String(v.to_owned())
    }
}

impl From<String> for JsonElement {
    fn from(v: String) -> Self {
        JsonElement::String(v)
    }
}

impl From<char> for JsonElement {
    fn from(v: char) -> Self {
        JsonElement::String(v.to_string())
    }
}

impl From<Vec<JsonElement>> for JsonElement {
    fn from(v: Vec<JsonElement>) -> Self {
        JsonElement::Array(v)
    }
}

impl From<JsonObject> for JsonElement {
    fn from(v: JsonObject) -> Self {
        JsonElement::Object(v)
    }
}

/// Creates `null` for `None`
impl<T: Into<JsonElement>> From<Option<T>> for JsonElement {
    fn from(v: Option<T>) -> Self {
        v.map_or(JsonElement::Null, Into::into)
    }
}

/// A JSON object
///
/// Members keep the order in which they were first added. Adding a member whose name
/// already exists replaces the value but keeps the original position.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct JsonObject {
    // Lookups are linear; objects in JSON documents are usually small
    members: Vec<(String, JsonElement)>,
}

impl JsonObject {
    /// Creates an empty JSON object
    pub fn new() -> Self {
        JsonObject {
            members: Vec::new(),
        }
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|(n, _)| n == name)
    }

    /// Adds a member, returning the previous value if the name already existed
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<JsonElement>,
    ) -> Option<JsonElement> {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => Some(std::mem::replace(&mut self.members[index].1, value)),
            None => {
                self.members.push((name, value));
                None
            }
        }
    }

    /// Adds a primitive member; convenience variant of [`insert`](Self::insert) which
    /// discards the previous value
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<JsonElement>) {
        self.insert(name, value);
    }

    #[allow(missing_docs)]
    pub fn get(&self, name: &str) -> Option<&JsonElement> {
        self.position(name).map(|i| &self.members[i].1)
    }

    #[allow(missing_docs)]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut JsonElement> {
        self.position(name).map(|i| &mut self.members[i].1)
    }

    #[allow(missing_docs)]
    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Removes a member, keeping the order of the remaining members
    pub fn remove(&mut self, name: &str) -> Option<JsonElement> {
        self.position(name).map(|i| self.members.remove(i).1)
    }

    /// Iterates over the member names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates over the members in insertion order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.members.iter(),
        }
    }

    #[allow(missing_docs)]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut JsonElement)> + '_ {
        self.members.iter_mut().map(|(n, v)| (n.as_str(), v))
    }
}

/// Iterator over the members of a [`JsonObject`]
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (String, JsonElement)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a JsonElement);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(n, v)| (n.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a JsonObject {
    type Item = (&'a str, &'a JsonElement);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for JsonObject {
    type Item = (String, JsonElement);
    type IntoIter = std::vec::IntoIter<(String, JsonElement)>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<N: Into<String>, V: Into<JsonElement>> FromIterator<(N, V)> for JsonObject {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut object = JsonObject::new();
        for (name, value) in iter {
            object.insert(name, value);
        }
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_order() {
        let mut object = JsonObject::new();
        object.insert("b", 1);
        object.insert("a", 2);
        assert_eq!(None, object.insert("c", 3));

        assert_eq!(Some(JsonElement::from(2)), object.insert("a", "replaced"));
        assert_eq!(vec!["b", "a", "c"], object.keys().collect::<Vec<_>>());
        assert_eq!(Some(&JsonElement::from("replaced")), object.get("a"));

        assert_eq!(Some(JsonElement::from(1)), object.remove("b"));
        assert_eq!(None, object.remove("b"));
        assert_eq!(vec!["a", "c"], object.keys().collect::<Vec<_>>());
        assert_eq!(2, object.len());
        assert_eq!(false, object.contains_key("b"));
    }

    #[test]
    fn conversions() {
        assert_eq!(Ok(-5371), JsonElement::from(-5371_i16).to_i64());
        assert_eq!(Ok(-34), JsonElement::from(-34_i8).to_i32());
        assert_eq!(Ok(2887.0), JsonElement::from(2887_i64).to_f64());
        assert_eq!(Ok(1), JsonElement::from("+1").to_i32());
        assert_eq!(Ok(2.0), JsonElement::from("2").to_f64());
        assert_eq!(Ok(-1), JsonElement::from(-1.9).to_i64());
        assert_eq!(Ok(150), JsonElement::lazy_number("1.5e2").to_i64());
        assert_eq!(Ok(u64::MAX as f64), JsonElement::from(u64::MAX).to_f64());

        assert_eq!(
            Err(NumberConversionError {
                value: "".to_owned(),
                target: "i64"
            }),
            JsonElement::from("").to_i64()
        );
        assert_eq!(
            Err(NumberConversionError {
                value: "1.5".to_owned(),
                target: "i32"
            }),
            JsonElement::from("1.5").to_i32()
        );
        assert_eq!(
            Err(NumberConversionError {
                value: "3000000000".to_owned(),
                target: "i32"
            }),
            JsonElement::from(3_000_000_000_i64).to_i32()
        );
        assert_eq!(
            Err(NumberConversionError {
                value: u64::MAX.to_string(),
                target: "i64"
            }),
            JsonElement::from(u64::MAX).to_i64()
        );
        assert!(JsonElement::from(true).to_f64().is_err());
        assert!(JsonElement::from(f64::NAN).to_i64().is_err());
    }

    #[test]
    fn string_value() {
        assert_eq!(Some("2887".to_owned()), JsonElement::from(2887).to_string_value());
        assert_eq!(Some("-1.0".to_owned()), JsonElement::from(-1.0).to_string_value());
        assert_eq!(Some("false".to_owned()), JsonElement::from(false).to_string_value());
        assert_eq!(Some("`".to_owned()), JsonElement::from('`').to_string_value());
        assert_eq!(None, JsonElement::Null.to_string_value());
        assert_eq!(None, JsonElement::Array(Vec::new()).to_string_value());
    }

    #[test]
    fn display() {
        let object: JsonObject = [
            ("a", JsonElement::from(vec![JsonElement::from(1), true.into()])),
            ("b", JsonElement::Null),
            ("c", JsonElement::from(f64::NAN)),
            ("d", JsonElement::from("<\"quoted\">")),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            r#"{"a":[1,true],"b":null,"c":NaN,"d":"<\"quoted\">"}"#,
            JsonElement::Object(object).to_string()
        );
        assert_eq!("null", JsonElement::Null.to_string());
        assert_eq!("1.0E7", JsonElement::from(1e7).to_string());
        assert_eq!("1.1", JsonElement::from(1.1_f32).to_string());
        assert_eq!("3.0E10", JsonElement::from(3e10_f32).to_string());
    }

    #[test]
    fn display_lazy_number_verbatim() {
        assert_eq!("abc", JsonElement::lazy_number("abc").to_string());
        assert_eq!("6.070e+010", JsonElement::lazy_number("6.070e+010").to_string());

        let object: JsonObject = [
            ("a", JsonElement::lazy_number("1..2")),
            ("b", JsonElement::from(vec![JsonElement::lazy_number("0x10"), 1.into()])),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            r#"{"a":1..2,"b":[0x10,1]}"#,
            JsonElement::Object(object).to_string()
        );
    }

    #[test]
    fn float_parsing() {
        assert_eq!(Ok(-55.0), parse_f64(" -5.5e1 "));
        assert_eq!(Ok(f64::INFINITY), parse_f64("Infinity"));
        assert_eq!(Ok(f64::INFINITY), parse_f64("+Infinity"));
        assert_eq!(Ok(f64::NEG_INFINITY), parse_f64("-Infinity"));
        assert!(parse_f64("NaN").is_ok_and(f64::is_nan));

        for value in ["inf", "-inf", "infinity", "INFINITY", "nan", "NAN", "-nan", "e5"] {
            assert_eq!(
                Err(NumberConversionError {
                    value: value.to_owned(),
                    target: "f64"
                }),
                parse_f64(value),
                "Expected to be rejected: {value}"
            );
        }
        assert!(JsonElement::from("inf").to_f64().is_err());
    }

    #[test]
    fn non_finite_numbers() {
        assert_eq!(true, JsonNumber::Float(f64::NAN).is_non_finite());
        assert_eq!(true, JsonNumber::Float32(f32::NEG_INFINITY).is_non_finite());
        assert_eq!(true, JsonNumber::Lazy("Infinity".to_owned()).is_non_finite());
        assert_eq!(false, JsonNumber::Float32(1.5).is_non_finite());
        assert_eq!(false, JsonNumber::Lazy("1e400".to_owned()).is_non_finite());
        assert_eq!(false, JsonNumber::Integer(i64::MAX).is_non_finite());
    }

    #[test]
    fn type_queries() {
        let element = JsonElement::from(Some("text"));
        assert_eq!(true, element.is_string());
        assert_eq!(true, element.is_primitive());
        assert_eq!(Some("text"), element.as_str());

        let element = JsonElement::from(None::<bool>);
        assert_eq!(true, element.is_null());
        assert_eq!(false, element.is_primitive());

        let mut element = JsonElement::Object(JsonObject::new());
        element
            .as_object_mut()
            .unwrap()
            .add_property("x", 1.5_f32);
        assert_eq!(
            Some(&JsonElement::Number(JsonNumber::Float32(1.5))),
            element.as_object().unwrap().get("x")
        );
        assert_eq!(None, element.as_array());
    }
}

//! [`JsonReader`] implementation which reads a [`JsonElement`]

use std::iter::Peekable;

use tracing::debug;

use super::{json_path::JsonPathPiece, *};
use crate::{
    json_number::format_java_fp,
    tree::{self, parse_f64, parse_i32, parse_i64, JsonElement, JsonNumber, NumberConversionError},
};

#[derive(Debug)]
enum StackValue<'a> {
    /// Value which has been peeked but not consumed yet
    Element(&'a JsonElement),
    /// Member name which was promoted to a string value
    PromotedName(&'a str),
    Array(std::slice::Iter<'a, JsonElement>),
    Object(Peekable<tree::Iter<'a>>),
}

fn token_of(element: &JsonElement) -> JsonToken {
    match element {
        JsonElement::Null => JsonToken::Null,
        JsonElement::Bool(_) => JsonToken::Boolean,
        JsonElement::Number(_) => JsonToken::Number,
        JsonElement::String(_) => JsonToken::String,
        JsonElement::Array(_) => JsonToken::BeginArray,
        JsonElement::Object(_) => JsonToken::BeginObject,
    }
}

/// A JSON reader which reads the tokens of an in-memory [`JsonElement`]
///
/// The reader produces the same tokens a parser of the corresponding JSON text would
/// produce. It borrows the element, so the element cannot be modified while it is read.
///
/// # Examples
/// ```
/// # use treeson::reader::*;
/// # use treeson::tree::*;
/// let mut object = JsonObject::new();
/// object.add_property("1", "one");
/// let element = JsonElement::Object(object);
///
/// let mut json_reader = JsonTreeReader::new(&element);
/// json_reader.begin_object()?;
/// // Read the member name as number
/// json_reader.promote_name_to_value()?;
/// assert_eq!(json_reader.next_i32()?, 1);
/// assert_eq!(json_reader.next_string()?, "one");
/// json_reader.end_object()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct JsonTreeReader<'a> {
    /// Empty once the top-level value has been consumed
    stack: Vec<StackValue<'a>>,
    /// One piece per started array or object
    json_path: Vec<JsonPathPiece>,
    closed: bool,
    reader_settings: ReaderSettings,
}

impl<'a> JsonTreeReader<'a> {
    /// Creates a JSON tree reader with [default settings](ReaderSettings::default)
    pub fn new(element: &'a JsonElement) -> Self {
        JsonTreeReader::new_custom(element, ReaderSettings::default())
    }

    /// Creates a JSON tree reader with custom settings
    pub fn new_custom(element: &'a JsonElement, reader_settings: ReaderSettings) -> Self {
        let mut stack = Vec::with_capacity(16);
        stack.push(StackValue::Element(element));
        JsonTreeReader {
            stack,
            json_path: Vec::new(),
            closed: false,
            reader_settings,
        }
    }

    /// Consumes the name of the next JSON object member and makes it the next value
    ///
    /// The name can then be read as string with [`next_string`](JsonReader::next_string), or
    /// as number with for example [`next_i32`](JsonReader::next_i32). The member value follows
    /// after that.
    pub fn promote_name_to_value(&mut self) -> Result<(), ReaderError> {
        let (name, value) = self.next_member()?;
        self.set_member_name(name);
        self.stack.push(StackValue::Element(value));
        self.stack.push(StackValue::PromotedName(name));
        Ok(())
    }

    /// Consumes the next value and returns a copy of it
    ///
    /// # Errors
    /// [`ReaderError::NotAValue`] when the next token is a member name or the end of a JSON
    /// array, object or document.
    pub fn next_json_element(&mut self) -> Result<JsonElement, ReaderError> {
        let token = self.peek()?;
        let element = match self.stack.last() {
            Some(StackValue::Element(element)) => (*element).clone(),
            Some(StackValue::PromotedName(name)) => JsonElement::String((*name).to_owned()),
            _ => {
                return Err(ReaderError::NotAValue {
                    actual: token,
                    path: self.path(),
                })
            }
        };
        self.skip_value()?;
        Ok(element)
    }

    fn check_open(&self) -> Result<(), ReaderError> {
        if self.closed {
            Err(ReaderError::Closed)
        } else {
            Ok(())
        }
    }

    fn unexpected_token(&self, expected: JsonToken, actual: JsonToken) -> ReaderError {
        ReaderError::UnexpectedToken {
            expected,
            actual,
            path: self.path(),
        }
    }

    fn expect(&mut self, expected: JsonToken) -> Result<(), ReaderError> {
        let actual = self.peek()?;
        if actual == expected {
            Ok(())
        } else {
            Err(self.unexpected_token(expected, actual))
        }
    }

    /// Increments the index of the enclosing array after one of its items was consumed
    fn end_value(&mut self) {
        if let Some(JsonPathPiece::ArrayItem(index)) = self.json_path.last_mut() {
            *index += 1;
        }
    }

    /// Removes a value whose token has already been verified
    fn pop_value(&mut self) {
        self.stack.pop();
        self.end_value();
    }

    fn set_member_name(&mut self, name: &str) {
        if let Some(piece) = self.json_path.last_mut() {
            *piece = JsonPathPiece::ObjectMember(name.to_owned());
        }
    }

    fn next_member(&mut self) -> Result<(&'a str, &'a JsonElement), ReaderError> {
        self.expect(JsonToken::Name)?;
        if let Some(StackValue::Object(members)) = self.stack.last_mut() {
            if let Some(member) = members.next() {
                return Ok(member);
            }
        }
        unreachable!("peek returned NAME but there is no next member")
    }

    /// Converts the next number or string value without consuming it
    fn peek_number<T>(
        &mut self,
        convert_number: impl FnOnce(&JsonNumber) -> Result<T, NumberConversionError>,
        parse_string: impl FnOnce(&str) -> Result<T, NumberConversionError>,
    ) -> Result<T, ReaderError> {
        let token = self.peek()?;
        let result = match self.stack.last() {
            Some(StackValue::Element(JsonElement::Number(n))) => convert_number(n),
            Some(StackValue::Element(JsonElement::String(s))) => parse_string(s),
            Some(StackValue::PromotedName(name)) => parse_string(name),
            _ => return Err(self.unexpected_token(JsonToken::Number, token)),
        };
        result.map_err(|e| ReaderError::NumberFormat {
            value: e.value,
            target: e.target,
            path: self.path(),
        })
    }
}

impl JsonReader for JsonTreeReader<'_> {
    fn peek(&mut self) -> Result<JsonToken, ReaderError> {
        self.check_open()?;
        let item = match self.stack.last_mut() {
            None => return Ok(JsonToken::EndDocument),
            Some(StackValue::Element(element)) => return Ok(token_of(element)),
            Some(StackValue::PromotedName(_)) => return Ok(JsonToken::String),
            Some(StackValue::Object(members)) => {
                return Ok(if members.peek().is_some() {
                    JsonToken::Name
                } else {
                    JsonToken::EndObject
                })
            }
            Some(StackValue::Array(items)) => match items.next() {
                Some(item) => item,
                None => return Ok(JsonToken::EndArray),
            },
        };
        // Keep the array item on the stack until it is consumed
        self.stack.push(StackValue::Element(item));
        Ok(token_of(item))
    }

    fn begin_object(&mut self) -> Result<(), ReaderError> {
        self.expect(JsonToken::BeginObject)?;
        if let Some(StackValue::Element(JsonElement::Object(object))) = self.stack.pop() {
            self.stack.push(StackValue::Object(object.iter().peekable()));
            self.json_path.push(JsonPathPiece::ObjectMember(String::new()));
        }
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), ReaderError> {
        self.expect(JsonToken::EndObject)?;
        self.stack.pop();
        self.json_path.pop();
        self.end_value();
        Ok(())
    }

    fn begin_array(&mut self) -> Result<(), ReaderError> {
        self.expect(JsonToken::BeginArray)?;
        if let Some(StackValue::Element(JsonElement::Array(items))) = self.stack.pop() {
            self.stack.push(StackValue::Array(items.iter()));
            self.json_path.push(JsonPathPiece::ArrayItem(0));
        }
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), ReaderError> {
        self.expect(JsonToken::EndArray)?;
        self.stack.pop();
        self.json_path.pop();
        self.end_value();
        Ok(())
    }

    fn next_name(&mut self) -> Result<&str, ReaderError> {
        let (name, value) = self.next_member()?;
        self.set_member_name(name);
        self.stack.push(StackValue::Element(value));
        Ok(name)
    }

    fn next_string(&mut self) -> Result<String, ReaderError> {
        let token = self.peek()?;
        let value = match self.stack.last() {
            Some(StackValue::Element(JsonElement::String(s))) => s.clone(),
            Some(StackValue::Element(JsonElement::Number(n))) => n.to_string(),
            Some(StackValue::PromotedName(name)) => (*name).to_owned(),
            _ => return Err(self.unexpected_token(JsonToken::String, token)),
        };
        self.pop_value();
        Ok(value)
    }

    fn next_bool(&mut self) -> Result<bool, ReaderError> {
        self.expect(JsonToken::Boolean)?;
        let value = matches!(
            self.stack.last(),
            Some(StackValue::Element(JsonElement::Bool(true)))
        );
        self.pop_value();
        Ok(value)
    }

    fn next_null(&mut self) -> Result<(), ReaderError> {
        self.expect(JsonToken::Null)?;
        self.pop_value();
        Ok(())
    }

    fn next_f64(&mut self) -> Result<f64, ReaderError> {
        let value = self.peek_number(JsonNumber::to_f64, parse_f64)?;
        if !value.is_finite() && !self.reader_settings.lenient {
            return Err(ReaderError::NonFiniteNumber {
                value: format_java_fp(value),
                path: self.path(),
            });
        }
        self.pop_value();
        Ok(value)
    }

    fn next_i64(&mut self) -> Result<i64, ReaderError> {
        let value = self.peek_number(JsonNumber::to_i64, parse_i64)?;
        self.pop_value();
        Ok(value)
    }

    fn next_i32(&mut self) -> Result<i32, ReaderError> {
        let value = self.peek_number(JsonNumber::to_i32, parse_i32)?;
        self.pop_value();
        Ok(value)
    }

    fn skip_value(&mut self) -> Result<(), ReaderError> {
        match self.peek()? {
            JsonToken::Name => {
                let (_, value) = self.next_member()?;
                self.set_member_name("<skipped>");
                self.stack.push(StackValue::Element(value));
            }
            JsonToken::EndArray => self.end_array()?,
            JsonToken::EndObject => self.end_object()?,
            JsonToken::EndDocument => {}
            _ => self.pop_value(),
        }
        Ok(())
    }

    fn json_path(&self) -> &JsonPath {
        &self.json_path
    }

    fn is_lenient(&self) -> bool {
        self.reader_settings.lenient
    }

    fn set_lenient(&mut self, lenient: bool) {
        self.reader_settings.lenient = lenient;
    }

    fn close(&mut self) {
        if !self.closed {
            debug!(path = %self.path(), "closed JSON tree reader");
        }
        self.stack.clear();
        self.closed = true;
    }
}

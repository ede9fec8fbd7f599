//! Module for reading JSON data
//!
//! [`JsonReader`] is the general trait for JSON readers, [`JsonTreeReader`] is an implementation
//! of it which reads an in-memory [`JsonElement`](crate::tree::JsonElement) as a stream of tokens,
//! the same tokens a parser of the corresponding JSON text would produce.

/// Module for JSON path
///
/// A JSON path consists of zero or more [`JsonPathPiece`] elements which either represent the index of a
/// JSON array item or the name of a JSON object member. These elements combined form the _path_ to a value
/// in a JSON document. Readers use it for reporting the location of errors.
///
/// Consider for example the following code:
/// ```
/// # use treeson::reader::json_path::*;
/// vec![
///     JsonPathPiece::ObjectMember("a".to_owned()),
///     JsonPathPiece::ArrayItem(2),
/// ]
/// # ;
/// ```
/// It means: Within a JSON object the member with name "a", and assuming the value of that member is
/// a JSON array, of that array the item at index 2 (starting at 0). The string representation of the
/// path is `$.a[2]`.
pub mod json_path {
    /// A piece of a JSON path
    ///
    /// A piece can either represent the index of a JSON array item or the name of a JSON object member.
    #[derive(PartialEq, Eq, Clone, Debug)]
    pub enum JsonPathPiece {
        /// Index (starting at 0) of a JSON array item
        ArrayItem(u32),
        /// Name of a JSON object member
        ///
        /// Directly after a JSON object was started the name is empty, and after a member
        /// name was skipped it is `<skipped>`.
        ObjectMember(String),
    }

    /// Creates a [`JsonPathPiece::ArrayItem`] with the number as index
    impl From<u32> for JsonPathPiece {
        fn from(v: u32) -> Self {
            JsonPathPiece::ArrayItem(v)
        }
    }

    /// Creates a [`JsonPathPiece::ObjectMember`] with the string as member name
    impl From<String> for JsonPathPiece {
        fn from(v: String) -> Self {
            JsonPathPiece::ObjectMember(v)
        }
    }

    /// Creates a [`JsonPathPiece::ObjectMember`] with the string as member name
    impl From<&str> for JsonPathPiece {
        fn from(v: &str) -> Self {
            JsonPathPiece::ObjectMember(v.to_string())
        }
    }

    /// A JSON path
    pub type JsonPath = [JsonPathPiece];

    /// Formats the path in dot-notation with a leading `$`, for example `$.a[2]`
    pub fn format_abs_json_path(json_path: &JsonPath) -> String {
        "$".to_string()
            + json_path
                .iter()
                .map(|p| match p {
                    JsonPathPiece::ArrayItem(index) => format!("[{index}]"),
                    JsonPathPiece::ObjectMember(name) => format!(".{name}"),
                })
                .collect::<String>()
                .as_str()
    }

    /// Creates a JSON path from path pieces
    ///
    /// The arguments to this macro represent the path pieces:
    /// - numbers of type `u32` are converted to [`JsonPathPiece::ArrayItem`]
    /// - strings are converted to [`JsonPathPiece::ObjectMember`]
    ///
    /// At least one path piece argument must be provided.
    ///
    /// # Examples
    /// ```
    /// # use treeson::reader::json_path::*;
    /// let json_path = json_path!["outer", 3, "inner"];
    /// assert_eq!(
    ///     json_path,
    ///     [
    ///         JsonPathPiece::ObjectMember("outer".to_owned()),
    ///         JsonPathPiece::ArrayItem(3),
    ///         JsonPathPiece::ObjectMember("inner".to_owned()),
    ///     ]
    /// );
    /// ```
    #[macro_export]
    macro_rules! json_path {
        ( $( $piece:expr ),+ ) => {
            {
                [
                    $(
                        $crate::reader::json_path::JsonPathPiece::from($piece),
                    )*
                ]
            }
        };
    }

    // Re-export the macro to be available under the `treeson::reader::json_path` module path
    #[doc(inline)]
    pub use json_path;

}

use thiserror::Error;

use self::json_path::{format_abs_json_path, JsonPath};
use crate::writer::{JsonWriter, WriterError};

mod tree_reader;
// Re-export tree implementation under `reader` module
pub use tree_reader::*;

/// Token of a JSON document
///
/// The display form is upper snake case, for example `BEGIN_ARRAY`.
#[derive(PartialEq, Eq, Clone, Copy, strum::Display, Debug)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum JsonToken {
    /// Start of a JSON array: `[`
    BeginArray,
    /// End of a JSON array: `]`
    EndArray,
    /// Start of a JSON object: `{`
    BeginObject,
    /// End of a JSON object: `}`
    EndObject,
    /// Name of a JSON object member
    Name,
    /// JSON string value, for example `"text in \"quotes\""`
    String,
    /// JSON number value, for example `123.4e+10`
    Number,
    /// JSON boolean value, `true` or `false`
    Boolean,
    /// JSON `null`
    Null,
    /// End of the JSON document, after the top-level value has been consumed
    EndDocument,
}

/// Settings to customize the JSON reader behavior
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReaderSettings {
    /// Whether to allow NaN and (negative) Infinity values for [`JsonReader::next_f64`]
    pub lenient: bool,
}

/// Error which occurred while reading from a JSON reader
///
/// The value which caused the error is not consumed; the reader can still be used afterwards.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum ReaderError {
    /// The next token is not the one expected by the called method
    ///
    /// This error occurs for example when trying to read a JSON number when the next value is actually
    /// a JSON boolean, or when trying to end a JSON array when there are still items left.
    #[error("Expected {expected} but was {actual} at path {path}")]
    UnexpectedToken {
        /// The expected token
        expected: JsonToken,
        /// The actual next token
        actual: JsonToken,
        /// Location where the error occurred in the JSON document
        path: String,
    },
    /// A complete value was requested, but the next token is a member name or the end
    /// of a container or document
    #[error("Unexpected {actual} when reading a JsonElement at path {path}")]
    NotAValue {
        #[allow(missing_docs)]
        actual: JsonToken,
        /// Location where the error occurred in the JSON document
        path: String,
    },
    /// The value cannot be converted to the requested number type
    #[error("cannot convert '{value}' to {target} at path {path}")]
    NumberFormat {
        /// String representation of the value
        value: String,
        /// Name of the requested number type, for example `i32`
        target: &'static str,
        /// Location of the value within the JSON document
        path: String,
    },
    /// The number value is NaN or Infinity and the reader is not lenient
    #[error("JSON forbids NaN and infinities: {value} at path {path}")]
    NonFiniteNumber {
        #[allow(missing_docs)]
        value: String,
        /// Location of the value within the JSON document
        path: String,
    },
    /// The reader has been closed
    #[error("JsonReader is closed")]
    Closed,
}

/// Error which occurred while calling [`JsonReader::transfer_to`]
#[derive(Error, Debug)]
pub enum TransferError {
    /// Error which occurred while reading from the JSON reader
    #[error("reader error: {0}")]
    ReaderError(#[from] ReaderError),
    /// Error which occurred while writing to the JSON writer
    #[error("writer error: {0}")]
    WriterError(#[from] WriterError),
}

/// A trait for JSON readers
///
/// The methods of this reader can be divided into the following categories:
///
/// - Peeking, without consuming anything
///     - [`peek`](Self::peek): Peeks at the next token
///     - [`has_next`](Self::has_next): Checks if the current array or object has more elements
/// - Reading values
///     - [`begin_array`](Self::begin_array), [`end_array`](Self::end_array): Starting and ending a JSON array
///     - [`begin_object`](Self::begin_object), [`end_object`](Self::end_object): Starting and ending a JSON object
///     - [`next_name`](Self::next_name), [`next_name_owned`](Self::next_name_owned): Reading the name of a JSON object member
///     - [`next_string`](Self::next_string): Reading a JSON string value, or a number as string
///     - [`next_f64`](Self::next_f64), [`next_i64`](Self::next_i64), [`next_i32`](Self::next_i32): Reading a JSON number value, or a numeric string
///     - [`next_bool`](Self::next_bool): Reading a JSON boolean value
///     - [`next_null`](Self::next_null): Reading a JSON null value
///     - [`transfer_to`](Self::transfer_to): Copying the next value to a [`JsonWriter`]
/// - Skipping values
///     - [`skip_value`](Self::skip_value): Skips the next value or member name
/// - Other:
///     - [`json_path`](Self::json_path), [`path`](Self::path): Current location in the JSON document
///     - [`close`](Self::close): Closes the reader
///
/// # Examples
/// ```
/// # use treeson::reader::*;
/// # use treeson::tree::*;
/// let mut object = JsonObject::new();
/// object.insert("a", vec![JsonElement::from(1), JsonElement::from(2)]);
/// let element = JsonElement::Object(object);
///
/// let mut json_reader = JsonTreeReader::new(&element);
/// json_reader.begin_object()?;
/// assert_eq!(json_reader.next_name()?, "a");
///
/// json_reader.begin_array()?;
/// let mut sum = 0;
/// while json_reader.has_next()? {
///     sum += json_reader.next_i32()?;
/// }
/// json_reader.end_array()?;
/// json_reader.end_object()?;
///
/// assert_eq!(sum, 3);
/// assert_eq!(json_reader.peek()?, JsonToken::EndDocument);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Error handling
/// Reading a value of the wrong type returns a [`ReaderError`] without consuming anything, so
/// the reader can for example retry with a different method. After [`close`](Self::close)
/// every method returns [`ReaderError::Closed`].
pub trait JsonReader {
    /// Peeks at the next token without consuming it
    ///
    /// At the end of a JSON array or object this returns [`JsonToken::EndArray`] respectively
    /// [`JsonToken::EndObject`]; after the top-level value has been consumed it returns
    /// [`JsonToken::EndDocument`].
    fn peek(&mut self) -> Result<JsonToken, ReaderError>;

    /// Checks if there is a next element in the current JSON array or object
    ///
    /// Returns `false` at the end of a JSON array or object and at the end of the document.
    fn has_next(&mut self) -> Result<bool, ReaderError> {
        Ok(!matches!(
            self.peek()?,
            JsonToken::EndArray | JsonToken::EndObject | JsonToken::EndDocument
        ))
    }

    /// Begins consuming a JSON object
    fn begin_object(&mut self) -> Result<(), ReaderError>;

    /// Consumes the closing bracket `}` of the current JSON object
    ///
    /// Returns [`ReaderError::UnexpectedToken`] if the object still has remaining members.
    fn end_object(&mut self) -> Result<(), ReaderError>;

    /// Begins consuming a JSON array
    fn begin_array(&mut self) -> Result<(), ReaderError>;

    /// Consumes the closing bracket `]` of the current JSON array
    ///
    /// Returns [`ReaderError::UnexpectedToken`] if the array still has remaining items.
    fn end_array(&mut self) -> Result<(), ReaderError>;

    /// Consumes the name of the next JSON object member
    ///
    /// The member value is the next value afterwards.
    fn next_name(&mut self) -> Result<&str, ReaderError>;

    /// Consumes the name of the next JSON object member as owned `String`
    fn next_name_owned(&mut self) -> Result<String, ReaderError> {
        self.next_name().map(str::to_owned)
    }

    /// Consumes a JSON string value
    ///
    /// JSON numbers are accepted as well and returned in their string form.
    fn next_string(&mut self) -> Result<String, ReaderError>;

    /// Consumes a JSON boolean value
    fn next_bool(&mut self) -> Result<bool, ReaderError>;

    /// Consumes a JSON null value
    fn next_null(&mut self) -> Result<(), ReaderError>;

    /// Consumes a JSON number value or numeric string as `f64`
    ///
    /// Returns [`ReaderError::NonFiniteNumber`] for NaN and Infinity unless the reader is
    /// lenient.
    fn next_f64(&mut self) -> Result<f64, ReaderError>;

    /// Consumes a JSON number value or integral string as `i64`
    ///
    /// Floating point numbers are truncated toward zero. Values outside the range of
    /// `i64` cause [`ReaderError::NumberFormat`].
    fn next_i64(&mut self) -> Result<i64, ReaderError>;

    /// Consumes a JSON number value or integral string as `i32`
    ///
    /// Same as [`next_i64`](Self::next_i64) but with the range of `i32`.
    fn next_i32(&mut self) -> Result<i32, ReaderError>;

    /// Skips the next value
    ///
    /// When the next token is a member name only the name is skipped and the member value
    /// becomes the next value. At the end of a JSON array or object the container is ended,
    /// and at the end of the document nothing happens.
    fn skip_value(&mut self) -> Result<(), ReaderError>;

    /// Gets the path pieces of the current location
    fn json_path(&self) -> &JsonPath;

    /// Gets the current location as string, for example `$.a[2]`
    fn path(&self) -> String {
        format_abs_json_path(self.json_path())
    }

    /// Whether this reader is lenient, see [`ReaderSettings::lenient`]
    fn is_lenient(&self) -> bool;

    #[allow(missing_docs)]
    fn set_lenient(&mut self, lenient: bool);

    /// Closes this reader
    ///
    /// All subsequent reading calls return [`ReaderError::Closed`]. Closing an already
    /// closed reader has no effect.
    fn close(&mut self);

    /// Consumes the next value and writes it to the given JSON writer
    ///
    /// Numbers are written in their string form with
    /// [`number_value_from_string`](JsonWriter::number_value_from_string), so non-finite
    /// numbers are only accepted by lenient writers.
    ///
    /// # Examples
    /// ```
    /// # use treeson::reader::*;
    /// # use treeson::writer::*;
    /// # use treeson::tree::*;
    /// let element = JsonElement::Array(vec![true.into(), "text".into(), 1.5.into()]);
    /// let mut json_reader = JsonTreeReader::new(&element);
    ///
    /// let mut json_writer = JsonStreamWriter::new(Vec::<u8>::new());
    /// json_reader.transfer_to(&mut json_writer)?;
    /// json_writer.close()?;
    ///
    /// assert_eq!(json_writer.into_inner()?, br#"[true,"text",1.5]"#);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn transfer_to<W: JsonWriter>(&mut self, json_writer: &mut W) -> Result<(), TransferError> {
        // Depth of nested arrays and objects which have been started but not ended yet
        let mut depth: u32 = 0;
        loop {
            match self.peek()? {
                JsonToken::BeginArray => {
                    self.begin_array()?;
                    json_writer.begin_array()?;
                    depth += 1;
                }
                JsonToken::BeginObject => {
                    self.begin_object()?;
                    json_writer.begin_object()?;
                    depth += 1;
                }
                JsonToken::EndArray if depth > 0 => {
                    self.end_array()?;
                    json_writer.end_array()?;
                    depth -= 1;
                }
                JsonToken::EndObject if depth > 0 => {
                    self.end_object()?;
                    json_writer.end_object()?;
                    depth -= 1;
                }
                JsonToken::Name if depth > 0 => {
                    let name = self.next_name_owned()?;
                    json_writer.name(&name)?;
                }
                JsonToken::String => {
                    let value = self.next_string()?;
                    json_writer.string_value(&value)?;
                }
                JsonToken::Number => {
                    let value = self.next_string()?;
                    json_writer.number_value_from_string(&value)?;
                }
                JsonToken::Boolean => {
                    let value = self.next_bool()?;
                    json_writer.bool_value(value)?;
                }
                JsonToken::Null => {
                    self.next_null()?;
                    json_writer.null_value()?;
                }
                token => {
                    return Err(ReaderError::NotAValue {
                        actual: token,
                        path: self.path(),
                    }
                    .into())
                }
            }

            if depth == 0 {
                return Ok(());
            }
        }
    }
}

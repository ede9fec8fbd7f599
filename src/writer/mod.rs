//! Module for writing JSON data
//!
//! [`JsonWriter`] is the general trait for JSON writers. [`JsonStreamWriter`] writes a JSON
//! document as text to a [`Write`](std::io::Write), [`JsonTreeWriter`] builds a
//! [`JsonElement`] in memory instead.

use duplicate::duplicate_item;
use thiserror::Error;

use crate::{
    json_number::{format_java_fp, format_java_fp32, is_non_finite_literal, is_valid_json_number},
    tree::{JsonElement, JsonNumber},
};

mod stream_writer;
mod tree_writer;
// Re-export implementations under `writer` module
pub use stream_writer::*;
pub use tree_writer::*;

/// Error which occurred while writing JSON data
///
/// Except for [`Io`](Self::Io) all variants indicate incorrect usage of the writer. The
/// writer state is not changed when such an error is returned, so callers may recover
/// and continue writing.
#[derive(Error, Debug)]
pub enum WriterError {
    /// The method call does not fit the current position in the document, for example
    /// `end_object` while inside an array, or a value inside an object without a preceding
    /// member name
    #[error("Nesting problem.")]
    NestingProblem,
    /// A second top-level value was written and the writer is not lenient
    #[error("JSON must have only one top-level value.")]
    MultipleTopLevelValues,
    /// A JSON array or object was ended while a member name was still waiting for its value
    #[error("Dangling name: {0}")]
    DanglingName(String),
    /// A member name was written while the previous member name was still waiting for its value
    #[error("Member name '{0}' is still waiting for its value")]
    NameAlreadyPending(String),
    /// The writer has been closed
    #[error("JsonWriter is closed.")]
    Closed,
    /// The writer was closed before exactly one complete top-level value was written
    #[error("Incomplete document")]
    IncompleteDocument,
    /// NaN or Infinity was written and the writer is not lenient
    #[error("Numeric values must be finite, but was {0}")]
    NonFiniteNumber(String),
    /// A number string does not match the JSON number format
    #[error("Not a valid JSON number: {0}")]
    InvalidNumber(String),
    /// An IO error occurred while writing to the underlying writer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings to customize the JSON writer behavior
///
/// These settings are used by [`JsonStreamWriter::new_custom`] and [`JsonTreeWriter::new_custom`].
/// To avoid repeating the default values for unchanged settings `..Default::default()` can be used:
/// ```
/// # use treeson::writer::WriterSettings;
/// WriterSettings {
///     html_safe: true,
///     // For all other settings use the default
///     ..Default::default()
/// }
/// # ;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriterSettings {
    /// Whether to relax the syntax rules
    ///
    /// A lenient writer allows NaN and (negative) Infinity as number values and allows
    /// writing multiple top-level values. [`JsonTreeWriter`] still rejects a second
    /// top-level value because the built tree has a single root.
    pub lenient: bool,

    /// Whether to escape characters which are significant in HTML and XML
    ///
    /// If `true` the characters `<`, `>`, `&`, `=` and `'` are written as `\u` escape
    /// sequences, so the JSON output can be embedded in HTML documents safely.
    pub html_safe: bool,

    /// Whether to write object members whose value is `null`
    ///
    /// If `false`, writing `null` as member value discards the member name and the value.
    /// `null` values in arrays and at top-level are always written.
    pub serialize_nulls: bool,

    /// Indentation string for pretty printing
    ///
    /// If `None` (or `Some("")`) the JSON output is compact. Otherwise every array item and
    /// object member is placed on its own line, indented by this string repeated once per
    /// nesting level, and `: ` is used as name separator.
    pub indent: Option<String>,
}

impl Default for WriterSettings {
    /// Creates the default JSON writer settings
    ///
    /// - lenient: false
    /// - HTML-safe: false
    /// - serialize nulls: true
    /// - indent: None (compact output)
    fn default() -> Self {
        WriterSettings {
            lenient: false,
            html_safe: false,
            serialize_nulls: true,
            indent: None,
        }
    }
}

/// A trait for JSON writers
///
/// The methods of this writer can be divided into the following categories:
///
/// - Writing values
///     - [`begin_array`](Self::begin_array), [`end_array`](Self::end_array): Starting and ending a JSON array
///     - [`begin_object`](Self::begin_object), [`end_object`](Self::end_object): Starting and ending a JSON object
///     - [`name`](Self::name): Writing a JSON object member name
///     - [`string_value`](Self::string_value): Writing a JSON string value
///     - [`number_value`](Self::number_value), [`fp_number_value`](Self::fp_number_value), [`number_value_from_string`](Self::number_value_from_string): Writing a JSON number value
///     - [`bool_value`](Self::bool_value): Writing a JSON boolean value
///     - [`null_value`](Self::null_value): Writing a JSON null value
///     - [`element_value`](Self::element_value): Writing a complete [`JsonElement`]
///  - Other:
///     - [`flush`](Self::flush), [`close`](Self::close): Flushing written data and ensuring the document is complete
///
/// JSON documents have one top-level value which can be either a JSON array, object,
/// string, number, boolean or null value. For JSON arrays and objects the opening brackets
/// are written with the corresponding `begin_` method and the closing bracket with the
/// corresponding `end_` method. JSON objects consist of *members*; the name of a member is
/// written with [`name`](Self::name) and the value with any of the value writing methods.
///
/// # Examples
/// ```
/// # use treeson::writer::*;
/// let mut json_writer = JsonStreamWriter::new(Vec::<u8>::new());
///
/// json_writer.begin_object()?;
/// json_writer.name("a")?;
///
/// json_writer.begin_array()?;
/// json_writer.number_value(1)?;
/// json_writer.bool_value(true)?;
/// json_writer.end_array()?;
///
/// json_writer.end_object()?;
/// // Ensures that the JSON document is complete and flushes the buffer
/// json_writer.close()?;
///
/// let json = String::from_utf8(json_writer.into_inner()?)?;
/// assert_eq!(json, r#"{"a":[1,true]}"#);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Error handling
/// Incorrect usage, such as calling [`end_object`](Self::end_object) while writing a JSON
/// array, is reported as [`WriterError`] and leaves the writer state unchanged. After an
/// [`WriterError::Io`] error the output is most likely incomplete and writing the JSON
/// document should be aborted.
pub trait JsonWriter {
    /// Begins writing a JSON object
    ///
    /// # Errors
    /// [`WriterError::NestingProblem`] when called inside an object without a preceding
    /// member name, [`WriterError::MultipleTopLevelValues`] when the top-level value has
    /// already been written and the writer is not lenient.
    fn begin_object(&mut self) -> Result<(), WriterError>;

    /// Writes the closing bracket `}` of the current JSON object
    ///
    /// # Errors
    /// [`WriterError::NestingProblem`] when not inside a JSON object and
    /// [`WriterError::DanglingName`] when a member name is still waiting for its value.
    fn end_object(&mut self) -> Result<(), WriterError>;

    /// Begins writing a JSON array
    ///
    /// Note that JSON arrays can contain values of different types, so for example the
    /// following is valid JSON: `[1, true, "a"]`
    ///
    /// # Errors
    /// Same as for [`begin_object`](Self::begin_object).
    fn begin_array(&mut self) -> Result<(), WriterError>;

    /// Writes the closing bracket `]` of the current JSON array
    ///
    /// # Errors
    /// [`WriterError::NestingProblem`] when not inside a JSON array and
    /// [`WriterError::DanglingName`] when a member name is still pending.
    fn end_array(&mut self) -> Result<(), WriterError>;

    /// Writes the name of the next JSON object member
    ///
    /// Afterwards one of the value writing methods such as [`number_value`](Self::number_value)
    /// writes the corresponding member value. Duplicate member names are not detected.
    ///
    /// # Errors
    /// [`WriterError::NameAlreadyPending`] when the previous name has not received a value
    /// yet, [`WriterError::Closed`] when the writer is closed. Implementations may defer
    /// checking that the writer is inside an object until the value is written.
    fn name(&mut self, name: &str) -> Result<(), WriterError>;

    /// Writes a JSON null value
    ///
    /// If this is the value of an object member and [`serialize_nulls`](Self::serialize_nulls)
    /// is `false`, the member is omitted entirely.
    fn null_value(&mut self) -> Result<(), WriterError>;

    /// Writes a JSON boolean value
    fn bool_value(&mut self, value: bool) -> Result<(), WriterError>;

    /// Writes a JSON string value
    ///
    /// Characters are escaped in the JSON output if necessary; for example U+0000 is
    /// written as `\u0000`.
    fn string_value(&mut self, value: &str) -> Result<(), WriterError>;

    /// Writes the string representation of a JSON number value
    ///
    /// # Errors
    /// [`WriterError::NonFiniteNumber`] for `NaN`, `Infinity` and `-Infinity` if the writer
    /// is not lenient, [`WriterError::InvalidNumber`] for any other string which is not a
    /// valid JSON number, for example `+1` or `0x1`.
    fn number_value_from_string(&mut self, value: &str) -> Result<(), WriterError>;

    /// Writes a finite JSON number value
    ///
    /// # Examples
    /// ```
    /// # use treeson::writer::*;
    /// let mut json_writer = JsonStreamWriter::new(Vec::<u8>::new());
    /// json_writer.number_value(123)?;
    /// json_writer.close()?;
    ///
    /// assert_eq!(json_writer.into_inner()?, b"123");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn number_value<N: FiniteNumber>(&mut self, value: N) -> Result<(), WriterError>;

    /// Writes a floating point JSON number value
    ///
    /// The number is written in the format of Java's `Double.toString`: integral values
    /// keep a fraction digit (`-1.0`), very large or small magnitudes use scientific
    /// notation (`1.0E7`).
    ///
    /// # Errors
    /// [`WriterError::NonFiniteNumber`] if the number is NaN or Infinity and the writer is
    /// not lenient.
    fn fp_number_value<N: FloatingPointNumber>(&mut self, value: N) -> Result<(), WriterError>;

    /// Whether this writer is lenient, see [`WriterSettings::lenient`]
    fn is_lenient(&self) -> bool;

    /// Whether `null` member values are written, see [`WriterSettings::serialize_nulls`]
    fn serialize_nulls(&self) -> bool;

    /// Flushes written data to the underlying destination, if any
    fn flush(&mut self) -> Result<(), WriterError>;

    /// Closes this writer
    ///
    /// # Errors
    /// [`WriterError::IncompleteDocument`] if the document is incomplete, for example
    /// because a JSON array has not been ended yet.
    fn close(&mut self) -> Result<(), WriterError>;

    /// Writes a JSON number stored in the tree model
    ///
    /// Lazy numbers are written with [`number_value_from_string`](Self::number_value_from_string)
    /// and are therefore validated.
    fn json_number_value(&mut self, number: &JsonNumber) -> Result<(), WriterError> {
        match number {
            JsonNumber::Integer(i) => self.number_value(*i),
            JsonNumber::Unsigned(u) => self.number_value(*u),
            JsonNumber::Float(f) => self.fp_number_value(*f),
            JsonNumber::Float32(f) => self.fp_number_value(*f),
            JsonNumber::Lazy(s) => self.number_value_from_string(s),
        }
    }

    /// Writes a complete JSON tree as next value
    ///
    /// # Examples
    /// ```
    /// # use treeson::writer::*;
    /// # use treeson::tree::*;
    /// let mut object = JsonObject::new();
    /// object.add_property("a", 1);
    /// object.add_property("b", JsonElement::Null);
    ///
    /// let mut json_writer = JsonStreamWriter::new_custom(
    ///     Vec::<u8>::new(),
    ///     WriterSettings {
    ///         serialize_nulls: false,
    ///         ..Default::default()
    ///     },
    /// );
    /// json_writer.element_value(&JsonElement::Object(object))?;
    /// json_writer.close()?;
    ///
    /// assert_eq!(json_writer.into_inner()?, br#"{"a":1}"#);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn element_value(&mut self, element: &JsonElement) -> Result<(), WriterError> {
        match element {
            JsonElement::Null => self.null_value(),
            JsonElement::Bool(b) => self.bool_value(*b),
            JsonElement::Number(n) => self.json_number_value(n),
            JsonElement::String(s) => self.string_value(s),
            JsonElement::Array(items) => {
                self.begin_array()?;
                for item in items {
                    self.element_value(item)?;
                }
                self.end_array()
            }
            JsonElement::Object(object) => {
                self.begin_object()?;
                for (name, value) in object {
                    self.name(name)?;
                    self.element_value(value)?;
                }
                self.end_object()
            }
        }
    }
}

/// Checks a number string before it is written
pub(crate) fn validate_number_string(value: &str, lenient: bool) -> Result<(), WriterError> {
    if is_non_finite_literal(value) {
        if lenient {
            tracing::trace!(value, "writing non-finite number literal");
            Ok(())
        } else {
            Err(WriterError::NonFiniteNumber(value.to_owned()))
        }
    } else if is_valid_json_number(value) {
        Ok(())
    } else {
        Err(WriterError::InvalidNumber(value.to_owned()))
    }
}

/// Sealed trait for finite number types such as `u32`
///
/// Values of this number type are finite and will therefore always be
/// valid JSON numbers. They will neither be NaN nor Infinity.
///
/// Implementing this trait for custom number types is not possible. Use the
/// method [`JsonWriter::number_value_from_string`] to write them to the JSON
/// document.
pub trait FiniteNumber: private::Sealed + Copy {
    /// Converts this number to a JSON number string
    fn to_json_number(self) -> String;

    /// Gets this number as `i64`, if it is in range
    fn as_i64(self) -> Option<i64>;

    /// Gets this number as `u64`, if it is in range
    fn as_u64(self) -> Option<u64>;
}

/// Sealed trait for floating point number types such as `f64`
///
/// Implementing this trait for custom number types is not possible. Use the
/// method [`JsonWriter::number_value_from_string`] to write them to the JSON
/// document.
pub trait FloatingPointNumber: private::Sealed + Copy {
    /// Converts this number to a number string in the format of Java's `Double.toString`
    ///
    /// NaN and infinite values are converted to `NaN`, `Infinity` and `-Infinity`.
    fn to_json_number(self) -> String;

    /// Gets this number as `f64`
    fn as_f64(self) -> f64;

    /// Converts this number to a tree model number, keeping its precision
    fn to_tree_number(self) -> JsonNumber;
}

mod private {
    use super::*;

    // Sealed trait, see https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
    pub trait Sealed {}

    #[duplicate_item(type_template; [u8]; [i8]; [u16]; [i16]; [u32]; [i32]; [u64]; [i64]; [u128]; [i128]; [usize]; [isize]; [f32]; [f64])]
    impl Sealed for type_template {}
}

#[duplicate_item(type_template; [u8]; [i8]; [u16]; [i16]; [u32]; [i32]; [u64]; [i64]; [u128]; [i128]; [usize]; [isize])]
impl FiniteNumber for type_template {
    fn to_json_number(self) -> String {
        self.to_string()
    }

    fn as_i64(self) -> Option<i64> {
        #[allow(clippy::useless_conversion, clippy::unnecessary_fallible_conversions /* reason = "for i64 -> i64" */)]
        self.try_into().ok()
    }

    fn as_u64(self) -> Option<u64> {
        #[allow(clippy::useless_conversion, clippy::unnecessary_fallible_conversions /* reason = "for u64 -> u64" */)]
        self.try_into().ok()
    }
}

#[duplicate_item(type_template format_fn number_variant; [f32] [format_java_fp32] [Float32]; [f64] [format_java_fp] [Float])]
impl FloatingPointNumber for type_template {
    fn to_json_number(self) -> String {
        format_fn(self)
    }

    fn as_f64(self) -> f64 {
        #[allow(clippy::useless_conversion)] // for f64 -> f64
        self.into()
    }

    fn to_tree_number(self) -> JsonNumber {
        JsonNumber::number_variant(self)
    }
}

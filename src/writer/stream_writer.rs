//! Streaming implementation of [`JsonWriter`]

use std::{fmt::Debug, io::Write};

use tracing::{debug, trace};

use super::*;

/// Position of the writer within the JSON document
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Scope {
    /// No value has been written yet
    EmptyDocument,
    /// The top-level value has been written
    NonemptyDocument,
    EmptyArray,
    NonemptyArray,
    /// Inside an object, no member written yet
    EmptyObject,
    /// Member name has been written, value is expected next
    DanglingName,
    NonemptyObject,
}

pub(crate) const WRITER_BUF_SIZE: usize = 1024;

/// A JSON writer implementation which writes data to a [`Write`]
///
/// This writer internally buffers data so it is normally not necessary to wrap the provided
/// writer in a [`std::io::BufWriter`]. Use [`flush`](JsonWriter::flush), [`close`](JsonWriter::close)
/// or [`into_inner`](Self::into_inner) to make sure all data reaches the underlying writer.
///
/// Member names are deferred: [`name`](JsonWriter::name) only stores the name, and it is
/// written once the member value follows. This allows dropping members with `null` value
/// when [`serialize_nulls`](WriterSettings::serialize_nulls) is disabled.
///
/// # Examples
/// ```
/// # use treeson::writer::*;
/// let mut json_writer = JsonStreamWriter::new_custom(
///     Vec::<u8>::new(),
///     WriterSettings {
///         indent: Some("  ".to_owned()),
///         ..Default::default()
///     },
/// );
///
/// json_writer.begin_object()?;
/// json_writer.name("a")?;
/// json_writer.begin_array()?;
/// json_writer.fp_number_value(-1.0)?;
/// json_writer.end_array()?;
/// json_writer.end_object()?;
/// json_writer.close()?;
///
/// let json = String::from_utf8(json_writer.into_inner()?)?;
/// assert_eq!(json, "{\n  \"a\": [\n    -1.0\n  ]\n}");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct JsonStreamWriter<W: Write> {
    // When adding more fields to this struct, adjust the Debug implementation below, if necessary
    writer: W,
    buf: [u8; WRITER_BUF_SIZE],
    /// Index (starting at 0) within [`buf`](Self::buf) where to write next,
    /// respectively how many bytes have already been written to the buffer
    buf_write_pos: usize,
    /// Empty once the writer has been closed
    stack: Vec<Scope>,
    deferred_name: Option<String>,

    writer_settings: WriterSettings,
}

// Implementation with public constructor and configuration methods
impl<W: Write> JsonStreamWriter<W> {
    /// Creates a JSON writer with [default settings](WriterSettings::default)
    pub fn new(writer: W) -> Self {
        JsonStreamWriter::new_custom(writer, WriterSettings::default())
    }

    /// Creates a JSON writer with custom settings
    pub fn new_custom(writer: W, writer_settings: WriterSettings) -> Self {
        let mut stack = Vec::with_capacity(16);
        stack.push(Scope::EmptyDocument);

        // Empty indentation means compact output
        let indent = writer_settings.indent.filter(|indent| !indent.is_empty());
        Self {
            writer,
            buf: [0_u8; WRITER_BUF_SIZE],
            buf_write_pos: 0,
            stack,
            deferred_name: None,
            writer_settings: WriterSettings {
                indent,
                ..writer_settings
            },
        }
    }

    /// Sets whether this writer is lenient, see [`WriterSettings::lenient`]
    pub fn set_lenient(&mut self, lenient: bool) {
        self.writer_settings.lenient = lenient;
    }

    /// Whether this writer escapes HTML characters, see [`WriterSettings::html_safe`]
    pub fn is_html_safe(&self) -> bool {
        self.writer_settings.html_safe
    }

    #[allow(missing_docs)]
    pub fn set_html_safe(&mut self, html_safe: bool) {
        self.writer_settings.html_safe = html_safe;
    }

    #[allow(missing_docs)]
    pub fn set_serialize_nulls(&mut self, serialize_nulls: bool) {
        self.writer_settings.serialize_nulls = serialize_nulls;
    }

    /// Sets the indentation string; an empty string switches to compact output
    ///
    /// The setting takes effect for everything written afterwards, so it may be changed
    /// in the middle of a document.
    pub fn set_indent(&mut self, indent: &str) {
        self.writer_settings.indent = if indent.is_empty() {
            None
        } else {
            Some(indent.to_owned())
        };
    }

    /// Gets a reference to the underlying writer
    ///
    /// Data which is still buffered by this JSON writer is not visible there; call
    /// [`flush`](JsonWriter::flush) first.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Writes all buffered data and unwraps the underlying writer
    ///
    /// Unlike [`close`](JsonWriter::close) this does not check whether the JSON document
    /// is complete.
    pub fn into_inner(mut self) -> Result<W, WriterError> {
        self.flush_buf()?;
        Ok(self.writer)
    }

    /// Writes a raw JSON value, for example `{"a":1}`, as next value
    ///
    /// The value is written without any validation, so callers have to make sure it is
    /// valid JSON. For an empty string nothing is written, but the value still counts
    /// as written.
    ///
    /// # Examples
    /// ```
    /// # use treeson::writer::*;
    /// let mut json_writer = JsonStreamWriter::new(Vec::<u8>::new());
    /// json_writer.begin_array()?;
    /// json_writer.json_value("{\"a\": true}")?;
    /// json_writer.end_array()?;
    /// json_writer.close()?;
    ///
    /// assert_eq!(json_writer.into_inner()?, b"[{\"a\": true}]");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn json_value(&mut self, value: &str) -> Result<(), WriterError> {
        self.write_deferred_name()?;
        self.before_value()?;
        self.write_bytes(value.as_bytes())
    }
}

// Implementation with low level byte writing methods
impl<W: Write> JsonStreamWriter<W> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), WriterError> {
        let mut pos = 0;
        while pos < bytes.len() {
            let copied_count = (self.buf.len() - self.buf_write_pos).min(bytes.len() - pos);
            self.buf[self.buf_write_pos..(self.buf_write_pos + copied_count)]
                .copy_from_slice(&bytes[pos..(pos + copied_count)]);
            self.buf_write_pos += copied_count;
            pos += copied_count;

            if self.buf_write_pos >= self.buf.len() {
                // write_all retries on `ErrorKind::Interrupted`
                self.writer.write_all(&self.buf)?;
                self.buf_write_pos = 0;
            }
        }

        Ok(())
    }

    fn flush_buf(&mut self) -> Result<(), WriterError> {
        self.writer.write_all(&self.buf[0..self.buf_write_pos])?;
        self.buf_write_pos = 0;
        self.writer.flush()?;
        Ok(())
    }
}

// Implementation with JSON structure state methods
impl<W: Write> JsonStreamWriter<W> {
    fn peek_scope(&self) -> Result<Scope, WriterError> {
        self.stack.last().copied().ok_or(WriterError::Closed)
    }

    fn replace_top(&mut self, scope: Scope) {
        if let Some(top) = self.stack.last_mut() {
            *top = scope;
        }
    }

    /// Writes a line break followed by the indentation for the current depth
    fn newline(&mut self) -> Result<(), WriterError> {
        let Some(indent) = &self.writer_settings.indent else {
            return Ok(());
        };

        let depth = self.stack.len().saturating_sub(1);
        let mut line_start = String::with_capacity(1 + indent.len() * depth);
        line_start.push('\n');
        for _ in 0..depth {
            line_start.push_str(indent);
        }
        self.write_bytes(line_start.as_bytes())
    }

    fn before_name(&mut self) -> Result<(), WriterError> {
        match self.peek_scope()? {
            Scope::NonemptyObject => self.write_bytes(b",")?,
            Scope::EmptyObject => {}
            _ => return Err(WriterError::NestingProblem),
        }
        self.newline()?;
        self.replace_top(Scope::DanglingName);
        Ok(())
    }

    fn write_deferred_name(&mut self) -> Result<(), WriterError> {
        if self.deferred_name.is_none() {
            return Ok(());
        }
        // Only take the name once the scope has been verified, so it stays pending on error
        self.before_name()?;
        if let Some(name) = self.deferred_name.take() {
            self.write_string(&name)?;
        }
        Ok(())
    }

    fn before_value(&mut self) -> Result<(), WriterError> {
        match self.peek_scope()? {
            Scope::NonemptyDocument => {
                if !self.writer_settings.lenient {
                    return Err(WriterError::MultipleTopLevelValues);
                }
                trace!("writing additional top-level value");
            }
            Scope::EmptyDocument => self.replace_top(Scope::NonemptyDocument),
            Scope::EmptyArray => {
                self.replace_top(Scope::NonemptyArray);
                self.newline()?;
            }
            Scope::NonemptyArray => {
                self.write_bytes(b",")?;
                self.newline()?;
            }
            Scope::DanglingName => {
                let separator: &[u8] = if self.writer_settings.indent.is_some() {
                    b": "
                } else {
                    b":"
                };
                self.write_bytes(separator)?;
                self.replace_top(Scope::NonemptyObject);
            }
            Scope::EmptyObject | Scope::NonemptyObject => {
                return Err(WriterError::NestingProblem);
            }
        }
        Ok(())
    }

    fn open(&mut self, empty: Scope, bracket: &[u8]) -> Result<(), WriterError> {
        self.write_deferred_name()?;
        self.before_value()?;
        self.stack.push(empty);
        self.write_bytes(bracket)
    }

    fn close_container(
        &mut self,
        empty: Scope,
        nonempty: Scope,
        bracket: &[u8],
    ) -> Result<(), WriterError> {
        let context = self.peek_scope()?;
        if context != empty && context != nonempty {
            return Err(WriterError::NestingProblem);
        }
        if let Some(name) = &self.deferred_name {
            return Err(WriterError::DanglingName(name.clone()));
        }

        self.stack.pop();
        if context == nonempty {
            self.newline()?;
        }
        self.write_bytes(bracket)
    }
}

// Implementation with string writing methods
impl<W: Write> JsonStreamWriter<W> {
    fn should_escape(&self, c: char) -> bool {
        matches!(c, '"' | '\\')
            // Control characters which must be escaped per JSON specification
            || matches!(c, '\u{0}'..='\u{1F}')
            // Line and paragraph separator are not valid in JavaScript string literals
            || matches!(c, '\u{2028}' | '\u{2029}')
            || (self.writer_settings.html_safe && matches!(c, '<' | '>' | '&' | '=' | '\''))
    }

    fn write_escaped_char(&mut self, c: char) -> Result<(), WriterError> {
        let escape = match c {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\u{0008}' => "\\b",
            '\u{000C}' => "\\f",
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            // All other escaped chars are in the Basic Multilingual Plane
            _ => {
                let escape = format!("\\u{:04x}", c as u32);
                return self.write_bytes(escape.as_bytes());
            }
        };
        self.write_bytes(escape.as_bytes())
    }

    fn write_string(&mut self, value: &str) -> Result<(), WriterError> {
        self.write_bytes(b"\"")?;

        let bytes = value.as_bytes();
        let mut next_to_write_index = 0;
        for (index, char) in value.char_indices() {
            if self.should_escape(char) {
                if index > next_to_write_index {
                    self.write_bytes(&bytes[next_to_write_index..index])?;
                }
                self.write_escaped_char(char)?;
                next_to_write_index = index + char.len_utf8();
            }
        }
        // Write remaining bytes
        if next_to_write_index < bytes.len() {
            self.write_bytes(&bytes[next_to_write_index..])?;
        }

        self.write_bytes(b"\"")
    }
}

impl<W: Write> JsonWriter for JsonStreamWriter<W> {
    fn begin_object(&mut self) -> Result<(), WriterError> {
        self.open(Scope::EmptyObject, b"{")
    }

    fn end_object(&mut self) -> Result<(), WriterError> {
        self.close_container(Scope::EmptyObject, Scope::NonemptyObject, b"}")
    }

    fn begin_array(&mut self) -> Result<(), WriterError> {
        self.open(Scope::EmptyArray, b"[")
    }

    fn end_array(&mut self) -> Result<(), WriterError> {
        self.close_container(Scope::EmptyArray, Scope::NonemptyArray, b"]")
    }

    fn name(&mut self, name: &str) -> Result<(), WriterError> {
        if let Some(pending) = &self.deferred_name {
            return Err(WriterError::NameAlreadyPending(pending.clone()));
        }
        if self.stack.is_empty() {
            return Err(WriterError::Closed);
        }
        self.deferred_name = Some(name.to_owned());
        Ok(())
    }

    fn null_value(&mut self) -> Result<(), WriterError> {
        if self.deferred_name.is_some() {
            if self.writer_settings.serialize_nulls {
                self.write_deferred_name()?;
            } else {
                // Skip the name and the value
                self.deferred_name = None;
                return Ok(());
            }
        }
        self.before_value()?;
        self.write_bytes(b"null")
    }

    fn bool_value(&mut self, value: bool) -> Result<(), WriterError> {
        self.write_deferred_name()?;
        self.before_value()?;
        self.write_bytes(if value { b"true" } else { b"false" })
    }

    fn string_value(&mut self, value: &str) -> Result<(), WriterError> {
        self.write_deferred_name()?;
        self.before_value()?;
        self.write_string(value)
    }

    fn number_value_from_string(&mut self, value: &str) -> Result<(), WriterError> {
        validate_number_string(value, self.writer_settings.lenient)?;
        self.write_deferred_name()?;
        self.before_value()?;
        self.write_bytes(value.as_bytes())
    }

    fn number_value<N: FiniteNumber>(&mut self, value: N) -> Result<(), WriterError> {
        self.write_deferred_name()?;
        self.before_value()?;
        self.write_bytes(value.to_json_number().as_bytes())
    }

    fn fp_number_value<N: FloatingPointNumber>(&mut self, value: N) -> Result<(), WriterError> {
        let string = value.to_json_number();
        if !value.as_f64().is_finite() && !self.writer_settings.lenient {
            return Err(WriterError::NonFiniteNumber(string));
        }
        self.write_deferred_name()?;
        self.before_value()?;
        self.write_bytes(string.as_bytes())
    }

    fn is_lenient(&self) -> bool {
        self.writer_settings.lenient
    }

    fn serialize_nulls(&self) -> bool {
        self.writer_settings.serialize_nulls
    }

    fn flush(&mut self) -> Result<(), WriterError> {
        if self.stack.is_empty() {
            return Err(WriterError::Closed);
        }
        self.flush_buf()
    }

    fn close(&mut self) -> Result<(), WriterError> {
        self.flush_buf()?;

        let is_complete = match self.stack.as_slice() {
            [] | [Scope::NonemptyDocument] => true,
            _ => false,
        };
        if !is_complete {
            return Err(WriterError::IncompleteDocument);
        }
        if !self.stack.is_empty() {
            debug!("closed JSON stream writer");
        }
        self.stack.clear();
        Ok(())
    }
}

impl<W: Write + Debug> Debug for JsonStreamWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonStreamWriter")
            .field("writer", &self.writer)
            .field("buf_count", &self.buf_write_pos)
            .field(
                "buf_str",
                &String::from_utf8_lossy(&self.buf[..self.buf_write_pos]),
            )
            .field("stack", &self.stack)
            .field("deferred_name", &self.deferred_name)
            .field("writer_settings", &self.writer_settings)
            .finish()
    }
}

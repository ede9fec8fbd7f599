//! [`JsonWriter`] implementation which builds a [`JsonElement`]

use tracing::debug;

use super::*;
use crate::tree::JsonObject;

#[derive(Debug)]
enum Container {
    Array(Vec<JsonElement>),
    Object(JsonObject),
}

#[derive(Debug)]
struct StackValue {
    container: Container,
    /// Name under which the container is added to the enclosing object once it is ended
    member_name: Option<String>,
}

/// A JSON writer which builds a [`JsonElement`] tree instead of JSON text
///
/// Incorrect usage is reported the same way as by [`JsonStreamWriter`], except that a
/// second top-level value is always rejected, even if the writer is lenient.
///
/// # Examples
/// ```
/// # use treeson::writer::*;
/// # use treeson::tree::*;
/// let mut json_writer = JsonTreeWriter::new();
/// json_writer.begin_object()?;
/// json_writer.name("a")?;
/// json_writer.number_value(1)?;
/// json_writer.end_object()?;
///
/// let element = json_writer.into_element()?;
/// let mut expected = JsonObject::new();
/// expected.add_property("a", 1);
/// assert_eq!(JsonElement::Object(expected), element);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct JsonTreeWriter {
    stack: Vec<StackValue>,
    pending_name: Option<String>,
    /// Holds the top-level value once it is complete
    product: Option<JsonElement>,
    closed: bool,
    writer_settings: WriterSettings,
}

impl Default for JsonTreeWriter {
    fn default() -> Self {
        JsonTreeWriter::new()
    }
}

impl JsonTreeWriter {
    /// Creates a JSON tree writer with [default settings](WriterSettings::default)
    pub fn new() -> Self {
        JsonTreeWriter::new_custom(WriterSettings::default())
    }

    /// Creates a JSON tree writer with custom settings
    ///
    /// Only [`lenient`](WriterSettings::lenient) and [`serialize_nulls`](WriterSettings::serialize_nulls)
    /// have an effect; the other settings only affect JSON text.
    pub fn new_custom(writer_settings: WriterSettings) -> Self {
        JsonTreeWriter {
            stack: Vec::new(),
            pending_name: None,
            product: None,
            closed: false,
            writer_settings,
        }
    }

    #[allow(missing_docs)]
    pub fn set_lenient(&mut self, lenient: bool) {
        self.writer_settings.lenient = lenient;
    }

    #[allow(missing_docs)]
    pub fn set_serialize_nulls(&mut self, serialize_nulls: bool) {
        self.writer_settings.serialize_nulls = serialize_nulls;
    }

    /// Gets the written top-level value
    ///
    /// # Errors
    /// [`WriterError::IncompleteDocument`] if no value has been written or a JSON array
    /// or object has not been ended yet.
    pub fn into_element(self) -> Result<JsonElement, WriterError> {
        if !self.stack.is_empty() {
            return Err(WriterError::IncompleteDocument);
        }
        self.product.ok_or(WriterError::IncompleteDocument)
    }

    fn check_open(&self) -> Result<(), WriterError> {
        if self.closed {
            Err(WriterError::Closed)
        } else {
            Ok(())
        }
    }

    fn check_before_value(&self) -> Result<(), WriterError> {
        self.check_open()?;
        match self.stack.last() {
            Some(StackValue {
                container: Container::Object(_),
                ..
            }) => {
                if self.pending_name.is_none() {
                    return Err(WriterError::NestingProblem);
                }
            }
            Some(_) => {}
            None => {
                if self.product.is_some() {
                    return Err(WriterError::MultipleTopLevelValues);
                }
            }
        }
        Ok(())
    }

    fn add_value(&mut self, value: JsonElement, member_name: Option<String>) {
        match self.stack.last_mut() {
            Some(StackValue {
                container: Container::Array(items),
                ..
            }) => items.push(value),
            Some(StackValue {
                container: Container::Object(object),
                ..
            }) => {
                debug_assert!(
                    member_name.is_some(),
                    "caller should have verified that member name is present"
                );
                if let Some(name) = member_name {
                    object.insert(name, value);
                }
            }
            None => self.product = Some(value),
        }
    }

    fn put(&mut self, value: JsonElement) -> Result<(), WriterError> {
        self.check_before_value()?;
        let member_name = self.pending_name.take();
        self.add_value(value, member_name);
        Ok(())
    }

    fn begin(&mut self, container: Container) -> Result<(), WriterError> {
        self.check_before_value()?;
        let member_name = self.pending_name.take();
        self.stack.push(StackValue {
            container,
            member_name,
        });
        Ok(())
    }

    fn end(&mut self, is_array: bool) -> Result<(), WriterError> {
        self.check_open()?;
        let matches = match self.stack.last() {
            Some(StackValue {
                container: Container::Array(_),
                ..
            }) => is_array,
            Some(StackValue {
                container: Container::Object(_),
                ..
            }) => !is_array,
            None => false,
        };
        if !matches {
            return Err(WriterError::NestingProblem);
        }
        if let Some(name) = &self.pending_name {
            return Err(WriterError::DanglingName(name.clone()));
        }

        if let Some(StackValue {
            container,
            member_name,
        }) = self.stack.pop()
        {
            let value = match container {
                Container::Array(items) => JsonElement::Array(items),
                Container::Object(object) => JsonElement::Object(object),
            };
            self.add_value(value, member_name);
        }
        Ok(())
    }
}

impl JsonWriter for JsonTreeWriter {
    fn begin_object(&mut self) -> Result<(), WriterError> {
        self.begin(Container::Object(JsonObject::new()))
    }

    fn end_object(&mut self) -> Result<(), WriterError> {
        self.end(false)
    }

    fn begin_array(&mut self) -> Result<(), WriterError> {
        self.begin(Container::Array(Vec::new()))
    }

    fn end_array(&mut self) -> Result<(), WriterError> {
        self.end(true)
    }

    fn name(&mut self, name: &str) -> Result<(), WriterError> {
        self.check_open()?;
        if let Some(pending) = &self.pending_name {
            return Err(WriterError::NameAlreadyPending(pending.clone()));
        }
        match self.stack.last() {
            Some(StackValue {
                container: Container::Object(_),
                ..
            }) => {
                self.pending_name = Some(name.to_owned());
                Ok(())
            }
            _ => Err(WriterError::NestingProblem),
        }
    }

    fn null_value(&mut self) -> Result<(), WriterError> {
        if self.pending_name.is_some() && !self.writer_settings.serialize_nulls {
            self.check_open()?;
            // Skip the name and the value
            self.pending_name = None;
            return Ok(());
        }
        self.put(JsonElement::Null)
    }

    fn bool_value(&mut self, value: bool) -> Result<(), WriterError> {
        self.put(JsonElement::Bool(value))
    }

    fn string_value(&mut self, value: &str) -> Result<(), WriterError> {
        self.put(JsonElement::String(value.to_owned()))
    }

    fn number_value_from_string(&mut self, value: &str) -> Result<(), WriterError> {
        validate_number_string(value, self.writer_settings.lenient)?;
        self.put(JsonElement::Number(JsonNumber::Lazy(value.to_owned())))
    }

    fn number_value<N: FiniteNumber>(&mut self, value: N) -> Result<(), WriterError> {
        let number = if let Some(i) = value.as_i64() {
            JsonNumber::Integer(i)
        } else if let Some(u) = value.as_u64() {
            JsonNumber::Unsigned(u)
        } else {
            // Only for 128-bit values outside the 64-bit range
            JsonNumber::Lazy(value.to_json_number())
        };
        self.put(JsonElement::Number(number))
    }

    fn fp_number_value<N: FloatingPointNumber>(&mut self, value: N) -> Result<(), WriterError> {
        let number = value.to_tree_number();
        if number.is_non_finite() && !self.writer_settings.lenient {
            return Err(WriterError::NonFiniteNumber(value.to_json_number()));
        }
        self.put(JsonElement::Number(number))
    }

    fn is_lenient(&self) -> bool {
        self.writer_settings.lenient
    }

    fn serialize_nulls(&self) -> bool {
        self.writer_settings.serialize_nulls
    }

    fn flush(&mut self) -> Result<(), WriterError> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), WriterError> {
        if !self.stack.is_empty() {
            return Err(WriterError::IncompleteDocument);
        }
        if !self.closed {
            debug!("closed JSON tree writer");
        }
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn write() -> TestResult {
        let mut json_writer = JsonTreeWriter::new();
        json_writer.begin_array()?;
        json_writer.begin_object()?;
        json_writer.name("a")?;
        json_writer.begin_array()?;
        json_writer.number_value(u64::MAX)?;
        json_writer.number_value(-1_i128)?;
        json_writer.number_value(u128::MAX)?;
        json_writer.end_array()?;
        json_writer.name("b")?;
        json_writer.null_value()?;
        json_writer.end_object()?;
        json_writer.fp_number_value(2.5_f32)?;
        json_writer.number_value_from_string("1e3")?;
        json_writer.string_value("text")?;
        json_writer.bool_value(false)?;
        json_writer.end_array()?;
        json_writer.close()?;

        let mut object = JsonObject::new();
        object.insert(
            "a",
            vec![
                JsonElement::Number(JsonNumber::Unsigned(u64::MAX)),
                JsonElement::Number(JsonNumber::Integer(-1)),
                JsonElement::lazy_number(u128::MAX.to_string()),
            ],
        );
        object.insert("b", JsonElement::Null);
        let expected = JsonElement::Array(vec![
            object.into(),
            2.5_f32.into(),
            JsonElement::lazy_number("1e3"),
            "text".into(),
            false.into(),
        ]);
        assert_eq!(expected, json_writer.into_element()?);
        Ok(())
    }

    #[test]
    fn serialize_nulls_disabled() -> TestResult {
        let mut json_writer = JsonTreeWriter::new();
        json_writer.set_serialize_nulls(false);
        json_writer.begin_object()?;
        json_writer.name("a")?;
        json_writer.null_value()?;
        json_writer.name("b")?;
        json_writer.begin_array()?;
        json_writer.null_value()?;
        json_writer.end_array()?;
        json_writer.end_object()?;

        let mut expected = JsonObject::new();
        expected.insert("b", vec![JsonElement::Null]);
        assert_eq!(JsonElement::Object(expected), json_writer.into_element()?);
        Ok(())
    }

    #[test]
    fn incorrect_usage() -> TestResult {
        let mut json_writer = JsonTreeWriter::new();
        assert!(matches!(
            json_writer.name("a"),
            Err(WriterError::NestingProblem)
        ));
        assert!(matches!(
            json_writer.end_array(),
            Err(WriterError::NestingProblem)
        ));

        json_writer.begin_object()?;
        assert!(matches!(
            json_writer.string_value("a"),
            Err(WriterError::NestingProblem)
        ));
        assert!(matches!(
            json_writer.end_array(),
            Err(WriterError::NestingProblem)
        ));
        json_writer.name("a")?;
        assert!(matches!(
            json_writer.name("b"),
            Err(WriterError::NameAlreadyPending(_))
        ));
        match json_writer.end_object() {
            Err(WriterError::DanglingName(name)) => assert_eq!("a", name),
            r => panic!("Unexpected result: {r:?}"),
        }
        assert!(matches!(
            json_writer.fp_number_value(f64::NEG_INFINITY),
            Err(WriterError::NonFiniteNumber(_))
        ));
        assert!(matches!(
            json_writer.close(),
            Err(WriterError::IncompleteDocument)
        ));

        json_writer.set_lenient(true);
        json_writer.fp_number_value(f64::NEG_INFINITY)?;
        json_writer.end_object()?;

        // Lenient mode does not allow a second root
        assert!(matches!(
            json_writer.null_value(),
            Err(WriterError::MultipleTopLevelValues)
        ));

        json_writer.close()?;
        assert!(matches!(
            json_writer.begin_array(),
            Err(WriterError::Closed)
        ));
        assert!(json_writer.into_element()?.is_object());
        Ok(())
    }

    #[test]
    fn incomplete_element() -> TestResult {
        let json_writer = JsonTreeWriter::new();
        assert!(matches!(
            json_writer.into_element(),
            Err(WriterError::IncompleteDocument)
        ));

        let mut json_writer = JsonTreeWriter::new();
        json_writer.begin_array()?;
        assert!(matches!(
            json_writer.into_element(),
            Err(WriterError::IncompleteDocument)
        ));
        Ok(())
    }
}

//! Common library module for integration tests
// See https://doc.rust-lang.org/book/ch11-03-test-organization.html#submodules-in-integration-tests

use treeson::{
    reader::{JsonReader, JsonToken, ReaderError},
    tree::{JsonElement, JsonObject},
    writer::{JsonWriter, WriterError},
};

#[derive(PartialEq, Eq, Debug)]
pub enum JsonEvent {
    ArrayStart,
    ArrayEnd,
    ObjectStart,
    ObjectEnd,
    MemberName(String),

    StringValue(String),
    // Contains string representation of number value
    NumberValue(String),
    BoolValue(bool),
    NullValue,
}

fn object<const N: usize>(members: [(&str, JsonElement); N]) -> JsonElement {
    JsonElement::Object(members.into_iter().collect::<JsonObject>())
}

/// Gets the JSON tree whose events are returned by [`get_expected_events`]
pub fn get_test_tree() -> JsonElement {
    JsonElement::Array(vec![
        // Arrays
        JsonElement::Array(vec![]),
        JsonElement::Array(vec![1.into()]),
        JsonElement::Array(vec![
            1.into(),
            "a".into(),
            true.into(),
            object([(
                "nested",
                JsonElement::Array(vec![object([(
                    "nested2",
                    JsonElement::Array(vec![2.into()]),
                )])]),
            )]),
        ]),
        // Objects
        object([]),
        object([("name", 1.into())]),
        object([
            ("name1", false.into()),
            ("name2", "value".into()),
            ("name3", 2.into()),
            ("", 3.into()),
        ]),
        // Strings
        "string value".into(),
        "\0 test \n\t \\ \"".into(),
        "unicode § ಀ ᠅ 𝄆".into(),
        // Numbers
        0.into(),
        (-1234).into(),
        567.89.into(),
        JsonElement::lazy_number("100e-10"),
        JsonElement::lazy_number("6.070e+010"),
        // Literals
        true.into(),
        false.into(),
        JsonElement::Null,
    ])
}

/// Gets the events expected for the JSON tree returned by [`get_test_tree`]
pub fn get_expected_events() -> Vec<JsonEvent> {
    vec![
        JsonEvent::ArrayStart,
        // Arrays
        JsonEvent::ArrayStart,
        JsonEvent::ArrayEnd,
        //   Array with single item
        JsonEvent::ArrayStart,
        JsonEvent::NumberValue("1".to_owned()),
        JsonEvent::ArrayEnd,
        //   Array with multiple items
        JsonEvent::ArrayStart,
        JsonEvent::NumberValue("1".to_owned()),
        JsonEvent::StringValue("a".to_owned()),
        JsonEvent::BoolValue(true),
        JsonEvent::ObjectStart,
        JsonEvent::MemberName("nested".to_owned()),
        JsonEvent::ArrayStart,
        JsonEvent::ObjectStart,
        JsonEvent::MemberName("nested2".to_owned()),
        JsonEvent::ArrayStart,
        JsonEvent::NumberValue("2".to_owned()),
        JsonEvent::ArrayEnd,
        JsonEvent::ObjectEnd,
        JsonEvent::ArrayEnd,
        JsonEvent::ObjectEnd,
        JsonEvent::ArrayEnd,
        // Objects
        JsonEvent::ObjectStart,
        JsonEvent::ObjectEnd,
        //   Object with single member
        JsonEvent::ObjectStart,
        JsonEvent::MemberName("name".to_owned()),
        JsonEvent::NumberValue("1".to_owned()),
        JsonEvent::ObjectEnd,
        //   Object with multiple members
        JsonEvent::ObjectStart,
        JsonEvent::MemberName("name1".to_owned()),
        JsonEvent::BoolValue(false),
        JsonEvent::MemberName("name2".to_owned()),
        JsonEvent::StringValue("value".to_owned()),
        JsonEvent::MemberName("name3".to_owned()),
        JsonEvent::NumberValue("2".to_owned()),
        JsonEvent::MemberName("".to_owned()),
        JsonEvent::NumberValue("3".to_owned()),
        JsonEvent::ObjectEnd,
        // Strings
        JsonEvent::StringValue("string value".to_owned()),
        JsonEvent::StringValue("\0 test \n\t \\ \"".to_owned()),
        JsonEvent::StringValue("unicode § ಀ ᠅ 𝄆".to_owned()),
        // Numbers
        JsonEvent::NumberValue("0".to_owned()),
        JsonEvent::NumberValue("-1234".to_owned()),
        JsonEvent::NumberValue("567.89".to_owned()),
        JsonEvent::NumberValue("100e-10".to_owned()),
        JsonEvent::NumberValue("6.070e+010".to_owned()),
        // Literals
        JsonEvent::BoolValue(true),
        JsonEvent::BoolValue(false),
        JsonEvent::NullValue,
        JsonEvent::ArrayEnd,
    ]
}

/// Compact JSON text of the tree returned by [`get_test_tree`]
pub const TEST_TREE_JSON: &str = r#"[[],[1],[1,"a",true,{"nested":[{"nested2":[2]}]}],{},{"name":1},{"name1":false,"name2":"value","name3":2,"":3},"string value","\u0000 test \n\t \\ \"","unicode § ಀ ᠅ 𝄆",0,-1234,567.89,100e-10,6.070e+010,true,false,null]"#;

/// Reads all tokens until the end of the document and converts them to events
pub fn read_events<R: JsonReader>(json_reader: &mut R) -> Result<Vec<JsonEvent>, ReaderError> {
    let mut events = Vec::new();
    loop {
        let event = match json_reader.peek()? {
            JsonToken::BeginArray => {
                json_reader.begin_array()?;
                JsonEvent::ArrayStart
            }
            JsonToken::EndArray => {
                json_reader.end_array()?;
                JsonEvent::ArrayEnd
            }
            JsonToken::BeginObject => {
                json_reader.begin_object()?;
                JsonEvent::ObjectStart
            }
            JsonToken::EndObject => {
                json_reader.end_object()?;
                JsonEvent::ObjectEnd
            }
            JsonToken::Name => JsonEvent::MemberName(json_reader.next_name_owned()?),
            JsonToken::String => JsonEvent::StringValue(json_reader.next_string()?),
            JsonToken::Number => JsonEvent::NumberValue(json_reader.next_string()?),
            JsonToken::Boolean => JsonEvent::BoolValue(json_reader.next_bool()?),
            JsonToken::Null => {
                json_reader.next_null()?;
                JsonEvent::NullValue
            }
            JsonToken::EndDocument => return Ok(events),
        };
        events.push(event);
    }
}

/// Writes the events to the JSON writer
pub fn write_events<W: JsonWriter>(
    json_writer: &mut W,
    events: &[JsonEvent],
) -> Result<(), WriterError> {
    for event in events {
        match event {
            JsonEvent::ArrayStart => json_writer.begin_array()?,
            JsonEvent::ArrayEnd => json_writer.end_array()?,
            JsonEvent::ObjectStart => json_writer.begin_object()?,
            JsonEvent::ObjectEnd => json_writer.end_object()?,
            JsonEvent::MemberName(name) => json_writer.name(name)?,
            JsonEvent::StringValue(value) => json_writer.string_value(value)?,
            JsonEvent::NumberValue(value) => json_writer.number_value_from_string(value)?,
            JsonEvent::BoolValue(value) => json_writer.bool_value(*value)?,
            JsonEvent::NullValue => json_writer.null_value()?,
        }
    }
    Ok(())
}

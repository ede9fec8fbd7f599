use std::error::Error;

use treeson::writer::{JsonStreamWriter, JsonWriter, WriterError, WriterSettings};

use crate::test_lib::{get_expected_events, get_test_tree, write_events, TEST_TREE_JSON};

// Ignore dead code warnings because this test does not use all functions from `test_lib`
#[allow(dead_code)]
mod test_lib;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn writer_test() -> TestResult {
    let mut writer = Vec::<u8>::new();
    let mut json_writer = JsonStreamWriter::new(&mut writer);

    write_events(&mut json_writer, &get_expected_events())?;
    json_writer.close()?;

    assert_eq!(TEST_TREE_JSON, String::from_utf8(writer)?);
    Ok(())
}

#[test]
fn element_value() -> TestResult {
    let mut json_writer = JsonStreamWriter::new(Vec::<u8>::new());
    json_writer.element_value(&get_test_tree())?;
    json_writer.close()?;

    assert_eq!(TEST_TREE_JSON, String::from_utf8(json_writer.into_inner()?)?);
    Ok(())
}

#[test]
fn pretty_print() -> TestResult {
    let mut json_writer = JsonStreamWriter::new_custom(
        Vec::<u8>::new(),
        WriterSettings {
            indent: Some("  ".to_owned()),
            ..Default::default()
        },
    );

    json_writer.begin_array()?;
    json_writer.begin_array()?;
    json_writer.end_array()?;
    json_writer.begin_object()?;
    json_writer.end_object()?;
    json_writer.begin_object()?;
    json_writer.name("a")?;
    json_writer.number_value(1)?;
    json_writer.name("b")?;
    json_writer.begin_array()?;
    json_writer.bool_value(true)?;
    json_writer.null_value()?;
    json_writer.end_array()?;
    json_writer.end_object()?;
    json_writer.end_array()?;
    json_writer.close()?;

    let expected = r#"[
  [],
  {},
  {
    "a": 1,
    "b": [
      true,
      null
    ]
  }
]"#;
    assert_eq!(expected, String::from_utf8(json_writer.into_inner()?)?);
    Ok(())
}

#[test]
fn html_safe() -> TestResult {
    let mut json_writer = JsonStreamWriter::new_custom(
        Vec::<u8>::new(),
        WriterSettings {
            html_safe: true,
            ..Default::default()
        },
    );
    assert_eq!(true, json_writer.is_html_safe());

    json_writer.begin_object()?;
    json_writer.name("<a href='x'>")?;
    json_writer.string_value("a=1&b=2")?;
    json_writer.end_object()?;
    json_writer.close()?;

    assert_eq!(
        r#"{"\u003ca href\u003d\u0027x\u0027\u003e":"a\u003d1\u0026b\u003d2"}"#,
        String::from_utf8(json_writer.into_inner()?)?
    );
    Ok(())
}

#[test]
fn line_separators_escaped() -> TestResult {
    let mut json_writer = JsonStreamWriter::new(Vec::<u8>::new());
    json_writer.string_value("a\u{2028}b\u{2029}c\u{7F}")?;
    json_writer.close()?;

    assert_eq!(
        "\"a\\u2028b\\u2029c\u{7F}\"",
        String::from_utf8(json_writer.into_inner()?)?
    );
    Ok(())
}

#[test]
fn lenient() -> TestResult {
    let mut json_writer = JsonStreamWriter::new(Vec::<u8>::new());
    assert!(matches!(
        json_writer.number_value_from_string("NaN"),
        Err(WriterError::NonFiniteNumber(_))
    ));
    assert!(matches!(
        json_writer.fp_number_value(f32::INFINITY),
        Err(WriterError::NonFiniteNumber(_))
    ));

    json_writer.set_lenient(true);
    assert_eq!(true, json_writer.is_lenient());
    json_writer.begin_array()?;
    json_writer.number_value_from_string("NaN")?;
    json_writer.number_value_from_string("-Infinity")?;
    json_writer.fp_number_value(f32::INFINITY)?;
    json_writer.end_array()?;
    // Multiple top-level values
    json_writer.bool_value(true)?;
    json_writer.close()?;

    assert_eq!(
        "[NaN,-Infinity,Infinity]true",
        String::from_utf8(json_writer.into_inner()?)?
    );
    Ok(())
}

#[test]
fn lenient_does_not_allow_malformed_numbers() {
    let mut json_writer = JsonStreamWriter::new_custom(
        Vec::<u8>::new(),
        WriterSettings {
            lenient: true,
            ..Default::default()
        },
    );

    for number in ["", "-", "01", "1.", ".5", "1e", "0x1", "nan", "+1"] {
        match json_writer.number_value_from_string(number) {
            Err(WriterError::InvalidNumber(value)) => assert_eq!(number, value),
            r => panic!("Unexpected result for '{number}': {r:?}"),
        }
    }
}

#[test]
fn serialize_nulls() -> TestResult {
    let mut json_writer = JsonStreamWriter::new(Vec::<u8>::new());
    json_writer.set_serialize_nulls(false);
    assert_eq!(false, json_writer.serialize_nulls());

    json_writer.begin_object()?;
    json_writer.name("a")?;
    json_writer.null_value()?;
    json_writer.name("b")?;
    json_writer.begin_array()?;
    // Array items are not affected
    json_writer.null_value()?;
    json_writer.end_array()?;
    json_writer.name("c")?;
    json_writer.null_value()?;
    json_writer.end_object()?;
    json_writer.close()?;

    assert_eq!(
        r#"{"b":[null]}"#,
        String::from_utf8(json_writer.into_inner()?)?
    );
    Ok(())
}

#[test]
fn raw_json_value() -> TestResult {
    let mut json_writer = JsonStreamWriter::new(Vec::<u8>::new());
    json_writer.begin_object()?;
    json_writer.name("raw")?;
    json_writer.json_value("[1, 2]")?;
    json_writer.name("next")?;
    json_writer.json_value("")?;
    json_writer.end_object()?;
    json_writer.close()?;

    assert_eq!(
        r#"{"raw":[1, 2],"next":}"#,
        String::from_utf8(json_writer.into_inner()?)?
    );
    Ok(())
}

#[test]
fn flush() -> TestResult {
    let mut json_writer = JsonStreamWriter::new(Vec::<u8>::new());
    json_writer.begin_array()?;
    json_writer.string_value("a")?;
    // Data is buffered
    assert!(json_writer.get_ref().is_empty());

    json_writer.flush()?;
    assert_eq!(br#"["a""#, json_writer.get_ref().as_slice());

    json_writer.end_array()?;
    json_writer.close()?;
    assert!(matches!(json_writer.flush(), Err(WriterError::Closed)));
    assert_eq!(br#"["a"]"#, json_writer.into_inner()?.as_slice());
    Ok(())
}

#[test]
fn incomplete_document() -> TestResult {
    let mut json_writer = JsonStreamWriter::new(Vec::<u8>::new());
    assert!(matches!(
        json_writer.close(),
        Err(WriterError::IncompleteDocument)
    ));

    json_writer.begin_object()?;
    json_writer.name("a")?;
    assert!(matches!(
        json_writer.close(),
        Err(WriterError::IncompleteDocument)
    ));
    match json_writer.end_object() {
        Err(WriterError::DanglingName(name)) => assert_eq!("a", name),
        r => panic!("Unexpected result: {r:?}"),
    }

    json_writer.string_value("v")?;
    json_writer.end_object()?;
    json_writer.close()?;
    // Closing again has no effect
    json_writer.close()?;
    assert!(matches!(
        json_writer.string_value("x"),
        Err(WriterError::Closed)
    ));
    Ok(())
}

#![warn(missing_docs)]
#![forbid(unsafe_code)]
// Allow needless `return` because that makes it sometimes more obvious that
// an expression is the result of the function
#![allow(clippy::needless_return)]
// Allow `assert_eq!(true, ...)` because in some cases it is used to check a bool
// value and not a 'flag' / 'state', and `assert_eq!` makes that more explicit
#![allow(clippy::bool_assert_comparison)]
// Enable 'unused' warnings for doc tests (are disabled by default)
#![doc(test(no_crate_inject))]
#![doc(test(attr(warn(unused))))]
// Fail on warnings in doc tests
#![doc(test(attr(deny(warnings))))]
// When `docsrs` configuration flag is set enable banner for features in documentation
// See https://stackoverflow.com/q/61417452
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Treeson is a JSON tree model together with a token reader over such trees and a
//! streaming JSON writer.
//!
//! The [`tree`] module holds complete JSON values in memory. A [`JsonTreeReader`](reader::JsonTreeReader)
//! walks such a tree and produces the same token stream a JSON parser would produce for the
//! corresponding JSON text, so code written against the [`JsonReader`](reader::JsonReader) trait
//! works for trees as well. The [`JsonStreamWriter`](writer::JsonStreamWriter) writes JSON text
//! token by token and validates the nesting of the written tokens.
//!
//! The API follows the streaming API of the Java library [Gson](https://github.com/google/gson),
//! including its lenient mode, HTML-safe escaping and optional omission of `null` members.
//!
//! # Terminology
//!
//! This crate uses the same terminology as the JSON specification:
//!
//! - *object*: `{ ... }`
//!   - *member*: Entry in an object. For example the JSON object `{"a": 1}` has the member
//!     `"a": 1` where `"a"` is the member *name* and `1` is the member *value*.
//! - *array*: `[ ... ]`
//! - *literal*:
//!   - *boolean*: `true` or `false`
//!   - `null`
//! - *number*: number value, for example `123.4e+10`
//! - *string*: string value, for example `"text in \"quotes\""`
//!
//! # Usage examples
//!
//! ## Reading
//!
//! ```
//! # use treeson::reader::*;
//! # use treeson::tree::*;
//! let element = JsonElement::Array(vec![1.into(), true.into()]);
//! let mut json_reader = JsonTreeReader::new(&element);
//!
//! json_reader.begin_array()?;
//! assert_eq!(1, json_reader.next_i32()?);
//! assert_eq!(true, json_reader.next_bool()?);
//! json_reader.end_array()?;
//!
//! assert_eq!(JsonToken::EndDocument, json_reader.peek()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Writing
//! ```
//! # use treeson::writer::*;
//! let mut json_writer = JsonStreamWriter::new(Vec::<u8>::new());
//!
//! json_writer.begin_object()?;
//! json_writer.name("a")?;
//!
//! json_writer.begin_array()?;
//! json_writer.number_value(1)?;
//! json_writer.bool_value(true)?;
//! json_writer.end_array()?;
//!
//! json_writer.end_object()?;
//! // Ensures that the JSON document is complete and flushes the buffer
//! json_writer.close()?;
//!
//! let json = String::from_utf8(json_writer.into_inner()?)?;
//! assert_eq!(json, r#"{"a":[1,true]}"#);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Building a tree
//! ```
//! # use treeson::writer::*;
//! let mut json_writer = JsonTreeWriter::new();
//! json_writer.begin_array()?;
//! json_writer.string_value("text")?;
//! json_writer.end_array()?;
//!
//! let element = json_writer.into_element()?;
//! assert_eq!(r#"["text"]"#, element.to_string());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Serde integration
//! Optional integration with [Serde](https://docs.rs/serde/latest/serde/) exists, which allows
//! converting a [`JsonElement`](tree::JsonElement) from and to any Serde data format. It can be
//! enabled with the `serde` feature.

pub mod reader;
pub mod tree;
pub mod writer;

#[cfg(feature = "serde")]
pub mod serde;

mod json_number;

// nmlio/src/lib.rs

//! A Rust-native library for reading and writing Fortran namelist
//! configuration files.
//!
//! This library provides functionality to:
//! - Parse namelist text into an ordered document of groups and values
//! - Generate normalized namelist text from a document
//! - Handle integer, real, logical and string scalars plus flat arrays,
//!   including `count*value` repetition syntax
//! - Read the legacy `$`-delimited group form
//! - Convert a document to and from JSON (with the `json` feature)

pub mod error;
pub mod namelist;
pub mod parser;
pub mod tokenizer;
pub mod value;

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub use error::{NmlError, Result};
pub use namelist::{Namelist, NamelistGroup};
pub use parser::Parser;
pub use value::Value;

/// Parse a namelist from a file path.
///
/// The file is closed on every exit path before control returns.
///
/// # Examples
///
/// ```no_run
/// fn main() -> Result<(), nmlio::NmlError> {
///     let nml = nmlio::read("data.nml")?;
///     println!("{:#?}", nml);
///     Ok(())
/// }
/// ```
pub fn read<P: AsRef<Path>>(path: P) -> Result<Namelist> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    reads(&contents)
}

/// Parse a namelist from any reader.
pub fn read_from<R: Read>(reader: &mut R) -> Result<Namelist> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    reads(&contents)
}

/// Parse a namelist from a string.
///
/// # Examples
///
/// ```
/// fn main() -> Result<(), nmlio::NmlError> {
///     let nml = nmlio::reads("&data_nml\n x = 1\n y = 2.0\n z = .true.\n/")?;
///     assert!(nml.has_group("data_nml"));
///     Ok(())
/// }
/// ```
pub fn reads(content: &str) -> Result<Namelist> {
    Parser::new().parse(content)
}

/// Render a namelist document as normalized namelist text.
pub fn writes(nml: &Namelist) -> String {
    nml.to_nml_string()
}

/// Write a namelist to a file, returning the emitted text so callers can
/// round-trip-check without re-reading the file.
///
/// # Examples
///
/// ```no_run
/// fn main() -> Result<(), nmlio::NmlError> {
///     let mut nml = nmlio::Namelist::new();
///     nml.insert_group("data_nml")
///         .insert("x", 1i64)
///         .insert("y", 2.0f64)
///         .insert("enabled", true);
///     nmlio::write(&nml, "output.nml")?;
///     Ok(())
/// }
/// ```
pub fn write<P: AsRef<Path>>(nml: &Namelist, path: P) -> Result<String> {
    let mut file = File::create(path)?;
    write_to_writer(nml, &mut file)
}

/// Write a namelist to any writer implementing the `Write` trait,
/// returning the emitted text.
pub fn write_to_writer<W: Write>(nml: &Namelist, writer: &mut W) -> Result<String> {
    nml.write_to(writer)
}

#[cfg(feature = "json")]
/// Convert a namelist to a JSON string.
pub fn to_json(nml: &Namelist) -> Result<String> {
    serde_json::to_string_pretty(nml).map_err(NmlError::from)
}

#[cfg(feature = "json")]
/// Parse a namelist from a JSON string.
pub fn from_json(json: &str) -> Result<Namelist> {
    serde_json::from_str(json).map_err(NmlError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_simple() {
        let nml = reads("&data_nml\n x = 1\n y = 2.0\n z = .true.\n/").unwrap();

        let group = nml.get_group("data_nml").unwrap();
        assert_eq!(group.get_i64("x"), Some(1));
        assert_eq!(group.get_f64("y"), Some(2.0));
        assert_eq!(group.get_bool("z"), Some(true));
    }

    #[test]
    fn test_writes_simple() {
        let mut nml = Namelist::new();
        nml.insert_group("data_nml")
            .insert("x", 1i64)
            .insert("y", 2.0f64)
            .insert("enabled", true);

        let output = writes(&nml);
        assert_eq!(output, "&data_nml\nx = 1\ny = 2.0\nenabled = .true.\n/");
    }

    #[test]
    fn test_round_trip() {
        let mut nml = Namelist::new();
        nml.insert_group("core")
            .insert("steps", 100i64)
            .insert("dt", 2.5f64)
            .insert("label", "run 'a'")
            .insert("active", true)
            .insert(
                "weights",
                Value::Array(vec![Value::Real(1.0), Value::Real(0.5), Value::Real(0.25)]),
            );
        nml.insert_group("output").insert("verbose", false);

        let text = writes(&nml);
        let reread = reads(&text).unwrap();
        assert_eq!(reread, nml);
    }

    #[test]
    fn test_write_to_writer_returns_text() {
        let mut nml = Namelist::new();
        nml.insert_group("a").insert("x", 1i64);

        let mut sink = Vec::new();
        let text = write_to_writer(&nml, &mut sink).unwrap();
        assert_eq!(text.as_bytes(), sink.as_slice());
        assert_eq!(text, "&a\nx = 1\n/");
    }

    #[test]
    fn test_read_from_reader() {
        let mut cursor = std::io::Cursor::new(b"&a\nx = 1\n/".to_vec());
        let nml = read_from(&mut cursor).unwrap();
        assert_eq!(nml.get_group("a").unwrap().get_i64("x"), Some(1));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_round_trip() {
        let nml = reads("&data_nml\n x = 1\n y = 2.0\n/").unwrap();
        let json = to_json(&nml).unwrap();
        let from = from_json(&json).unwrap();
        assert_eq!(nml, from);
    }
}

//! # jsonc-norm
//!
//! Normalizes JSON with `//` line comments and trailing commas into strict
//! JSON, ready for any standard decoder.
//!
//! ## Normalize to strict JSON
//!
//! Comments are dropped, the newline that ends them is kept, and a comma is
//! removed when only whitespace and comments separate it from a closing `}`
//! or `]`. Anything inside a string literal is left alone:
//!
//! ```
//! const INPUT: &str = r#"{
//!     "url": "http://example.com", // not a comment inside the string
//!     "tags": ["a,]", "b",],
//! }"#;
//!
//! fn main() -> Result<(), jsonc_norm::Error> {
//!     let output = jsonc_norm::normalize(INPUT.as_bytes())?;
//!     assert_eq!(
//!         String::from_utf8_lossy(&output),
//!         "{\n    \"url\": \"http://example.com\", \n    \"tags\": [\"a,]\", \"b\"]\n}"
//!     );
//!     Ok(())
//! }
//! ```
//!
//! Normalization is a lexical filter, not a validator. Input it cannot make
//! sense of, such as an unterminated string, is passed through and left for
//! the decoder to reject.
//!
//! ## Deserialize with [Serde](https://serde.rs/)
//!
//! ```
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Project {
//!     project: String,
//!     license: Vec<String>,
//!     public: bool,
//! }
//!
//! const INPUT: &str = r#"
//! // This is a JSON value with comments and trailing commas
//! {
//!     "project": "jsonc-norm",
//!     "license": [
//!         "MIT", // for now
//!     ],
//!
//!     // This project is public.
//!     "public": true,
//! }"#;
//!
//! fn main() -> Result<(), jsonc_norm::Error> {
//!     let project: Project = jsonc_norm::from_str(INPUT)?;
//!     assert_eq!(project.license, ["MIT"]);
//!     println!("{:#?}", project);
//!     Ok(())
//! }
//! ```
//!
//! Server configuration files have a typed form in [config::Configuration].

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod normalize;
pub mod scanner;

use std::{fs, io::Write, path::Path};

use serde::de::DeserializeOwned;

pub use error::Error;

/// Strips line comments and trailing commas from `input`, returning strict
/// JSON.
pub fn normalize(input: &[u8]) -> Result<Vec<u8>, Error> {
    let mut out = Vec::with_capacity(input.len());
    normalize_writer(&mut out, input)?;
    Ok(out)
}

/// Strips line comments and trailing commas from `input`, writing strict JSON
/// to the provided writer.
pub fn normalize_writer<W: Write>(w: &mut W, input: &[u8]) -> Result<(), Error> {
    normalize::write_json(w, input)?;
    Ok(())
}

/// Normalizes `input` and deserializes the result with serde_json.
pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, Error> {
    let json = normalize(input)?;
    Ok(serde_json::from_slice(&json)?)
}

/// Normalizes `input` and deserializes the result with serde_json.
pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, Error> {
    from_slice(input.as_bytes())
}

/// Reads the whole file at `path`, then normalizes and deserializes it. The
/// file is closed before normalization starts.
pub fn from_file<T, P>(path: P) -> Result<T, Error>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read jsonc file");
    from_slice(&data)
}

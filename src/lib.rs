//! rtfkit - A Rust library for decoding Rich Text Format documents
//!
//! This library turns an RTF byte stream into plain text plus formatting
//! runs (font, paragraph and color) anchored to character ranges of that
//! text, together with the font table, color table, document properties
//! and embedded pictures.
//!
//! # Features
//!
//! - **Streaming input**: reads from any `std::io::Read` in bounded chunks
//! - **Code pages**: `\ansicpg` and font charsets decoded through `encoding_rs`
//! - **Unicode**: `\uN` with `\ucN` fallback skipping and surrogate pairs
//! - **Pictures**: hex and `\bin` payloads with their sizing keywords
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = rtfkit::decode(br"{\rtf1\ansi Plain {\b Bold} Plain}")?;
//!
//! for run in &doc.font_runs {
//!     let text: String = doc.text_of(run.range);
//!     println!("{text:?} bold={}", run.style.is_bold);
//! }
//! # Ok(())
//! # }
//! ```

/// Utilities shared by the decoder
pub mod common;

/// RTF decoder
///
/// This module provides the tokenizer, the keyword and property tables,
/// the group state stack and the run accumulation that make up the decoder.
pub mod rtf;

// Re-export commonly used types for convenience
pub use rtf::{
    DecodeError, DecodeOptions, DecodeResult, DecodedDocument, decode, decode_reader, decode_with,
};

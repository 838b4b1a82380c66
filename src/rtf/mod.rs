//! RTF (Rich Text Format) decoder.
//!
//! Decoding is a single forward pass over the input. Bytes are read in
//! chunks, split into tokens, and dispatched through a keyword table; a
//! stack of group states saves and restores formatting across `{` and `}`,
//! and every formatting change becomes a boundary in the font, paragraph
//! or color runs laid over the decoded text.
//!
//! # Architecture
//!
//! - **Source**: chunked byte reader with one byte of push-back
//! - **Lexer**: control words, control symbols, braces and text bytes
//! - **Symbols / Properties**: keyword and property tables
//! - **Parser**: destinations, property stack, font/color tables, pictures
//! - **Runs**: text buffer and run bookkeeping
//!
//! # Example
//!
//! ```rust
//! use rtfkit::rtf::decode;
//!
//! let doc = decode(br"{\rtf1\ansi{\fonttbl\f0\fswiss Helvetica;}\f0\pard Hello {\b World}!\par}")?;
//! assert_eq!(doc.text, "Hello World!\n");
//! assert_eq!(doc.font_table.get(0).map(|f| f.name.as_str()), Some("Helvetica"));
//! # Ok::<(), rtfkit::rtf::DecodeError>(())
//! ```

mod document;
mod error;
mod lexer;
mod options;
mod parser;
mod picture;
mod properties;
mod runs;
mod source;
mod stack;
mod symbols;
mod types;

// Re-exports
pub use document::{DecodedDocument, decode, decode_reader, decode_with};
pub use error::{DecodeError, DecodeResult};
pub use options::DecodeOptions;
pub use picture::{ImageType, Picture, detect_image_type};
pub use properties::{DocumentProperties, PageNumberFormat, SectionBreak, SectionProperties};
pub use types::{
    CharacterSet, Color, ColorRun, ColorStyle, ColorTable, Font, FontFamily, FontRun, FontStyle,
    FontTable, Justification, ParagraphRun, ParagraphStyle, Range, StyleRun,
};

//! Decoded RTF document and the decode entry points.

use super::error::DecodeResult;
use super::lexer::Lexer;
use super::options::DecodeOptions;
use super::parser::Parser;
use super::picture::Picture;
use super::properties::{DocumentProperties, SectionProperties};
use super::source::ByteSource;
use super::types::{ColorRun, ColorTable, FontRun, FontTable, ParagraphRun, Range};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Result of decoding one RTF document.
///
/// Each run collection tiles the text: runs are ordered, non-empty, and
/// the end of one is the start of the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedDocument {
    /// Visible text
    pub text: String,
    pub font_runs: Vec<FontRun>,
    pub paragraph_runs: Vec<ParagraphRun>,
    pub color_runs: Vec<ColorRun>,
    pub document_properties: DocumentProperties,
    /// Section properties in effect at the end of the document
    pub section_properties: SectionProperties,
    pub font_table: FontTable,
    pub color_table: ColorTable,
    pub pictures: Vec<Picture>,
}

impl DecodedDocument {
    /// Length of the text in characters, the unit run ranges use.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Text covered by `range`.
    pub fn text_of(&self, range: Range) -> String {
        self.text.chars().skip(range.start).take(range.len()).collect()
    }
}

/// Decode an RTF document held in memory with default options.
///
/// # Examples
///
/// ```
/// let doc = rtfkit::decode(br"{\rtf1\ansi Plain {\b Bold}}")?;
/// assert_eq!(doc.text, "Plain Bold");
/// assert_eq!(doc.font_runs.len(), 2);
/// # Ok::<(), rtfkit::DecodeError>(())
/// ```
pub fn decode(bytes: &[u8]) -> DecodeResult<DecodedDocument> {
    decode_with(bytes, &DecodeOptions::default())
}

/// Decode an RTF document held in memory.
#[tracing::instrument(level = "debug", skip_all, fields(len = bytes.len()))]
pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> DecodeResult<DecodedDocument> {
    decode_reader(bytes, options)
}

/// Decode an RTF document from any reader, one chunk at a time.
pub fn decode_reader<R: Read>(reader: R, options: &DecodeOptions) -> DecodeResult<DecodedDocument> {
    let source = ByteSource::with_capacity(reader, options.buffer_capacity);
    let mut lexer = Lexer::new(source);
    Parser::new(options).parse(&mut lexer)
}

//! RTF dispatcher that turns tokens into text, runs and tables.
//!
//! The parser keeps the current [`GroupState`] outside the stack. A `{`
//! saves a copy, a `}` restores it, and every change to the state that
//! affects visible text is pushed through to the [`RunAccumulator`].

use super::document::DecodedDocument;
use super::error::{DecodeError, DecodeResult};
use super::lexer::{Lexer, Token, hex_value};
use super::options::DecodeOptions;
use super::picture::{ImageType, Picture, detect_image_type};
use super::properties::{
    DocumentProperties, Prop, PropertyDescriptor, PropertyGroup, SectionProperties, ValueKind,
    apply_paragraph, as_byte, as_flag, descriptor,
};
use super::runs::RunAccumulator;
use super::source::ByteSource;
use super::stack::{DestinationState, GroupState, InternalState, PropertyStack};
use super::symbols::{self, Action, DestinationKind, SpecialKind};
use super::types::{Color, ColorTable, Font, FontFamily, FontTable};
use crate::common::encoding::{charset_to_codepage, codepage_to_encoding};
use encoding_rs::Encoding;
use smallvec::SmallVec;
use std::io::Read;

const REPLACEMENT: char = '\u{FFFD}';

/// Font table entry being defined.
#[derive(Debug, Default)]
struct FontEntry {
    font: Font,
    /// Undecoded name bytes
    name: SmallVec<[u8; 32]>,
}

/// Color table entry being defined. Components never set stay `None`.
#[derive(Debug, Default)]
struct ColorEntry {
    red: Option<u8>,
    green: Option<u8>,
    blue: Option<u8>,
}

impl ColorEntry {
    fn take(&mut self) -> Option<Color> {
        let entry = std::mem::take(self);
        if entry.red.is_none() && entry.green.is_none() && entry.blue.is_none() {
            return None;
        }
        Some(Color::new(
            entry.red.unwrap_or(0),
            entry.green.unwrap_or(0),
            entry.blue.unwrap_or(0),
        ))
    }
}

/// RTF Parser.
pub struct Parser {
    /// State of the innermost open group
    state: GroupState,
    /// States saved by enclosing groups
    stack: PropertyStack,
    runs: RunAccumulator,
    document: DocumentProperties,
    /// Last section properties set in body text; outlives the group stack
    section: SectionProperties,
    font_table: FontTable,
    color_table: ColorTable,
    pictures: Vec<Picture>,
    font: Option<FontEntry>,
    color: ColorEntry,
    picture: Option<Picture>,
    /// First digit of a hex pair
    hex_high: Option<u8>,
    /// Bytes still owed to a `\bin`
    binary_remaining: usize,
    /// Set by `\*`, cleared by the next token
    skip_if_unknown: bool,
    /// Fallback characters still to drop after `\u`
    unicode_fallback: u32,
    /// Depth of the group that issued the `\u`
    fallback_depth: usize,
    high_surrogate: Option<u16>,
    /// Code page for 8-bit text outside fonts with a charset
    code_page: u32,
    collect_pictures: bool,
}

impl Parser {
    /// Create a new parser.
    pub fn new(options: &DecodeOptions) -> Self {
        let code_page = options.default_code_page;
        Self {
            state: GroupState::default(),
            stack: PropertyStack::new(options.max_depth),
            runs: RunAccumulator::new(encoding_for(code_page)),
            document: DocumentProperties::default(),
            section: SectionProperties::default(),
            font_table: FontTable::new(),
            color_table: ColorTable::new(),
            pictures: Vec::new(),
            font: None,
            color: ColorEntry::default(),
            picture: None,
            hex_high: None,
            binary_remaining: 0,
            skip_if_unknown: false,
            unicode_fallback: 0,
            fallback_depth: 0,
            high_surrogate: None,
            code_page,
            collect_pictures: options.collect_pictures,
        }
    }

    /// Consume every token of `lexer` and build the document.
    pub fn parse<R: Read>(mut self, lexer: &mut Lexer<R>) -> DecodeResult<DecodedDocument> {
        loop {
            if self.binary_remaining > 0 {
                let count = std::mem::take(&mut self.binary_remaining);
                self.read_binary(lexer.source_mut(), count)?;
                continue;
            }
            match lexer.next_token()? {
                Token::EndOfStream => return self.finish(),
                Token::GroupOpen => {
                    let offset = lexer.offset() - 1;
                    self.open_group(offset)?;
                },
                Token::GroupClose => {
                    let offset = lexer.offset() - 1;
                    self.close_group(offset)?;
                },
                Token::Literal(byte) => {
                    let offset = lexer.offset() - 1;
                    self.literal(byte, offset)?;
                },
                Token::ControlSymbol(symbol) => self.control_word(&[symbol], None)?,
                Token::ControlWord { name, arg } => self.control_word(name, arg)?,
            }
        }
    }

    fn open_group(&mut self, offset: u64) -> DecodeResult<()> {
        self.check_hex_boundary(offset, b'{')?;
        self.skip_if_unknown = false;
        self.stack.push(&self.state)
    }

    fn close_group(&mut self, offset: u64) -> DecodeResult<()> {
        self.check_hex_boundary(offset, b'}')?;
        self.skip_if_unknown = false;
        let closing = self.state;
        self.state = self.stack.pop(offset)?;
        if self.stack.depth() < self.fallback_depth {
            self.unicode_fallback = 0;
        }

        match closing.destination {
            DestinationState::FontTable => self.commit_font(),
            DestinationState::ColorTable => {
                // A last entry missing its ';' still counts if it has components.
                if let Some(color) = self.color.take() {
                    self.color_table.add(Some(color));
                }
            },
            DestinationState::Picture if self.state.destination != DestinationState::Picture => {
                self.commit_picture();
            },
            _ => {},
        }

        if self.state.destination == DestinationState::Normal {
            self.sync_runs();
        }
        Ok(())
    }

    /// A brace cannot split a hex pair.
    fn check_hex_boundary(&self, offset: u64, byte: u8) -> DecodeResult<()> {
        if self.state.internal == InternalState::Hex && self.hex_high.is_some() {
            return Err(DecodeError::InvalidHex { offset, byte });
        }
        Ok(())
    }

    fn control_word(&mut self, name: &[u8], arg: Option<i32>) -> DecodeResult<()> {
        let skip_if_unknown = std::mem::take(&mut self.skip_if_unknown);
        let Some(symbol) = symbols::lookup(name) else {
            if skip_if_unknown && !self.state.is_skipping() {
                tracing::trace!(
                    keyword = %String::from_utf8_lossy(name),
                    "skipping unknown destination"
                );
                self.state.destination = DestinationState::Skip;
            } else {
                tracing::trace!(
                    keyword = %String::from_utf8_lossy(name),
                    "ignoring unknown control word"
                );
            }
            return Ok(());
        };

        // Inside a skipped group only `\bin` matters, so its payload is not tokenized.
        if self.state.is_skipping() && symbol.action != Action::Special(SpecialKind::Binary) {
            return Ok(());
        }

        let value = symbol.resolve(arg);
        match symbol.action {
            Action::Character(ch) => {
                self.character(ch);
                Ok(())
            },
            Action::Destination(kind) => {
                self.enter_destination(kind);
                Ok(())
            },
            Action::Property(prop) => self.apply_property(prop, value),
            Action::Special(kind) => {
                self.special(kind, value);
                Ok(())
            },
        }
    }

    fn character(&mut self, ch: char) {
        if self.consume_fallback() || self.state.destination != DestinationState::Normal {
            return;
        }
        self.emit_char(ch);
        if ch == '\n' {
            self.runs.break_paragraph();
        }
    }

    fn enter_destination(&mut self, kind: DestinationKind) {
        self.state.destination = match kind {
            DestinationKind::Pict => {
                self.picture = Some(Picture::default());
                self.hex_high = None;
                self.state.internal = InternalState::Hex;
                DestinationState::Picture
            },
            DestinationKind::FontTable => DestinationState::FontTable,
            DestinationKind::ColorTable => DestinationState::ColorTable,
            DestinationKind::Skip => DestinationState::Skip,
        };
    }

    fn apply_property(&mut self, prop: Prop, value: i32) -> DecodeResult<()> {
        let desc = descriptor(prop)?;
        let value = match desc.kind {
            ValueKind::Flag => i32::from(as_flag(value)),
            ValueKind::Byte => i32::from(as_byte(value)),
            ValueKind::Word | ValueKind::Reset => value,
        };
        match self.state.destination {
            DestinationState::Normal => self.apply_body_property(desc, value),
            DestinationState::FontTable => {
                self.apply_font_property(prop, value);
                Ok(())
            },
            DestinationState::ColorTable => {
                let component = Some(as_byte(value));
                match prop {
                    Prop::Red => self.color.red = component,
                    Prop::Green => self.color.green = component,
                    Prop::Blue => self.color.blue = component,
                    _ => {},
                }
                Ok(())
            },
            DestinationState::Picture => {
                if let Some(picture) = self.picture.as_mut() {
                    apply_picture(picture, prop, value);
                }
                Ok(())
            },
            DestinationState::Skip => Ok(()),
        }
    }

    fn apply_body_property(&mut self, desc: &PropertyDescriptor, value: i32) -> DecodeResult<()> {
        match desc.group {
            PropertyGroup::Character | PropertyGroup::Color => {
                self.state
                    .character
                    .apply(desc.prop, value, self.document.default_font)?;
            },
            PropertyGroup::Paragraph => {
                apply_paragraph(&mut self.state.paragraph, desc.prop, value)?;
            },
            PropertyGroup::Section => {
                self.state.section.apply(desc.prop, value)?;
                self.section = self.state.section;
            },
            PropertyGroup::Document => {
                self.document.apply(desc.prop, value)?;
                if desc.prop == Prop::DefaultFont {
                    self.state.character.font_index = self.document.default_font;
                }
                if matches!(desc.prop, Prop::CharacterSet | Prop::CodePage) {
                    self.code_page = self.document.effective_code_page();
                }
            },
            PropertyGroup::FontTable | PropertyGroup::ColorTable | PropertyGroup::Picture => {
                tracing::trace!(prop = ?desc.prop, "table property outside its destination");
            },
        }
        self.sync_runs();
        Ok(())
    }

    fn apply_font_property(&mut self, prop: Prop, value: i32) {
        match prop {
            Prop::FontIndex => {
                // `\f` starts the next entry even if the previous one lacked its ';'.
                self.commit_font();
                let mut entry = FontEntry::default();
                entry.font.index = value;
                self.font = Some(entry);
            },
            Prop::FontCharset => {
                self.font.get_or_insert_with(FontEntry::default).font.charset = as_byte(value);
            },
            Prop::FontFamily => {
                self.font.get_or_insert_with(FontEntry::default).font.family =
                    FontFamily::from_byte(as_byte(value));
            },
            _ => {},
        }
    }

    fn special(&mut self, kind: SpecialKind, value: i32) {
        match kind {
            SpecialKind::Binary => {
                if let Ok(count) = usize::try_from(value)
                    && count > 0
                {
                    self.binary_remaining = count;
                    self.state.internal = InternalState::Binary;
                }
            },
            SpecialKind::SkipDestination => self.skip_if_unknown = true,
            SpecialKind::Unicode => self.unicode(value),
            SpecialKind::UnicodeSkip => self.state.unicode_skip = value.max(0) as u32,
            SpecialKind::Ignore => {},
        }
    }

    fn unicode(&mut self, value: i32) {
        self.unicode_fallback = self.state.unicode_skip;
        self.fallback_depth = self.stack.depth();
        if self.state.destination != DestinationState::Normal {
            return;
        }

        let unit = value.rem_euclid(0x10000) as u16;
        match unit {
            0xD800..=0xDBFF => {
                if self.high_surrogate.replace(unit).is_some() {
                    self.runs.push_char(REPLACEMENT);
                }
            },
            0xDC00..=0xDFFF => {
                let ch = self
                    .high_surrogate
                    .take()
                    .and_then(|high| char::decode_utf16([high, unit]).next())
                    .and_then(Result::ok)
                    .unwrap_or(REPLACEMENT);
                self.runs.push_char(ch);
            },
            _ => self.emit_char(char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT)),
        }
    }

    fn literal(&mut self, byte: u8, offset: u64) -> DecodeResult<()> {
        self.skip_if_unknown = false;
        if self.consume_fallback() {
            return Ok(());
        }
        match self.state.destination {
            DestinationState::Normal => {
                self.flush_surrogate();
                self.runs.push_byte(byte);
            },
            DestinationState::FontTable => {
                if byte == b';' {
                    self.commit_font();
                } else {
                    self.font.get_or_insert_with(FontEntry::default).name.push(byte);
                }
            },
            DestinationState::ColorTable => {
                if byte == b';' {
                    let color = self.color.take();
                    self.color_table.add(color);
                }
            },
            DestinationState::Picture => self.picture_byte(byte, offset)?,
            DestinationState::Skip => {},
        }
        Ok(())
    }

    fn picture_byte(&mut self, byte: u8, offset: u64) -> DecodeResult<()> {
        if self.state.internal != InternalState::Hex {
            return Ok(());
        }
        match hex_value(byte) {
            Some(low) => {
                let Some(high) = self.hex_high.take() else {
                    self.hex_high = Some(low);
                    return Ok(());
                };
                if self.collect_pictures
                    && let Some(picture) = self.picture.as_mut()
                {
                    picture.data.push((high << 4) | low);
                }
            },
            None if byte.is_ascii_whitespace() => {},
            None if self.hex_high.is_some() => {
                return Err(DecodeError::InvalidHex { offset, byte });
            },
            // Anything else ends the payload.
            None => self.state.internal = InternalState::Normal,
        }
        Ok(())
    }

    fn read_binary<R: Read>(&mut self, source: &mut ByteSource<R>, count: usize) -> DecodeResult<()> {
        let target = match self.picture.as_mut() {
            Some(picture)
                if self.collect_pictures && self.state.destination == DestinationState::Picture =>
            {
                Some(&mut picture.data)
            },
            _ => None,
        };
        source.read_raw(count, target)?;
        tracing::trace!(count, destination = ?self.state.destination, "binary payload");
        self.state.internal = InternalState::Normal;
        Ok(())
    }

    /// Drop one fallback character after `\u`. Returns whether it was dropped.
    fn consume_fallback(&mut self) -> bool {
        if self.unicode_fallback == 0 {
            return false;
        }
        self.unicode_fallback -= 1;
        true
    }

    fn emit_char(&mut self, ch: char) {
        self.flush_surrogate();
        self.runs.push_char(ch);
    }

    /// An unpaired high surrogate becomes U+FFFD.
    fn flush_surrogate(&mut self) {
        if self.high_surrogate.take().is_some() {
            self.runs.push_char(REPLACEMENT);
        }
    }

    fn commit_font(&mut self) {
        let Some(entry) = self.font.take() else {
            return;
        };
        let FontEntry { mut font, name } = entry;
        let code_page = charset_to_codepage(font.charset).unwrap_or(self.code_page);
        let (decoded, _) = encoding_for(code_page).decode_without_bom_handling(&name);
        font.name = decoded.trim().to_string();
        tracing::trace!(index = font.index, name = %font.name, "font defined");
        self.font_table.insert(font);
    }

    fn commit_picture(&mut self) {
        let Some(mut picture) = self.picture.take() else {
            return;
        };
        self.hex_high = None;
        if picture.image_type == ImageType::Unknown {
            picture.image_type = detect_image_type(&picture.data);
        }
        picture.position = self.runs.position();
        tracing::debug!(
            image_type = ?picture.image_type,
            bytes = picture.data.len(),
            position = picture.position,
            "picture"
        );
        self.pictures.push(picture);
    }

    /// Push the current character and paragraph state into the runs.
    fn sync_runs(&mut self) {
        if self.state.destination != DestinationState::Normal {
            return;
        }
        let character = self.state.character;
        let encoding = self
            .font_table
            .get(character.font_index)
            .and_then(|font| charset_to_codepage(font.charset))
            .map_or_else(|| encoding_for(self.code_page), encoding_for);
        self.runs.set_encoding(encoding);
        self.runs.set_font(&character.font_style());
        self.runs.set_color(&character.color_style());
        self.runs.set_paragraph(&self.state.paragraph);
    }

    fn finish(mut self) -> DecodeResult<DecodedDocument> {
        let depth = self.stack.depth();
        if depth != 0 {
            return Err(DecodeError::UnmatchedBrace { depth });
        }
        self.flush_surrogate();
        let out = self.runs.finish();
        tracing::debug!(
            chars = out.font_runs.last().map_or(0, |run| run.end()),
            fonts = self.font_table.len(),
            colors = self.color_table.len(),
            pictures = self.pictures.len(),
            "decoded"
        );
        Ok(DecodedDocument {
            text: out.text,
            font_runs: out.font_runs,
            paragraph_runs: out.paragraph_runs,
            color_runs: out.color_runs,
            document_properties: self.document,
            section_properties: self.section,
            font_table: self.font_table,
            color_table: self.color_table,
            pictures: self.pictures,
        })
    }
}

fn apply_picture(picture: &mut Picture, prop: Prop, value: i32) {
    match prop {
        Prop::PictureWidth => picture.width = Some(value),
        Prop::PictureHeight => picture.height = Some(value),
        Prop::PictureGoalWidth => picture.goal_width = Some(value),
        Prop::PictureGoalHeight => picture.goal_height = Some(value),
        Prop::PictureScaleX => picture.scale_x = Some(value),
        Prop::PictureScaleY => picture.scale_y = Some(value),
        Prop::PictureType => picture.image_type = ImageType::from_byte(as_byte(value)),
        _ => {},
    }
}

fn encoding_for(code_page: u32) -> &'static Encoding {
    codepage_to_encoding(code_page).unwrap_or(encoding_rs::WINDOWS_1252)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtf::properties::PageNumberFormat;
    use crate::rtf::types::Range;

    fn parse(input: &str) -> DecodeResult<DecodedDocument> {
        let options = DecodeOptions::default();
        let mut lexer = Lexer::new(ByteSource::with_capacity(input.as_bytes(), 16));
        Parser::new(&options).parse(&mut lexer)
    }

    #[test]
    fn test_font_table() {
        let doc = parse(
            r"{\rtf1\ansi\deff0{\fonttbl{\f0\froman\fcharset0 Times New Roman;}{\f1\fswiss Arial;}}x}",
        )
        .unwrap();
        assert_eq!(doc.font_table.len(), 2);
        let times = doc.font_table.get(0).unwrap();
        assert_eq!(times.name, "Times New Roman");
        assert_eq!(times.family, FontFamily::Roman);
        assert_eq!(doc.font_table.get(1).unwrap().family, FontFamily::Swiss);
        assert_eq!(doc.text, "x");
    }

    #[test]
    fn test_flat_font_table() {
        let doc = parse(r"{\rtf1{\fonttbl\f0\fswiss Helvetica;\f1 Courier;}}").unwrap();
        assert_eq!(doc.font_table.get(0).unwrap().name, "Helvetica");
        assert_eq!(doc.font_table.get(1).unwrap().name, "Courier");
    }

    #[test]
    fn test_color_table() {
        let doc = parse(r"{\rtf1{\colortbl;\red255\green0\blue0;\red0\green0\blue255;}}").unwrap();
        assert_eq!(doc.color_table.len(), 3);
        assert_eq!(doc.color_table.get(0), None);
        assert_eq!(doc.color_table.get(1), Some(Color::new(255, 0, 0)));
        assert_eq!(doc.color_table.get(2), Some(Color::new(0, 0, 255)));
    }

    #[test]
    fn test_font_charset_selects_encoding() {
        let doc = parse(r"{\rtf1\ansi{\fonttbl{\f1\fcharset204 Arial Cyr;}}\f1 \'c0}").unwrap();
        assert_eq!(doc.text, "\u{410}");
    }

    #[test]
    fn test_ansicpg_selects_encoding() {
        let doc = parse(r"{\rtf1\ansi\ansicpg1251 \'c0}").unwrap();
        assert_eq!(doc.text, "\u{410}");
        assert_eq!(doc.document_properties.code_page, Some(1251));
    }

    #[test]
    fn test_unicode_with_fallback() {
        let doc = parse(r"{\rtf1\u8212?x}").unwrap();
        assert_eq!(doc.text, "\u{2014}x");

        let doc = parse(r"{\rtf1\uc2\u8212\'97\'97x}").unwrap();
        assert_eq!(doc.text, "\u{2014}x");

        let doc = parse(r"{\rtf1\uc0\u8212 x}").unwrap();
        assert_eq!(doc.text, "\u{2014}x");
    }

    #[test]
    fn test_unicode_negative_and_surrogates() {
        let doc = parse(r"{\rtf1\u-4064?}").unwrap();
        assert_eq!(doc.text, "\u{F020}");

        let doc = parse(r"{\rtf1\u-10179?\u-8704?}").unwrap();
        assert_eq!(doc.text, "\u{1F600}");

        let doc = parse(r"{\rtf1\u-10179?x}").unwrap();
        assert_eq!(doc.text, "\u{FFFD}x");
    }

    #[test]
    fn test_fallback_ends_with_group() {
        let doc = parse(r"{\rtf1{\u8212}x}").unwrap();
        assert_eq!(doc.text, "\u{2014}x");
    }

    #[test]
    fn test_picture_hex() {
        let doc = parse(r"{\rtf1 a{\pict\pngblip\picw10\pich20 89504e47}b}").unwrap();
        assert_eq!(doc.text, "ab");
        assert_eq!(doc.pictures.len(), 1);
        let picture = &doc.pictures[0];
        assert_eq!(picture.image_type, ImageType::Png);
        assert_eq!(picture.data, [0x89, 0x50, 0x4e, 0x47]);
        assert_eq!(picture.width, Some(10));
        assert_eq!(picture.height, Some(20));
        assert_eq!(picture.position, 1);
    }

    #[test]
    fn test_picture_binary() {
        let doc = parse("{\\rtf1{\\pict\\bin3 {}\\}x}").unwrap();
        assert_eq!(doc.pictures[0].data, b"{}\\");
        assert_eq!(doc.text, "x");
    }

    #[test]
    fn test_binary_in_skipped_group() {
        let doc = parse("{\\rtf1{\\*\\unknown\\bin2 }}}x}").unwrap();
        assert_eq!(doc.text, "x");
    }

    #[test]
    fn test_binary_past_end() {
        assert!(matches!(
            parse(r"{\rtf1{\pict\bin10 ab"),
            Err(DecodeError::EndOfFile { .. })
        ));
    }

    #[test]
    fn test_split_hex_pair() {
        assert!(matches!(
            parse(r"{\rtf1{\pict 8}}"),
            Err(DecodeError::InvalidHex { byte: b'}', .. })
        ));
        assert!(matches!(
            parse(r"{\rtf1{\pict 8z}}"),
            Err(DecodeError::InvalidHex { byte: b'z', .. })
        ));
    }

    #[test]
    fn test_pictures_without_payload() {
        let options = DecodeOptions::default().with_collect_pictures(false);
        let input = r"{\rtf1{\pict\jpegblip ffd8}}";
        let mut lexer = Lexer::new(ByteSource::with_capacity(input.as_bytes(), 16));
        let doc = Parser::new(&options).parse(&mut lexer).unwrap();
        assert_eq!(doc.pictures.len(), 1);
        assert!(doc.pictures[0].data.is_empty());
        assert_eq!(doc.pictures[0].image_type, ImageType::Jpeg);
    }

    #[test]
    fn test_known_destination_after_star() {
        let doc = parse(r"{\rtf1{\*\fldinst HYPERLINK}{\fldrslt link}}").unwrap();
        assert_eq!(doc.text, "link");
    }

    #[test]
    fn test_unknown_word_without_star_keeps_text() {
        let doc = parse(r"{\rtf1{\foo bar}}").unwrap();
        assert_eq!(doc.text, "bar");
    }

    #[test]
    fn test_plain_restores_default_font() {
        let doc = parse(r"{\rtf1\deff2\f1\b x\plain y}").unwrap();
        assert_eq!(doc.font_runs.len(), 2);
        assert_eq!(doc.font_runs[0].style.font_index, 1);
        assert!(doc.font_runs[0].style.is_bold);
        assert_eq!(doc.font_runs[1].style.font_index, 2);
        assert!(!doc.font_runs[1].style.is_bold);
    }

    #[test]
    fn test_document_and_section_properties() {
        let doc = parse(r"{\rtf1\paperw11906\landscape\margl1000\cols2\pgnlcrm x}").unwrap();
        assert_eq!(doc.document_properties.page_width, 11906);
        assert!(doc.document_properties.landscape);
        assert_eq!(doc.document_properties.margin_left, 1000);
        assert_eq!(doc.section_properties.columns, 2);
        assert_eq!(
            doc.section_properties.page_number_format,
            PageNumberFormat::LowerRoman
        );
    }

    #[test]
    fn test_section_properties_survive_nested_groups() {
        let doc = parse(r"{\rtf1{\sectd\cols3 a}{\b b}}").unwrap();
        assert_eq!(doc.section_properties.columns, 3);
    }

    #[test]
    fn test_deff_sets_initial_font() {
        let doc = parse(r"{\rtf1\deff1{\fonttbl{\f0 A;}{\f1 B;}}x}").unwrap();
        assert_eq!(doc.font_runs.len(), 1);
        assert_eq!(doc.font_runs[0].style.font_index, 1);
    }

    #[test]
    fn test_plain_resets_color() {
        let doc = parse(r"{\rtf1{\colortbl;\red255\green0\blue0;}\cf1 red\plain black}").unwrap();
        assert_eq!(doc.color_runs.len(), 2);
        assert_eq!(doc.color_runs[0].range, Range::new(0, 3));
        assert_eq!(doc.color_runs[0].style.color_index, 1);
        assert_eq!(doc.color_runs[1].range, Range::new(3, 8));
        assert_eq!(doc.color_runs[1].style.color_index, 0);
    }

    #[test]
    fn test_stray_star_does_not_leak_into_next_group() {
        let doc = parse(r"{\rtf1{\*}{\foo x}}").unwrap();
        assert_eq!(doc.text, "x");
        let doc = parse(r"{\rtf1\*a\foo b}").unwrap();
        assert_eq!(doc.text, "ab");
    }

    #[test]
    fn test_overflow() {
        let options = DecodeOptions::default().with_max_depth(3);
        let input = "{{{{x}}}}";
        let mut lexer = Lexer::new(ByteSource::with_capacity(input.as_bytes(), 16));
        let err = Parser::new(&options).parse(&mut lexer).unwrap_err();
        assert!(matches!(err, DecodeError::StackOverflow { depth: 4, limit: 3 }));
    }
}

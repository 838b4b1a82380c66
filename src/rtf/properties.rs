//! Property identifiers, the property table, and the property records they
//! act on.
//!
//! Every property keyword in the symbol table names a [`Prop`]. The
//! [`PROPERTY_TABLE`] says how its numeric argument is interpreted
//! ([`ValueKind`]) and which record it belongs to ([`PropertyGroup`]); the
//! `apply` methods on the records then assign the matching field.

use super::error::{DecodeError, DecodeResult};
use super::types::{CharacterSet, ColorStyle, FontStyle, Justification, ParagraphStyle};
use serde::{Deserialize, Serialize};

/// How a property argument is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Boolean toggle; zero turns it off, anything else on
    Flag,
    /// Small unsigned value, clamped to 0..=255
    Byte,
    /// Signed measurement or index
    Word,
    /// Resets the whole record to its defaults
    Reset,
}

/// Record a property is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyGroup {
    Character,
    Paragraph,
    Color,
    Section,
    Document,
    /// Entry being defined inside `\fonttbl`
    FontTable,
    /// Entry being defined inside `\colortbl`
    ColorTable,
    /// Picture being defined inside `\pict`
    Picture,
}

/// Property identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prop {
    Bold,
    Italic,
    Underline,
    FontIndex,
    FontSize,
    Plain,
    ForeColor,
    LeftIndent,
    RightIndent,
    FirstIndent,
    Justification,
    Pard,
    Columns,
    SectionBreak,
    PageNumberX,
    PageNumberY,
    PageNumberFormat,
    Sectd,
    PageWidth,
    PageHeight,
    MarginLeft,
    MarginRight,
    MarginTop,
    MarginBottom,
    PageNumberStart,
    FacingPages,
    Landscape,
    DefaultFont,
    CharacterSet,
    CodePage,
    FontCharset,
    FontFamily,
    Red,
    Green,
    Blue,
    PictureWidth,
    PictureHeight,
    PictureGoalWidth,
    PictureGoalHeight,
    PictureScaleX,
    PictureScaleY,
    PictureType,
}

impl Prop {
    /// Number of property identifiers.
    pub const COUNT: usize = Prop::PictureType as usize + 1;
}

/// Entry of the property table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Property this entry describes
    pub prop: Prop,
    pub kind: ValueKind,
    pub group: PropertyGroup,
}

const fn entry(prop: Prop, kind: ValueKind, group: PropertyGroup) -> PropertyDescriptor {
    PropertyDescriptor { prop, kind, group }
}

/// Property table, indexed by `Prop as usize`.
pub static PROPERTY_TABLE: [PropertyDescriptor; Prop::COUNT] = {
    use PropertyGroup as G;
    use ValueKind as K;
    [
        entry(Prop::Bold, K::Flag, G::Character),
        entry(Prop::Italic, K::Flag, G::Character),
        entry(Prop::Underline, K::Flag, G::Character),
        entry(Prop::FontIndex, K::Word, G::Character),
        entry(Prop::FontSize, K::Word, G::Character),
        entry(Prop::Plain, K::Reset, G::Character),
        entry(Prop::ForeColor, K::Word, G::Color),
        entry(Prop::LeftIndent, K::Word, G::Paragraph),
        entry(Prop::RightIndent, K::Word, G::Paragraph),
        entry(Prop::FirstIndent, K::Word, G::Paragraph),
        entry(Prop::Justification, K::Byte, G::Paragraph),
        entry(Prop::Pard, K::Reset, G::Paragraph),
        entry(Prop::Columns, K::Word, G::Section),
        entry(Prop::SectionBreak, K::Byte, G::Section),
        entry(Prop::PageNumberX, K::Word, G::Section),
        entry(Prop::PageNumberY, K::Word, G::Section),
        entry(Prop::PageNumberFormat, K::Byte, G::Section),
        entry(Prop::Sectd, K::Reset, G::Section),
        entry(Prop::PageWidth, K::Word, G::Document),
        entry(Prop::PageHeight, K::Word, G::Document),
        entry(Prop::MarginLeft, K::Word, G::Document),
        entry(Prop::MarginRight, K::Word, G::Document),
        entry(Prop::MarginTop, K::Word, G::Document),
        entry(Prop::MarginBottom, K::Word, G::Document),
        entry(Prop::PageNumberStart, K::Word, G::Document),
        entry(Prop::FacingPages, K::Flag, G::Document),
        entry(Prop::Landscape, K::Flag, G::Document),
        entry(Prop::DefaultFont, K::Word, G::Document),
        entry(Prop::CharacterSet, K::Byte, G::Document),
        entry(Prop::CodePage, K::Word, G::Document),
        entry(Prop::FontCharset, K::Byte, G::FontTable),
        entry(Prop::FontFamily, K::Byte, G::FontTable),
        entry(Prop::Red, K::Byte, G::ColorTable),
        entry(Prop::Green, K::Byte, G::ColorTable),
        entry(Prop::Blue, K::Byte, G::ColorTable),
        entry(Prop::PictureWidth, K::Word, G::Picture),
        entry(Prop::PictureHeight, K::Word, G::Picture),
        entry(Prop::PictureGoalWidth, K::Word, G::Picture),
        entry(Prop::PictureGoalHeight, K::Word, G::Picture),
        entry(Prop::PictureScaleX, K::Word, G::Picture),
        entry(Prop::PictureScaleY, K::Word, G::Picture),
        entry(Prop::PictureType, K::Byte, G::Picture),
    ]
};

/// Look up the descriptor of `prop`.
pub fn descriptor(prop: Prop) -> DecodeResult<&'static PropertyDescriptor> {
    match PROPERTY_TABLE.get(prop as usize) {
        Some(desc) if desc.prop == prop => Ok(desc),
        _ => Err(DecodeError::BadTable("property table out of order")),
    }
}

/// Interpret an argument as a flag.
#[inline]
pub fn as_flag(value: i32) -> bool {
    value != 0
}

/// Interpret an argument as a byte.
#[inline]
pub fn as_byte(value: i32) -> u8 {
    value.clamp(0, u8::MAX as i32) as u8
}

fn wrong_group() -> DecodeError {
    DecodeError::BadTable("property applied to the wrong record")
}

/// Character formatting in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterProperties {
    pub font_index: i32,
    /// Font size in half-points
    pub font_size: i32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Foreground color index
    pub color_index: i32,
}

impl Default for CharacterProperties {
    fn default() -> Self {
        Self {
            font_index: 0,
            font_size: 24,
            bold: false,
            italic: false,
            underline: false,
            color_index: 0,
        }
    }
}

impl CharacterProperties {
    /// Apply a character or color property. `default_font` is what `\plain`
    /// restores the font index to.
    pub fn apply(&mut self, prop: Prop, value: i32, default_font: i32) -> DecodeResult<()> {
        match prop {
            Prop::Bold => self.bold = as_flag(value),
            Prop::Italic => self.italic = as_flag(value),
            Prop::Underline => self.underline = as_flag(value),
            Prop::FontIndex => self.font_index = value,
            Prop::FontSize => {
                if value > 0 {
                    self.font_size = value;
                }
            },
            Prop::ForeColor => self.color_index = value.max(0),
            Prop::Plain => {
                *self = Self {
                    font_index: default_font,
                    ..Self::default()
                };
            },
            _ => return Err(wrong_group()),
        }
        Ok(())
    }

    /// Font axis as seen by font runs.
    pub fn font_style(&self) -> FontStyle {
        FontStyle {
            font_index: self.font_index,
            font_size: self.font_size as f32 / 2.0,
            is_bold: self.bold,
            is_italic: self.italic,
            is_underline: self.underline,
        }
    }

    /// Color axis as seen by color runs.
    pub fn color_style(&self) -> ColorStyle {
        ColorStyle {
            color_index: self.color_index,
        }
    }
}

/// Apply a paragraph property.
pub fn apply_paragraph(para: &mut ParagraphStyle, prop: Prop, value: i32) -> DecodeResult<()> {
    match prop {
        Prop::LeftIndent => para.indent_left = value,
        Prop::RightIndent => para.indent_right = value,
        Prop::FirstIndent => para.indent_first = value,
        Prop::Justification => para.justification = Justification::from_byte(as_byte(value)),
        Prop::Pard => *para = ParagraphStyle::default(),
        _ => return Err(wrong_group()),
    }
    Ok(())
}

/// Section break type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectionBreak {
    /// Continuous section
    None,
    /// Break to a new column
    Column,
    /// Break to an even page
    Even,
    /// Break to an odd page
    Odd,
    /// Break to a new page
    #[default]
    Page,
}

impl SectionBreak {
    #[inline]
    pub fn from_byte(value: u8) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Column,
            2 => Self::Even,
            3 => Self::Odd,
            _ => Self::Page,
        }
    }
}

/// Page number format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageNumberFormat {
    #[default]
    Decimal,
    UpperRoman,
    LowerRoman,
    UpperLetter,
    LowerLetter,
}

impl PageNumberFormat {
    #[inline]
    pub fn from_byte(value: u8) -> Self {
        match value {
            1 => Self::UpperRoman,
            2 => Self::LowerRoman,
            3 => Self::UpperLetter,
            4 => Self::LowerLetter,
            _ => Self::Decimal,
        }
    }
}

/// Section properties in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Number of columns
    pub columns: i32,
    pub break_type: SectionBreak,
    /// X position of page number (in twips)
    pub page_number_x: i32,
    /// Y position of page number (in twips)
    pub page_number_y: i32,
    pub page_number_format: PageNumberFormat,
}

impl Default for SectionProperties {
    fn default() -> Self {
        Self {
            columns: 1,
            break_type: SectionBreak::default(),
            page_number_x: 720,
            page_number_y: 720,
            page_number_format: PageNumberFormat::default(),
        }
    }
}

impl SectionProperties {
    pub fn apply(&mut self, prop: Prop, value: i32) -> DecodeResult<()> {
        match prop {
            Prop::Columns => self.columns = value.max(1),
            Prop::SectionBreak => self.break_type = SectionBreak::from_byte(as_byte(value)),
            Prop::PageNumberX => self.page_number_x = value,
            Prop::PageNumberY => self.page_number_y = value,
            Prop::PageNumberFormat => {
                self.page_number_format = PageNumberFormat::from_byte(as_byte(value));
            },
            Prop::Sectd => *self = Self::default(),
            _ => return Err(wrong_group()),
        }
        Ok(())
    }
}

/// Whole-document properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentProperties {
    /// Page width (in twips)
    pub page_width: i32,
    /// Page height (in twips)
    pub page_height: i32,
    /// Left margin (in twips)
    pub margin_left: i32,
    /// Right margin (in twips)
    pub margin_right: i32,
    /// Top margin (in twips)
    pub margin_top: i32,
    /// Bottom margin (in twips)
    pub margin_bottom: i32,
    /// Starting page number
    pub page_number_start: i32,
    pub facing_pages: bool,
    pub landscape: bool,
    /// Font used by `\plain` (`\deffN`)
    pub default_font: i32,
    pub character_set: CharacterSet,
    /// Code page declared with `\ansicpgN`
    pub code_page: Option<u32>,
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            page_width: 12240,
            page_height: 15840,
            margin_left: 1800,
            margin_right: 1800,
            margin_top: 1440,
            margin_bottom: 1440,
            page_number_start: 1,
            facing_pages: false,
            landscape: false,
            default_font: 0,
            character_set: CharacterSet::default(),
            code_page: None,
        }
    }
}

impl DocumentProperties {
    pub fn apply(&mut self, prop: Prop, value: i32) -> DecodeResult<()> {
        match prop {
            Prop::PageWidth => self.page_width = value,
            Prop::PageHeight => self.page_height = value,
            Prop::MarginLeft => self.margin_left = value,
            Prop::MarginRight => self.margin_right = value,
            Prop::MarginTop => self.margin_top = value,
            Prop::MarginBottom => self.margin_bottom = value,
            Prop::PageNumberStart => self.page_number_start = value,
            Prop::FacingPages => self.facing_pages = as_flag(value),
            Prop::Landscape => self.landscape = as_flag(value),
            Prop::DefaultFont => self.default_font = value,
            Prop::CharacterSet => self.character_set = CharacterSet::from_byte(as_byte(value)),
            Prop::CodePage => self.code_page = u32::try_from(value).ok().filter(|cp| *cp > 0),
            _ => return Err(wrong_group()),
        }
        Ok(())
    }

    /// Code page for 8-bit text: `\ansicpg` if given, else the character set's.
    pub fn effective_code_page(&self) -> u32 {
        self.code_page.unwrap_or_else(|| self.character_set.code_page())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_prop() {
        for (i, desc) in PROPERTY_TABLE.iter().enumerate() {
            assert_eq!(desc.prop as usize, i, "{:?} out of place", desc.prop);
            assert_eq!(descriptor(desc.prop).unwrap(), desc);
        }
    }

    #[test]
    fn test_resets_use_reset_kind() {
        for prop in [Prop::Plain, Prop::Pard, Prop::Sectd] {
            assert_eq!(descriptor(prop).unwrap().kind, ValueKind::Reset);
        }
    }

    #[test]
    fn test_character_apply() {
        let mut chp = CharacterProperties::default();
        chp.apply(Prop::Bold, 1, 0).unwrap();
        chp.apply(Prop::FontSize, 36, 0).unwrap();
        chp.apply(Prop::ForeColor, 2, 0).unwrap();
        assert!(chp.bold);
        assert_eq!(chp.font_style().font_size, 18.0);

        chp.apply(Prop::Bold, 0, 0).unwrap();
        assert!(!chp.bold);

        chp.apply(Prop::Plain, 0, 3).unwrap();
        assert_eq!(chp.font_index, 3);
        assert_eq!(chp.font_size, 24);
        assert_eq!(chp.color_index, 0);

        assert!(matches!(
            chp.apply(Prop::PageWidth, 1, 0),
            Err(DecodeError::BadTable(_))
        ));
    }

    #[test]
    fn test_paragraph_apply() {
        let mut pap = ParagraphStyle::default();
        apply_paragraph(&mut pap, Prop::LeftIndent, 720).unwrap();
        apply_paragraph(&mut pap, Prop::Justification, 2).unwrap();
        assert_eq!(pap.indent_left, 720);
        assert_eq!(pap.justification, Justification::Center);
        apply_paragraph(&mut pap, Prop::Pard, 0).unwrap();
        assert_eq!(pap, ParagraphStyle::default());
    }

    #[test]
    fn test_section_and_document_apply() {
        let mut sep = SectionProperties::default();
        sep.apply(Prop::Columns, 2).unwrap();
        sep.apply(Prop::PageNumberFormat, 2).unwrap();
        assert_eq!(sep.columns, 2);
        assert_eq!(sep.page_number_format, PageNumberFormat::LowerRoman);
        sep.apply(Prop::Sectd, 0).unwrap();
        assert_eq!(sep, SectionProperties::default());

        let mut dop = DocumentProperties::default();
        dop.apply(Prop::Landscape, 1).unwrap();
        dop.apply(Prop::CodePage, 1251).unwrap();
        assert!(dop.landscape);
        assert_eq!(dop.effective_code_page(), 1251);
        dop.apply(Prop::CodePage, -5).unwrap();
        assert_eq!(dop.effective_code_page(), 1252);
    }
}

//! RTF document type definitions.

use serde::{Deserialize, Serialize};

/// Half-open range of character offsets into the decoded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    /// First character in the range
    pub start: usize,
    /// One past the last character
    pub end: usize,
}

impl Range {
    /// Create a new range.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of characters covered.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` lies inside the range.
    #[inline]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// A range of text sharing one style value on a single property axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleRun<P> {
    /// Characters covered by this run
    pub range: Range,
    /// Style in effect over the range
    pub style: P,
}

impl<P> StyleRun<P> {
    #[inline]
    pub fn new(range: Range, style: P) -> Self {
        Self { range, style }
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.range.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.range.end
    }
}

/// Run of font properties.
pub type FontRun = StyleRun<FontStyle>;

/// Run of paragraph properties.
pub type ParagraphRun = StyleRun<ParagraphStyle>;

/// Run of foreground color.
pub type ColorRun = StyleRun<ColorStyle>;

/// Font axis of the character formatting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    /// Index into the font table
    pub font_index: i32,
    /// Size in points
    pub font_size: f32,
    pub is_bold: bool,
    pub is_italic: bool,
    pub is_underline: bool,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            font_index: 0,
            font_size: 12.0,
            is_bold: false,
            is_italic: false,
            is_underline: false,
        }
    }
}

/// Paragraph justification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Justification {
    /// Left-aligned
    #[default]
    Left,
    /// Right-aligned
    Right,
    /// Centered
    Center,
    /// Justified on both margins
    Forced,
}

impl Justification {
    /// Decode the byte value stored by `\ql`, `\qr`, `\qc` and `\qj`.
    #[inline]
    pub fn from_byte(value: u8) -> Self {
        match value {
            1 => Self::Right,
            2 => Self::Center,
            3 => Self::Forced,
            _ => Self::Left,
        }
    }
}

/// Paragraph properties carried by a paragraph run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Left indent (in twips)
    pub indent_left: i32,
    /// Right indent (in twips)
    pub indent_right: i32,
    /// First line indent (in twips)
    pub indent_first: i32,
    pub justification: Justification,
}

/// Foreground color carried by a color run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorStyle {
    /// Index into the color table; 0 is usually the automatic color
    pub color_index: i32,
}

/// RTF color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0-255)
    pub red: u8,
    /// Green component (0-255)
    pub green: u8,
    /// Blue component (0-255)
    pub blue: u8,
}

impl Color {
    /// Create a new color.
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Color table containing document colors.
///
/// Entries without any component are the automatic color and stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorTable {
    colors: Vec<Option<Color>>,
}

impl ColorTable {
    /// Create a new color table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a color to the table and return its index.
    #[inline]
    pub fn add(&mut self, color: Option<Color>) -> usize {
        self.colors.push(color);
        self.colors.len() - 1
    }

    /// Get a color by index. Returns `None` for out-of-range and automatic entries.
    #[inline]
    pub fn get(&self, index: i32) -> Option<Color> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.colors.get(i).copied().flatten())
    }

    /// Get all entries in the table.
    #[inline]
    pub fn colors(&self) -> &[Option<Color>] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Font family categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontFamily {
    /// Nil (unknown or default)
    #[default]
    Nil,
    /// Roman (serif) fonts
    Roman,
    /// Swiss (sans-serif) fonts
    Swiss,
    /// Modern (monospace) fonts
    Modern,
    /// Script fonts
    Script,
    /// Decorative fonts
    Decor,
    /// Technical, symbol, and mathematical fonts
    Tech,
    /// Arabic, Hebrew and other bidirectional fonts
    Bidi,
}

impl FontFamily {
    /// Decode the byte value stored by `\fnil` .. `\fbidi`.
    #[inline]
    pub fn from_byte(value: u8) -> Self {
        match value {
            1 => Self::Roman,
            2 => Self::Swiss,
            3 => Self::Modern,
            4 => Self::Script,
            5 => Self::Decor,
            6 => Self::Tech,
            7 => Self::Bidi,
            _ => Self::Nil,
        }
    }
}

/// Font definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    /// Font number used by `\fN`
    pub index: i32,
    /// Font name
    pub name: String,
    /// Font family category
    pub family: FontFamily,
    /// Character set (`\fcharsetN`)
    pub charset: u8,
}

/// Font table containing document fonts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontTable {
    fonts: Vec<Font>,
}

impl FontTable {
    /// Create a new font table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a font, replacing any earlier definition with the same number.
    pub fn insert(&mut self, font: Font) {
        match self.fonts.iter_mut().find(|f| f.index == font.index) {
            Some(existing) => *existing = font,
            None => self.fonts.push(font),
        }
    }

    /// Get a font by its number.
    #[inline]
    pub fn get(&self, index: i32) -> Option<&Font> {
        self.fonts.iter().find(|f| f.index == index)
    }

    /// Get all fonts in definition order.
    #[inline]
    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Character set declared in the document header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CharacterSet {
    /// ANSI (Windows-1252 / CP1252)
    #[default]
    Ansi,
    /// Mac (Mac Roman)
    Mac,
    /// PC (DOS / CP437)
    Pc,
    /// PC (DOS / CP850)
    Pca,
}

impl CharacterSet {
    /// Decode the byte value stored by `\ansi`, `\mac`, `\pc` and `\pca`.
    #[inline]
    pub fn from_byte(value: u8) -> Self {
        match value {
            1 => Self::Mac,
            2 => Self::Pc,
            3 => Self::Pca,
            _ => Self::Ansi,
        }
    }

    /// Code page implied by the character set.
    #[inline]
    pub fn code_page(self) -> u32 {
        match self {
            Self::Ansi => 1252,
            Self::Mac => 10000,
            Self::Pc => 437,
            Self::Pca => 850,
        }
    }
}

//! RTF keyword table.
//!
//! Each keyword maps to a [`Symbol`]: its default argument, whether that
//! default overrides any explicit argument, and the [`Action`] it triggers.
//! The table is sorted once on first use and searched with a binary search.

use super::properties::Prop;
use once_cell::sync::Lazy;

/// Destination a group can switch into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationKind {
    /// Picture payload
    Pict,
    /// Content that contributes nothing
    Skip,
    /// Font definitions
    FontTable,
    /// Color definitions
    ColorTable,
}

/// Keywords with their own handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKind {
    /// `\binN`: the next N bytes are raw data
    Binary,
    /// `\*`: skip the group if the next keyword is unknown
    SkipDestination,
    /// `\uN`: a UTF-16 code unit
    Unicode,
    /// `\ucN`: fallback characters following `\u`
    UnicodeSkip,
    /// Known keyword without effect on the decoded model
    Ignore,
}

/// What a keyword does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Emit a character
    Character(char),
    /// Enter a destination
    Destination(DestinationKind),
    /// Set a property
    Property(Prop),
    /// Run a special handler
    Special(SpecialKind),
}

/// Keyword table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub keyword: &'static str,
    /// Argument used when none is given
    pub default: i32,
    /// Use `default` even when an argument is given
    pub force_default: bool,
    pub action: Action,
}

impl Symbol {
    /// Argument for this keyword given the token's explicit parameter.
    #[inline]
    pub fn resolve(&self, arg: Option<i32>) -> i32 {
        if self.force_default {
            self.default
        } else {
            arg.unwrap_or(self.default)
        }
    }
}

const fn prop(keyword: &'static str, default: i32, force_default: bool, prop: Prop) -> Symbol {
    Symbol {
        keyword,
        default,
        force_default,
        action: Action::Property(prop),
    }
}

const fn chr(keyword: &'static str, ch: char) -> Symbol {
    Symbol {
        keyword,
        default: 0,
        force_default: false,
        action: Action::Character(ch),
    }
}

const fn dest(keyword: &'static str, kind: DestinationKind) -> Symbol {
    Symbol {
        keyword,
        default: 0,
        force_default: false,
        action: Action::Destination(kind),
    }
}

const fn special(keyword: &'static str, default: i32, kind: SpecialKind) -> Symbol {
    Symbol {
        keyword,
        default,
        force_default: false,
        action: Action::Special(kind),
    }
}

const SKIP: DestinationKind = DestinationKind::Skip;

#[rustfmt::skip]
static RAW_SYMBOLS: &[Symbol] = &[
    // Character formatting
    prop("b", 1, false, Prop::Bold),
    prop("i", 1, false, Prop::Italic),
    prop("ul", 1, false, Prop::Underline),
    prop("ulnone", 0, true, Prop::Underline),
    prop("f", 0, false, Prop::FontIndex),
    prop("fs", 24, false, Prop::FontSize),
    prop("plain", 0, false, Prop::Plain),
    prop("cf", 0, false, Prop::ForeColor),

    // Paragraph formatting
    prop("li", 0, false, Prop::LeftIndent),
    prop("ri", 0, false, Prop::RightIndent),
    prop("fi", 0, false, Prop::FirstIndent),
    prop("ql", 0, true, Prop::Justification),
    prop("qr", 1, true, Prop::Justification),
    prop("qc", 2, true, Prop::Justification),
    prop("qj", 3, true, Prop::Justification),
    prop("pard", 0, false, Prop::Pard),

    // Section formatting
    prop("cols", 1, false, Prop::Columns),
    prop("sbknone", 0, true, Prop::SectionBreak),
    prop("sbkcol", 1, true, Prop::SectionBreak),
    prop("sbkeven", 2, true, Prop::SectionBreak),
    prop("sbkodd", 3, true, Prop::SectionBreak),
    prop("sbkpage", 4, true, Prop::SectionBreak),
    prop("pgnx", 720, false, Prop::PageNumberX),
    prop("pgny", 720, false, Prop::PageNumberY),
    prop("pgndec", 0, true, Prop::PageNumberFormat),
    prop("pgnucrm", 1, true, Prop::PageNumberFormat),
    prop("pgnlcrm", 2, true, Prop::PageNumberFormat),
    prop("pgnucltr", 3, true, Prop::PageNumberFormat),
    prop("pgnlcltr", 4, true, Prop::PageNumberFormat),
    prop("sectd", 0, false, Prop::Sectd),

    // Document formatting
    prop("paperw", 12240, false, Prop::PageWidth),
    prop("paperh", 15840, false, Prop::PageHeight),
    prop("margl", 1800, false, Prop::MarginLeft),
    prop("margr", 1800, false, Prop::MarginRight),
    prop("margt", 1440, false, Prop::MarginTop),
    prop("margb", 1440, false, Prop::MarginBottom),
    prop("pgnstart", 1, false, Prop::PageNumberStart),
    prop("facingp", 1, true, Prop::FacingPages),
    prop("landscape", 1, true, Prop::Landscape),
    prop("deff", 0, false, Prop::DefaultFont),
    prop("ansi", 0, true, Prop::CharacterSet),
    prop("mac", 1, true, Prop::CharacterSet),
    prop("pc", 2, true, Prop::CharacterSet),
    prop("pca", 3, true, Prop::CharacterSet),
    prop("ansicpg", 1252, false, Prop::CodePage),

    // Font table entries
    prop("fcharset", 0, false, Prop::FontCharset),
    prop("fnil", 0, true, Prop::FontFamily),
    prop("froman", 1, true, Prop::FontFamily),
    prop("fswiss", 2, true, Prop::FontFamily),
    prop("fmodern", 3, true, Prop::FontFamily),
    prop("fscript", 4, true, Prop::FontFamily),
    prop("fdecor", 5, true, Prop::FontFamily),
    prop("ftech", 6, true, Prop::FontFamily),
    prop("fbidi", 7, true, Prop::FontFamily),

    // Color table entries
    prop("red", 0, false, Prop::Red),
    prop("green", 0, false, Prop::Green),
    prop("blue", 0, false, Prop::Blue),

    // Picture properties
    prop("picw", 0, false, Prop::PictureWidth),
    prop("pich", 0, false, Prop::PictureHeight),
    prop("picwgoal", 0, false, Prop::PictureGoalWidth),
    prop("pichgoal", 0, false, Prop::PictureGoalHeight),
    prop("picscalex", 100, false, Prop::PictureScaleX),
    prop("picscaley", 100, false, Prop::PictureScaleY),
    prop("emfblip", 1, true, Prop::PictureType),
    prop("pngblip", 2, true, Prop::PictureType),
    prop("jpegblip", 3, true, Prop::PictureType),
    prop("macpict", 4, true, Prop::PictureType),
    prop("wmetafile", 5, true, Prop::PictureType),
    prop("dibitmap", 6, true, Prop::PictureType),
    prop("wbitmap", 6, true, Prop::PictureType),

    // Characters
    chr("par", '\n'),
    chr("sect", '\n'),
    chr("row", '\n'),
    chr("\n", '\n'),
    chr("\r", '\n'),
    chr("tab", '\t'),
    chr("cell", '\t'),
    chr("line", '\u{2028}'),
    chr("page", '\u{000C}'),
    chr("ldblquote", '\u{201C}'),
    chr("rdblquote", '\u{201D}'),
    chr("lquote", '\u{2018}'),
    chr("rquote", '\u{2019}'),
    chr("bullet", '\u{2022}'),
    chr("endash", '\u{2013}'),
    chr("emdash", '\u{2014}'),
    chr("enspace", '\u{2002}'),
    chr("emspace", '\u{2003}'),
    chr("qmspace", '\u{2005}'),
    chr("zwj", '\u{200D}'),
    chr("zwnj", '\u{200C}'),
    chr("ltrmark", '\u{200E}'),
    chr("rtlmark", '\u{200F}'),
    chr("~", '\u{00A0}'),
    chr("-", '\u{00AD}'),
    chr("_", '\u{2011}'),
    chr("\\", '\\'),
    chr("{", '{'),
    chr("}", '}'),

    // Destinations
    dest("pict", DestinationKind::Pict),
    dest("fonttbl", DestinationKind::FontTable),
    dest("colortbl", DestinationKind::ColorTable),
    dest("author", SKIP),
    dest("buptim", SKIP),
    dest("colorschememapping", SKIP),
    dest("comment", SKIP),
    dest("creatim", SKIP),
    dest("datastore", SKIP),
    dest("doccomm", SKIP),
    dest("fldinst", SKIP),
    dest("filetbl", SKIP),
    dest("footer", SKIP),
    dest("footerf", SKIP),
    dest("footerl", SKIP),
    dest("footerr", SKIP),
    dest("footnote", SKIP),
    dest("ftncn", SKIP),
    dest("ftnsep", SKIP),
    dest("ftnsepc", SKIP),
    dest("generator", SKIP),
    dest("header", SKIP),
    dest("headerf", SKIP),
    dest("headerl", SKIP),
    dest("headerr", SKIP),
    dest("info", SKIP),
    dest("keywords", SKIP),
    dest("latentstyles", SKIP),
    dest("listoverridetable", SKIP),
    dest("listtable", SKIP),
    dest("nonshppict", SKIP),
    dest("objdata", SKIP),
    dest("operator", SKIP),
    dest("printim", SKIP),
    dest("private", SKIP),
    dest("private1", SKIP),
    dest("revtbl", SKIP),
    dest("revtim", SKIP),
    dest("rsidtbl", SKIP),
    dest("rxe", SKIP),
    dest("stylesheet", SKIP),
    dest("subject", SKIP),
    dest("tc", SKIP),
    dest("themedata", SKIP),
    dest("title", SKIP),
    dest("txe", SKIP),
    dest("userprops", SKIP),
    dest("xe", SKIP),
    dest("xmlnstbl", SKIP),

    // Specials
    special("bin", 0, SpecialKind::Binary),
    special("*", 0, SpecialKind::SkipDestination),
    special("u", 0, SpecialKind::Unicode),
    special("uc", 1, SpecialKind::UnicodeSkip),
    special("rtf", 1, SpecialKind::Ignore),
    special("shppict", 0, SpecialKind::Ignore),
    special("field", 0, SpecialKind::Ignore),
    special("fldrslt", 0, SpecialKind::Ignore),
];

static SYMBOLS: Lazy<Vec<Symbol>> = Lazy::new(|| {
    let mut symbols = RAW_SYMBOLS.to_vec();
    symbols.sort_unstable_by(|a, b| a.keyword.as_bytes().cmp(b.keyword.as_bytes()));
    symbols
});

/// Find the symbol for a keyword. Matching is case-sensitive.
#[inline]
pub fn lookup(name: &[u8]) -> Option<&'static Symbol> {
    let symbols: &'static [Symbol] = &SYMBOLS;
    symbols
        .binary_search_by(|sym| sym.keyword.as_bytes().cmp(name))
        .ok()
        .map(|i| &symbols[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtf::properties::{PropertyGroup, ValueKind, descriptor};

    #[test]
    fn test_keywords_are_unique() {
        for pair in SYMBOLS.windows(2) {
            assert!(
                pair[0].keyword < pair[1].keyword,
                "duplicate or unsorted keyword {:?}",
                pair[1].keyword
            );
        }
    }

    #[test]
    fn test_every_property_resolves() {
        for sym in SYMBOLS.iter() {
            if let Action::Property(prop) = sym.action {
                let desc = descriptor(prop).unwrap();
                if desc.kind == ValueKind::Flag && !sym.force_default {
                    assert_eq!(sym.default, 1, "flag {:?} must default to on", sym.keyword);
                }
            }
        }
    }

    #[test]
    fn test_lookup() {
        let bold = lookup(b"b").unwrap();
        assert_eq!(bold.action, Action::Property(Prop::Bold));
        assert_eq!(lookup(b"pict").unwrap().action, Action::Destination(DestinationKind::Pict));
        assert_eq!(lookup(b"\\").unwrap().action, Action::Character('\\'));
        assert!(lookup(b"B").is_none());
        assert!(lookup(b"nosuchword").is_none());
    }

    #[test]
    fn test_resolve_argument() {
        let bold = lookup(b"b").unwrap();
        assert_eq!(bold.resolve(None), 1);
        assert_eq!(bold.resolve(Some(0)), 0);

        let center = lookup(b"qc").unwrap();
        assert_eq!(center.resolve(Some(7)), 2);

        let ulnone = lookup(b"ulnone").unwrap();
        assert_eq!(ulnone.resolve(None), 0);
    }

    #[test]
    fn test_table_groups() {
        let fcharset = lookup(b"fcharset").unwrap();
        let Action::Property(prop) = fcharset.action else {
            panic!("fcharset is not a property");
        };
        assert_eq!(descriptor(prop).unwrap().group, PropertyGroup::FontTable);
    }
}

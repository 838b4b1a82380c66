//! Run accumulation.
//!
//! The accumulator owns the growing text buffer and one [`RunTrack`] per
//! style axis. Each track always has exactly one open run; a style change
//! closes it at the current text length and opens the next one there.
//! Offsets count characters, not bytes.

use super::types::{
    ColorRun, ColorStyle, FontRun, FontStyle, ParagraphRun, ParagraphStyle, Range, StyleRun,
};
use encoding_rs::Encoding;
use smallvec::SmallVec;

/// Open/close bookkeeping for one style axis.
#[derive(Debug)]
pub struct RunTrack<P> {
    /// Start and style of the open run
    start: usize,
    style: P,
    /// Closed runs in text order
    runs: Vec<StyleRun<P>>,
    /// Offset of the last forced boundary, which must not be merged across
    sealed_at: Option<usize>,
}

impl<P: Clone + PartialEq> RunTrack<P> {
    /// Create a track whose first run starts at offset 0.
    pub fn new(initial: P) -> Self {
        Self {
            start: 0,
            style: initial,
            runs: Vec::new(),
            sealed_at: None,
        }
    }

    /// Style of the open run.
    #[inline]
    pub fn current(&self) -> &P {
        &self.style
    }

    /// Switch to `style` at offset `at`. Returns whether a boundary was made.
    pub fn update(&mut self, at: usize, style: &P) -> bool {
        if self.style == *style {
            return false;
        }
        if self.start == at {
            // The open run is empty: either resume the previous run if the
            // style flips back, or restyle the empty run in place.
            if let Some(last) = self.runs.last()
                && last.range.end == at
                && last.style == *style
                && self.sealed_at != Some(at)
                && let Some(last) = self.runs.pop()
            {
                self.start = last.range.start;
            }
            self.style = style.clone();
            return true;
        }
        self.close(at);
        self.start = at;
        self.style = style.clone();
        true
    }

    /// Force a boundary at `at` while keeping the current style.
    pub fn split(&mut self, at: usize) {
        if self.start < at {
            self.close(at);
            self.start = at;
        }
        self.sealed_at = Some(at);
    }

    /// Close the open run at `at` and return every run.
    pub fn finish(mut self, at: usize) -> Vec<StyleRun<P>> {
        self.close(at);
        self.runs
    }

    fn close(&mut self, at: usize) {
        if at > self.start {
            self.runs
                .push(StyleRun::new(Range::new(self.start, at), self.style.clone()));
        }
    }
}

/// Text buffer plus font, paragraph and color runs.
pub struct RunAccumulator {
    text: String,
    /// Length of `text` in characters
    len: usize,
    /// 8-bit text not yet decoded
    pending: SmallVec<[u8; 64]>,
    encoding: &'static Encoding,
    fonts: RunTrack<FontStyle>,
    paragraphs: RunTrack<ParagraphStyle>,
    colors: RunTrack<ColorStyle>,
}

/// Everything the accumulator produced.
pub struct Accumulated {
    pub text: String,
    pub font_runs: Vec<FontRun>,
    pub paragraph_runs: Vec<ParagraphRun>,
    pub color_runs: Vec<ColorRun>,
}

impl RunAccumulator {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self {
            text: String::new(),
            len: 0,
            pending: SmallVec::new(),
            encoding,
            fonts: RunTrack::new(FontStyle::default()),
            paragraphs: RunTrack::new(ParagraphStyle::default()),
            colors: RunTrack::new(ColorStyle::default()),
        }
    }

    /// Current text length in characters.
    pub fn position(&mut self) -> usize {
        self.flush();
        self.len
    }

    /// Append one byte of 8-bit text in the current encoding.
    #[inline]
    pub fn push_byte(&mut self, byte: u8) {
        self.pending.push(byte);
    }

    /// Append a character.
    pub fn push_char(&mut self, ch: char) {
        self.flush();
        self.text.push(ch);
        self.len += 1;
    }

    /// Encoding used for bytes pushed from now on.
    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        if encoding != self.encoding {
            self.flush();
            self.encoding = encoding;
        }
    }

    pub fn set_font(&mut self, style: &FontStyle) {
        if self.fonts.current() != style {
            let at = self.position();
            self.fonts.update(at, style);
        }
    }

    pub fn set_paragraph(&mut self, style: &ParagraphStyle) {
        if self.paragraphs.current() != style {
            let at = self.position();
            self.paragraphs.update(at, style);
        }
    }

    pub fn set_color(&mut self, style: &ColorStyle) {
        if self.colors.current() != style {
            let at = self.position();
            self.colors.update(at, style);
        }
    }

    /// End the current paragraph run after a paragraph mark.
    pub fn break_paragraph(&mut self) {
        let at = self.position();
        self.paragraphs.split(at);
    }

    /// Close every run at the end of the text.
    pub fn finish(mut self) -> Accumulated {
        let end = self.position();
        Accumulated {
            font_runs: self.fonts.finish(end),
            paragraph_runs: self.paragraphs.finish(end),
            color_runs: self.colors.finish(end),
            text: self.text,
        }
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        {
            let (decoded, _) = self.encoding.decode_without_bom_handling(&self.pending);
            self.len += decoded.chars().count();
            self.text.push_str(&decoded);
        }
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> FontStyle {
        FontStyle {
            is_bold: true,
            ..FontStyle::default()
        }
    }

    fn push_str(acc: &mut RunAccumulator, s: &str) {
        for b in s.bytes() {
            acc.push_byte(b);
        }
    }

    #[test]
    fn test_single_run_covers_text() {
        let mut acc = RunAccumulator::new(encoding_rs::WINDOWS_1252);
        push_str(&mut acc, "Hello");
        let out = acc.finish();
        assert_eq!(out.text, "Hello");
        assert_eq!(out.font_runs.len(), 1);
        assert_eq!(out.font_runs[0].range, Range::new(0, 5));
        assert_eq!(out.paragraph_runs[0].range, Range::new(0, 5));
        assert_eq!(out.color_runs[0].range, Range::new(0, 5));
    }

    #[test]
    fn test_change_closes_and_opens() {
        let mut acc = RunAccumulator::new(encoding_rs::WINDOWS_1252);
        push_str(&mut acc, "ab");
        acc.set_font(&bold());
        push_str(&mut acc, "cd");
        acc.set_font(&FontStyle::default());
        let out = acc.finish();
        assert_eq!(out.font_runs.len(), 2);
        assert_eq!(out.font_runs[0].range, Range::new(0, 2));
        assert_eq!(out.font_runs[1].range, Range::new(2, 4));
        assert!(out.font_runs[1].style.is_bold);
    }

    #[test]
    fn test_no_op_change_makes_no_boundary() {
        let mut acc = RunAccumulator::new(encoding_rs::WINDOWS_1252);
        push_str(&mut acc, "ab");
        acc.set_font(&FontStyle::default());
        push_str(&mut acc, "cd");
        let out = acc.finish();
        assert_eq!(out.font_runs.len(), 1);
    }

    #[test]
    fn test_flip_back_without_text_merges() {
        let mut acc = RunAccumulator::new(encoding_rs::WINDOWS_1252);
        push_str(&mut acc, "ab");
        acc.set_font(&bold());
        acc.set_font(&FontStyle::default());
        push_str(&mut acc, "cd");
        let out = acc.finish();
        assert_eq!(out.font_runs.len(), 1);
        assert_eq!(out.font_runs[0].range, Range::new(0, 4));
    }

    #[test]
    fn test_paragraph_split_is_not_merged() {
        let mut acc = RunAccumulator::new(encoding_rs::WINDOWS_1252);
        push_str(&mut acc, "one");
        acc.push_char('\n');
        acc.break_paragraph();
        let centered = ParagraphStyle {
            justification: crate::rtf::types::Justification::Center,
            ..ParagraphStyle::default()
        };
        acc.set_paragraph(&centered);
        acc.set_paragraph(&ParagraphStyle::default());
        push_str(&mut acc, "two");
        let out = acc.finish();
        assert_eq!(out.paragraph_runs.len(), 2);
        assert_eq!(out.paragraph_runs[0].range, Range::new(0, 4));
        assert_eq!(out.paragraph_runs[1].range, Range::new(4, 7));
    }

    #[test]
    fn test_offsets_count_characters() {
        let mut acc = RunAccumulator::new(encoding_rs::WINDOWS_1252);
        acc.push_byte(0xe9);
        acc.push_byte(b'x');
        acc.set_font(&bold());
        acc.push_char('\u{2014}');
        let out = acc.finish();
        assert_eq!(out.text, "\u{e9}x\u{2014}");
        assert_eq!(out.font_runs[0].range, Range::new(0, 2));
        assert_eq!(out.font_runs[1].range, Range::new(2, 3));
    }

    #[test]
    fn test_encoding_switch_flushes() {
        let mut acc = RunAccumulator::new(encoding_rs::WINDOWS_1252);
        acc.push_byte(0xc0);
        acc.set_encoding(encoding_rs::WINDOWS_1251);
        acc.push_byte(0xc0);
        let out = acc.finish();
        assert_eq!(out.text, "\u{c0}\u{410}");
    }

    #[test]
    fn test_empty_document_has_no_runs() {
        let out = RunAccumulator::new(encoding_rs::WINDOWS_1252).finish();
        assert!(out.text.is_empty());
        assert!(out.font_runs.is_empty());
        assert!(out.paragraph_runs.is_empty());
    }
}

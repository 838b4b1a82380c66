//! Decoder configuration.

use serde::{Deserialize, Serialize};

/// Options controlling a decode.
///
/// # Examples
///
/// ```
/// use rtfkit::rtf::DecodeOptions;
///
/// let options = DecodeOptions::default()
///     .with_max_depth(64)
///     .with_collect_pictures(false);
/// assert_eq!(options.max_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Deepest group nesting accepted before `StackOverflow`
    pub max_depth: usize,
    /// Read chunk size of the byte source
    pub buffer_capacity: usize,
    /// Code page for 8-bit text until the document declares one
    pub default_code_page: u32,
    /// Keep picture payloads; when off, pictures are recorded without data
    pub collect_pictures: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: 1024,
            buffer_capacity: 8 * 1024,
            default_code_page: 1252,
            collect_pictures: true,
        }
    }
}

impl DecodeOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the read chunk size.
    pub fn with_buffer_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }

    /// Set the fallback code page.
    pub fn with_default_code_page(mut self, code_page: u32) -> Self {
        self.default_code_page = code_page;
        self
    }

    /// Enable or disable keeping picture payloads.
    pub fn with_collect_pictures(mut self, collect: bool) -> Self {
        self.collect_pictures = collect;
        self
    }
}

//! Utilities shared by the format modules.

pub mod encoding;

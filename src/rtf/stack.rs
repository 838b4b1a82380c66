//! Group state and the save/restore stack.
//!
//! Opening a group saves a copy of the current [`GroupState`]; closing it
//! restores that copy. The stack depth is always the group nesting depth.

use super::error::{DecodeError, DecodeResult};
use super::properties::{CharacterProperties, SectionProperties};
use super::types::ParagraphStyle;

/// Where the content of the current group goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DestinationState {
    /// Visible text
    #[default]
    Normal,
    /// Dropped
    Skip,
    /// Font table definitions
    FontTable,
    /// Color table definitions
    ColorTable,
    /// Picture payload and properties
    Picture,
}

/// How raw bytes are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InternalState {
    /// Bytes are tokens
    #[default]
    Normal,
    /// Bytes are opaque `\bin` data
    Binary,
    /// Hex digit pairs encode payload bytes
    Hex,
}

/// Everything a group saves and restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupState {
    pub destination: DestinationState,
    pub internal: InternalState,
    pub character: CharacterProperties,
    pub paragraph: ParagraphStyle,
    pub section: SectionProperties,
    /// Fallback characters to drop after `\u` (`\ucN`)
    pub unicode_skip: u32,
}

impl Default for GroupState {
    fn default() -> Self {
        Self {
            destination: DestinationState::Normal,
            internal: InternalState::Normal,
            character: CharacterProperties::default(),
            paragraph: ParagraphStyle::default(),
            section: SectionProperties::default(),
            unicode_skip: 1,
        }
    }
}

impl GroupState {
    /// Whether text and properties are currently suppressed.
    #[inline]
    pub fn is_skipping(&self) -> bool {
        self.destination == DestinationState::Skip
    }
}

/// Stack of saved group states.
pub struct PropertyStack {
    frames: Vec<GroupState>,
    max_depth: usize,
}

impl PropertyStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Current nesting depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Save `current` on entering a group.
    pub fn push(&mut self, current: &GroupState) -> DecodeResult<()> {
        if self.frames.len() >= self.max_depth {
            return Err(DecodeError::StackOverflow {
                depth: self.frames.len() + 1,
                limit: self.max_depth,
            });
        }
        self.frames.push(*current);
        Ok(())
    }

    /// Restore the state saved by the matching [`push`](Self::push).
    ///
    /// `offset` is only used to report an unmatched `}`.
    pub fn pop(&mut self, offset: u64) -> DecodeResult<GroupState> {
        self.frames
            .pop()
            .ok_or(DecodeError::StackUnderflow { offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_restores() {
        let mut stack = PropertyStack::new(8);
        let mut state = GroupState::default();
        stack.push(&state).unwrap();
        state.character.bold = true;
        state.destination = DestinationState::Skip;
        assert_eq!(stack.depth(), 1);

        let restored = stack.pop(0).unwrap();
        assert!(!restored.character.bold);
        assert!(!restored.is_skipping());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_underflow() {
        let mut stack = PropertyStack::new(8);
        assert!(matches!(stack.pop(4), Err(DecodeError::StackUnderflow { offset: 4 })));
    }

    #[test]
    fn test_overflow_at_limit() {
        let mut stack = PropertyStack::new(2);
        let state = GroupState::default();
        stack.push(&state).unwrap();
        stack.push(&state).unwrap();
        let err = stack.push(&state).unwrap_err();
        assert!(matches!(err, DecodeError::StackOverflow { depth: 3, limit: 2 }));
        assert_eq!(stack.depth(), 2);
    }
}

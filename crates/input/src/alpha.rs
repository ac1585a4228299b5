//! Alpha (multi-tap) text entry.
//!
//! Each digit key and `*` cycles through a fixed character table. The
//! keyboard drives a [`MultiTap`] with fresh presses and decides when the
//! buffered character is committed.

use crate::key::Key;

/// Character table for `key`, `None` for keys without one.
#[must_use]
pub fn table(key: Key) -> Option<&'static str> {
    let chars = match key {
        Key::Num0 => "0 ",
        Key::Num1 => "1.!,@-:?()~/[]#<>=*+$%'`&|_^{}",
        Key::Num2 => "abc2ABC",
        Key::Num3 => "def3DEF",
        Key::Num4 => "ghi4GHI",
        Key::Num5 => "jkl5JKL",
        Key::Num6 => "mno6MNO",
        Key::Num7 => "pqrs7PQRS",
        Key::Num8 => "tuv8TUV",
        Key::Num9 => "wxyz9WXYZ",
        Key::Star => "*",
        _ => return None,
    };
    Some(chars)
}

/// `index`-th character of `key`'s table.
fn char_at(key: Key, index: usize) -> Option<char> {
    // Tables are ASCII: one byte per character.
    table(key)?.as_bytes().get(index).map(|&b| char::from(b))
}

/// Active multi-tap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MultiTap {
    active: Option<(Key, usize)>,
}

impl MultiTap {
    /// No sequence in progress.
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Key being cycled.
    pub fn key(&self) -> Option<Key> {
        self.active.map(|(key, _)| key)
    }

    /// Character the sequence currently shows.
    pub fn current(&self) -> Option<char> {
        let (key, index) = self.active?;
        char_at(key, index)
    }

    /// Start a new sequence at the first character of `key`'s table,
    /// replacing any previous one. Returns the preview character, or `None`
    /// (and no sequence) if `key` has no table.
    pub fn start(&mut self, key: Key) -> Option<char> {
        self.active = table(key).map(|_| (key, 0));
        self.current()
    }

    /// Advance to the next character, wrapping at the end of the table.
    pub fn advance(&mut self) -> Option<char> {
        let (key, index) = self.active?;
        let len = table(key).map_or(1, str::len);
        let next = index.saturating_add(1).checked_rem(len).unwrap_or(0);
        self.active = Some((key, next));
        self.current()
    }

    /// End the sequence, returning the character to commit.
    pub fn commit(&mut self) -> Option<char> {
        let ch = self.current();
        self.active = None;
        ch
    }

    /// Drop the sequence without committing.
    pub fn reset(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_two_cycles_abc() {
        let mut tap = MultiTap::new();
        assert_eq!(tap.start(Key::Num2), Some('a'));
        assert_eq!(tap.advance(), Some('b'));
        assert_eq!(tap.advance(), Some('c'));
        assert_eq!(tap.advance(), Some('2'));
        assert_eq!(tap.commit(), Some('2'));
        assert_eq!(tap.key(), None);
    }

    #[test]
    fn test_wraps_at_end_of_table() {
        let mut tap = MultiTap::new();
        tap.start(Key::Num0);
        assert_eq!(tap.advance(), Some(' '));
        assert_eq!(tap.advance(), Some('0'));
    }

    #[test]
    fn test_star_table_has_single_entry() {
        let mut tap = MultiTap::new();
        assert_eq!(tap.start(Key::Star), Some('*'));
        assert_eq!(tap.advance(), Some('*'));
    }

    #[test]
    fn test_key_without_table_starts_nothing() {
        let mut tap = MultiTap::new();
        tap.start(Key::Num7);
        assert_eq!(tap.start(Key::Hash), None);
        assert_eq!(tap.key(), None);
    }

    #[test]
    fn test_symbol_table_is_ascii() {
        let symbols = table(Key::Num1).unwrap();
        assert!(symbols.is_ascii());
        assert_eq!(symbols.len(), 30);
        assert_eq!(char_at(Key::Num1, 29), Some('}'));
    }
}

//! Bidirectional read-heads over characters and tokens.

use std::{error, fmt};

use crate::Position;

/// Raised when a [`Cursor`] is moved past either end of its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange;

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cursor moved out of range")
    }
}

impl error::Error for OutOfRange {}

/// A read-head over an ordered slice of items.
/// `position` is the index of the next unconsumed item.
#[derive(Debug, Clone)]
pub struct Cursor<'a, T> {
    items: &'a [T],
    position: usize,
}

impl<'a, T> Cursor<'a, T> {
    /// Create a new `Cursor` positioned before the first item of `items`.
    pub fn new(items: &'a [T]) -> Self {
        Self { items, position: 0 }
    }

    /// Returns the next unconsumed item without advancing.
    pub fn peek(&self) -> Result<&'a T, OutOfRange> {
        self.items.get(self.position).ok_or(OutOfRange)
    }

    /// Returns the next unconsumed item and advances past it.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<&'a T, OutOfRange> {
        let item = self.peek()?;
        self.position += 1;
        Ok(item)
    }

    /// Consumes the next item only if it satisfies `predicate`.
    pub fn next_if(&mut self, predicate: impl FnOnce(&T) -> bool) -> Option<&'a T> {
        let item = self.peek().ok().filter(|&item| predicate(item))?;
        self.position += 1;
        Some(item)
    }

    /// Retreats by one item. The returned item is the next result of [`Self::peek`].
    pub fn back(&mut self) -> Result<&'a T, OutOfRange> {
        if self.position == 0 {
            return Err(OutOfRange);
        }
        self.position -= 1;
        Ok(&self.items[self.position])
    }

    /// Returns `true` if no further items remain.
    pub fn at_end(&self) -> bool {
        self.position >= self.items.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// All items, consumed or not.
    pub fn items(&self) -> &'a [T] {
        self.items
    }
}

/// A [`Cursor`] over characters that also tracks the 1-based line and column of the next character.
#[derive(Debug, Clone)]
pub struct CharCursor<'a> {
    cursor: Cursor<'a, char>,
    line: usize,
    column: usize,
}

impl<'a> CharCursor<'a> {
    pub fn new(chars: &'a [char]) -> Self {
        Self {
            cursor: Cursor::new(chars),
            line: 1,
            column: 1,
        }
    }

    pub fn peek(&self) -> Result<char, OutOfRange> {
        self.cursor.peek().copied()
    }

    /// Consumes the next character, moving to the start of the next line when it is a line feed.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<char, OutOfRange> {
        let ch = *self.cursor.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Ok(ch)
    }

    /// Consumes the next character only if it satisfies `predicate`.
    pub fn next_if(&mut self, predicate: impl FnOnce(char) -> bool) -> Option<char> {
        match self.peek() {
            Ok(ch) if predicate(ch) => self.next().ok(),
            _ => None,
        }
    }

    /// Retreats by one character. Crossing a line feed restores the column on the previous line.
    pub fn back(&mut self) -> Result<char, OutOfRange> {
        let ch = *self.cursor.back()?;
        if ch == '\n' {
            self.line -= 1;
            self.column = self.column_at(self.cursor.position());
        } else {
            self.column -= 1;
        }
        Ok(ch)
    }

    pub fn at_end(&self) -> bool {
        self.cursor.at_end()
    }

    /// Position of the next unconsumed character.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Column of the character at `index`, counted from the closest preceding line feed.
    fn column_at(&self, index: usize) -> usize {
        self.cursor.items()[..index]
            .iter()
            .rev()
            .take_while(|&&ch| ch != '\n')
            .count()
            + 1
    }
}

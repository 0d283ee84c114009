// ABOUTME: Character cursor over source text with byte position and line/column tracking

/// Walks a source string one character at a time, tracking byte position,
/// line, and column (1-based). ASCII fast path, UTF-8 aware fallback.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Cursor {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the character at the cursor, or `'\0'` at end of input.
    pub fn current_char(&self) -> char {
        self.char_at(0)
    }

    /// Returns the character `offset` bytes/chars ahead, or `'\0'` past the end.
    pub fn char_at(&self, offset: usize) -> char {
        let bytes = self.source.as_bytes();
        if offset == 0 {
            if self.position >= bytes.len() {
                return '\0';
            }
            let b = bytes[self.position];
            if b.is_ascii() {
                return b as char;
            }
        }
        self.source[self.position..].chars().nth(offset).unwrap_or('\0')
    }

    pub fn peek_char(&self, offset: usize) -> char {
        self.char_at(offset)
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Advances past the current character, updating line/column.
    pub fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        let ch = self.current_char();
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    pub fn source(&self) -> &'a str {
        self.source
    }
}

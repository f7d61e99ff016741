//! Byte-oriented cursor over Fluent source text.
//!
//! The grammar is ASCII at every decision point (`{`, `}`, `#`, `-`,
//! identifiers, spaces, newlines), so the scanner peeks single bytes and
//! only slices back into the `&str` when capturing content. Tabs are not
//! whitespace in Fluent; a lone `\r` is an ordinary text character and
//! only `\r\n` terminates a line.

/// A recoverable failure at a byte offset. Converted into
/// [`crate::Error::Parse`] with line/column information at the API
/// boundary.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParseError {
    pub message: String,
    pub offset: usize,
}

impl ParseError {
    pub(crate) fn into_error(self, source: &str) -> crate::Error {
        let offset = self.offset.min(source.len());
        let line_start = source[..offset].rfind('\n').map_or(0, |at| at + 1);
        crate::Error::Parse {
            message: self.message,
            line: source[..offset].matches('\n').count() + 1,
            column: source[line_start..offset].chars().count() + 1,
        }
    }
}

pub(crate) struct Scanner<'s> {
    source: &'s str,
    ptr: usize,
}

impl<'s> Scanner<'s> {
    pub fn new(source: &'s str) -> Self {
        Scanner { source, ptr: 0 }
    }

    pub fn pos(&self) -> usize {
        self.ptr
    }

    pub fn seek(&mut self, pos: usize) {
        self.ptr = pos;
    }

    pub fn is_eof(&self) -> bool {
        self.ptr >= self.source.len()
    }

    pub fn slice(&self, start: usize, end: usize) -> &'s str {
        &self.source[start..end]
    }

    pub fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            offset: self.ptr,
        }
    }

    pub fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.ptr).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.ptr + offset).copied()
    }

    pub fn bump(&mut self) {
        self.ptr += 1;
    }

    pub fn take_byte_if(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.ptr += 1;
            true
        } else {
            false
        }
    }

    pub fn expect_byte(&mut self, byte: u8) -> Result<(), ParseError> {
        if self.take_byte_if(byte) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`", byte as char)))
        }
    }

    /// True when the cursor sits on `\n`, `\r\n`, or the end of input.
    /// The Fluent `line_end` production treats EOF as a line end.
    pub fn at_line_end(&self) -> bool {
        match self.peek() {
            None => true,
            Some(b'\n') => true,
            Some(b'\r') => self.peek_at(1) == Some(b'\n'),
            Some(_) => false,
        }
    }

    /// Consumes `\n` or `\r\n`. At EOF this is a no-op that still counts
    /// as a line end.
    pub fn skip_eol(&mut self) -> bool {
        match self.peek() {
            None => true,
            Some(b'\n') => {
                self.ptr += 1;
                true
            }
            Some(b'\r') if self.peek_at(1) == Some(b'\n') => {
                self.ptr += 2;
                true
            }
            Some(_) => false,
        }
    }

    pub fn expect_line_end(&mut self) -> Result<(), ParseError> {
        if self.skip_eol() {
            Ok(())
        } else {
            Err(self.error("expected a line end"))
        }
    }

    /// Skips spaces on the current line and returns how many were
    /// consumed.
    pub fn skip_blank_inline(&mut self) -> usize {
        let start = self.ptr;
        while self.peek() == Some(b' ') {
            self.ptr += 1;
        }
        self.ptr - start
    }

    /// Skips any run of spaces and line ends (the EBNF `blank`).
    pub fn skip_blank(&mut self) {
        loop {
            match self.peek() {
                Some(b' ') | Some(b'\n') => self.ptr += 1,
                Some(b'\r') if self.peek_at(1) == Some(b'\n') => self.ptr += 2,
                _ => break,
            }
        }
    }

    /// Skips whole blank lines (spaces followed by a line end), leaving
    /// the cursor at the start of the first line with content. Trailing
    /// spaces right before EOF count as one final blank line.
    pub fn skip_blank_block(&mut self) {
        loop {
            let save = self.ptr;
            self.skip_blank_inline();
            if self.is_eof() {
                return;
            }
            if !self.skip_eol() {
                self.ptr = save;
                return;
            }
        }
    }

    /// Consumes the rest of the current line (excluding the line end).
    pub fn take_line_content(&mut self) -> &'s str {
        let start = self.ptr;
        while !self.at_line_end() {
            self.ptr += 1;
        }
        self.slice(start, self.ptr)
    }

    /// `[A-Za-z_][A-Za-z0-9_-]*`
    pub fn take_identifier(&mut self) -> Result<&'s str, ParseError> {
        let start = self.ptr;
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => self.ptr += 1,
            _ => return Err(self.error("expected an identifier")),
        }
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
                self.ptr += 1;
            } else {
                break;
            }
        }
        Ok(self.slice(start, self.ptr))
    }
}

pub(crate) fn is_identifier_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_identifier() {
        let mut s = Scanner::new("cli-help_2 = x");
        assert_eq!(s.take_identifier().unwrap(), "cli-help_2");
        assert_eq!(s.peek(), Some(b' '));
    }

    #[test]
    fn test_identifier_rejects_leading_digit() {
        let mut s = Scanner::new("1abc");
        assert!(s.take_identifier().is_err());
    }

    #[test]
    fn test_skip_blank_block_stops_at_content() {
        let mut s = Scanner::new("  \n\n   foo");
        s.skip_blank_block();
        assert_eq!(s.pos(), 4);
        assert_eq!(s.peek(), Some(b' '));
    }

    #[test]
    fn test_skip_eol_handles_dos_newlines() {
        let mut s = Scanner::new("\r\nx");
        assert!(s.skip_eol());
        assert_eq!(s.peek(), Some(b'x'));
    }

    #[test]
    fn test_lone_carriage_return_is_not_a_line_end() {
        let s = Scanner::new("\rx");
        assert!(!s.at_line_end());
    }

    #[test]
    fn test_error_position_reporting() {
        let source = "first\nsecond = ";
        let mut s = Scanner::new(source);
        s.seek(source.len());
        let error = s.error("expected a value").into_error(source);
        assert_eq!(
            error.to_string(),
            "parse error at line 2, column 10: expected a value"
        );
    }
}

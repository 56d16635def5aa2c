//! Lexical scanner for JSON with line comments.
//!
//! The scanner classifies every byte of the input as plain JSON, part of a
//! string literal, or part of a `//` line comment, and yields [Event]s whose
//! ranges cover the input contiguously from start to end.

use std::ops::Range;

/// The lexical context of the byte currently being scanned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Plain,
    InString,
    InLineComment,
}

/// Scanner state, owned by a single [Scanner] for the duration of one scan.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScanState {
    pub mode: Mode,
    /// Set when the previous byte inside a string was an unescaped backslash.
    pub escape_next: bool,
    /// Offset of the next byte to be scanned.
    pub position: usize,
}

impl Default for ScanState {
    fn default() -> Self {
        ScanState {
            mode: Mode::Plain,
            escape_next: false,
            position: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Event<'a> {
    pub token: Token<'a>,
    pub range: Range<usize>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Token<'a> {
    /// A run of plain bytes that carry no meaning to the normalizer: keys'
    /// colons, numbers, literals, opening brackets, a lone `/`, etc.
    Text(&'a [u8]),
    /// A run of JSON whitespace, newlines included.
    Whitespace(&'a [u8]),
    /// A string literal including both quotes. Runs to the end of the input
    /// when unterminated.
    String(&'a [u8]),
    /// The body of a line comment, without the leading `//` and without the
    /// terminating newline.
    LineComment(&'a [u8]),
    Comma,
    ObjectEnd,
    ArrayEnd,
}

pub struct Scanner<'a> {
    input: &'a [u8],
    state: ScanState,
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        self.scan_next()
    }
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Scanner {
            input,
            state: ScanState::default(),
        }
    }

    /// Returns the current scan state. Once the scanner is exhausted, the mode
    /// tells whether the input ended inside a string or a comment.
    pub fn state(&self) -> ScanState {
        self.state
    }

    fn scan_next(&mut self) -> Option<Event<'a>> {
        let start = self.state.position;
        let token = match self.peek_byte()? {
            b'"' => self.scan_string(),
            b'/' if self.peek_byte_at(1) == Some(b'/') => self.scan_line_comment(),
            b',' => {
                self.skip_byte();
                Token::Comma
            }
            b'}' => {
                self.skip_byte();
                Token::ObjectEnd
            }
            b']' => {
                self.skip_byte();
                Token::ArrayEnd
            }
            c if is_whitespace(c) => self.scan_whitespace(),
            _ => self.scan_text(),
        };
        Some(Event {
            token,
            range: start..self.state.position,
        })
    }

    fn scan_string(&mut self) -> Token<'a> {
        let start = self.state.position;
        self.skip_byte();
        self.state.mode = Mode::InString;

        while let Some(c) = self.next_byte() {
            if self.state.escape_next {
                self.state.escape_next = false;
            } else if c == b'\\' {
                self.state.escape_next = true;
            } else if c == b'"' {
                self.state.mode = Mode::Plain;
                break;
            }
        }
        Token::String(&self.input[start..self.state.position])
    }

    fn scan_line_comment(&mut self) -> Token<'a> {
        self.skip_byte();
        self.skip_byte();
        self.state.mode = Mode::InLineComment;

        let start = self.state.position;
        while let Some(c) = self.peek_byte() {
            if c == b'\n' {
                // The newline itself is plain whitespace and is kept.
                self.state.mode = Mode::Plain;
                break;
            }
            self.skip_byte();
        }
        Token::LineComment(&self.input[start..self.state.position])
    }

    fn scan_whitespace(&mut self) -> Token<'a> {
        let start = self.state.position;
        while let Some(c) = self.peek_byte() {
            if !is_whitespace(c) {
                break;
            }
            self.skip_byte();
        }
        Token::Whitespace(&self.input[start..self.state.position])
    }

    fn scan_text(&mut self) -> Token<'a> {
        let start = self.state.position;
        self.skip_byte();
        while let Some(c) = self.peek_byte() {
            match c {
                b'"' | b',' | b'}' | b']' => break,
                b'/' if self.peek_byte_at(1) == Some(b'/') => break,
                c if is_whitespace(c) => break,
                _ => self.skip_byte(),
            }
        }
        Token::Text(&self.input[start..self.state.position])
    }

    fn next_byte(&mut self) -> Option<u8> {
        let c = self.peek_byte()?;
        self.state.position += 1;
        Some(c)
    }

    fn skip_byte(&mut self) {
        self.next_byte();
    }

    fn peek_byte(&self) -> Option<u8> {
        self.peek_byte_at(0)
    }

    fn peek_byte_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.state.position + offset).copied()
    }
}

fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token<'_>> {
        Scanner::new(input.as_bytes()).map(|e| e.token).collect()
    }

    #[test]
    fn scanner() {
        let input = "{\n  \"url\": \"http://x.com\", // trailing\n}";
        let expected = vec![
            Token::Text(b"{"),
            Token::Whitespace(b"\n  "),
            Token::String(b"\"url\""),
            Token::Text(b":"),
            Token::Whitespace(b" "),
            Token::String(b"\"http://x.com\""),
            Token::Comma,
            Token::Whitespace(b" "),
            Token::LineComment(b" trailing"),
            Token::Whitespace(b"\n"),
            Token::ObjectEnd,
        ];
        assert_eq!(tokens(input), expected);
    }

    #[test]
    fn ranges_cover_input() {
        let input = "[1, \"a,]\" , // x\r\n2.5e3 / 4,\n] // end";
        let mut next = 0;
        for event in Scanner::new(input.as_bytes()) {
            assert_eq!(event.range.start, next, "gap before {:?}", event);
            assert!(event.range.end > event.range.start, "empty {:?}", event);
            next = event.range.end;
        }
        assert_eq!(next, input.len());
    }

    #[test]
    fn escaped_quote_stays_in_string() {
        let input = r#"{"a": "esc\"ape // no", "b": "\\"}"#;
        let strings: Vec<_> = tokens(input)
            .into_iter()
            .filter(|t| matches!(t, Token::String(_)))
            .collect();
        assert_eq!(
            strings,
            vec![
                Token::String(br#""a""#),
                Token::String(br#""esc\"ape // no""#),
                Token::String(br#""b""#),
                Token::String(br#""\\""#),
            ]
        );
    }

    #[test]
    fn lone_slash_is_text() {
        assert_eq!(
            tokens("1 / 2"),
            vec![
                Token::Text(b"1"),
                Token::Whitespace(b" "),
                Token::Text(b"/"),
                Token::Whitespace(b" "),
                Token::Text(b"2"),
            ]
        );
        assert_eq!(tokens("a/b"), vec![Token::Text(b"a/b")]);
    }

    #[test]
    fn comment_at_end_of_input() {
        let mut scanner = Scanner::new(b"{} // done");
        let last = scanner.by_ref().last().map(|e| e.token);
        assert_eq!(last, Some(Token::LineComment(b" done")));
        let state = scanner.state();
        assert_eq!(state.mode, Mode::InLineComment);
        assert_eq!(state.position, 10);
    }

    #[test]
    fn quote_in_comment_is_not_a_string() {
        let input = "{ // say \"hi\n\"a\": 1 // x\"\n}";
        assert_eq!(
            tokens(input),
            vec![
                Token::Text(b"{"),
                Token::Whitespace(b" "),
                Token::LineComment(b" say \"hi"),
                Token::Whitespace(b"\n"),
                Token::String(b"\"a\""),
                Token::Text(b":"),
                Token::Whitespace(b" "),
                Token::Text(b"1"),
                Token::Whitespace(b" "),
                Token::LineComment(b" x\""),
                Token::Whitespace(b"\n"),
                Token::ObjectEnd,
            ]
        );
    }

    #[test]
    fn comment_keeps_carriage_return() {
        assert_eq!(
            tokens("1 // c\r\n"),
            vec![
                Token::Text(b"1"),
                Token::Whitespace(b" "),
                Token::LineComment(b" c\r"),
                Token::Whitespace(b"\n"),
            ]
        );
    }

    #[test]
    fn unterminated_string() {
        let mut scanner = Scanner::new(br#"{"a": "open\"#);
        let last = scanner.by_ref().last().map(|e| e.token);
        assert_eq!(last, Some(Token::String(br#""open\"#)));
        let state = scanner.state();
        assert_eq!(state.mode, Mode::InString);
        assert!(state.escape_next);

        let mut scanner = Scanner::new(br#"{"a": "b"}"#);
        scanner.by_ref().for_each(drop);
        assert_eq!(scanner.state().mode, Mode::Plain);
        assert!(!scanner.state().escape_next);
    }

    #[test]
    fn non_utf8_passes_as_text() {
        let input = b"[\xff\xfe, \"\xc3\x28\"]";
        let out: Vec<u8> = Scanner::new(input)
            .flat_map(|e| input[e.range].to_vec())
            .collect();
        assert_eq!(&out, input);
    }
}

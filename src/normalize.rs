use std::{io::Write, iter::Peekable};

use crate::{
    error::Error,
    scanner::{Event, Mode, Scanner, Token},
};

/// What was dropped from the input while normalizing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub comments: usize,
    pub commas: usize,
}

/// Scans `input` and writes it to `w` as strict JSON.
pub fn write_json<W>(w: &mut W, input: &[u8]) -> Result<Stats, Error>
where
    W: Write,
{
    let mut scanner = Scanner::new(input);
    let stats = write_events(scanner.by_ref(), w)?;

    let state = scanner.state();
    if state.mode == Mode::InString {
        tracing::warn!(
            position = state.position,
            "input ended inside an unterminated string literal"
        );
    }
    tracing::debug!(
        bytes = input.len(),
        comments = stats.comments,
        trailing_commas = stats.commas,
        "normalized jsonc input"
    );
    Ok(stats)
}

/// Writes the events of a scan to `w`, dropping line comments and any comma
/// whose next significant event closes an object or array.
pub fn write_events<'a, I, W>(s: I, w: &mut W) -> Result<Stats, Error>
where
    I: Iterator<Item = Event<'a>>,
    W: Write,
{
    let mut s = s.peekable();
    let mut stats = Stats::default();
    let mut held = Vec::new();

    while let Some(event) = s.next() {
        match event.token {
            Token::Text(v) | Token::Whitespace(v) | Token::String(v) => w.write_all(v)?,
            Token::LineComment(_) => stats.comments += 1,
            Token::Comma => {
                held.clear();
                stats.comments += hold_whitespace(&mut s, &mut held);
                if closes_container(&mut s) {
                    stats.commas += 1;
                } else {
                    w.write_all(b",")?;
                }
                for ws in &held {
                    w.write_all(ws)?;
                }
            }
            Token::ObjectEnd => w.write_all(b"}")?,
            Token::ArrayEnd => w.write_all(b"]")?,
        }
    }
    Ok(stats)
}

/// Consumes the whitespace and comments that follow a comma, keeping the
/// whitespace in `held`. Returns the number of comments skipped.
fn hold_whitespace<'a, I>(s: &mut Peekable<I>, held: &mut Vec<&'a [u8]>) -> usize
where
    I: Iterator<Item = Event<'a>>,
{
    let mut comments = 0;
    while let Some(event) = s.peek() {
        match event.token {
            Token::Whitespace(v) => held.push(v),
            Token::LineComment(_) => comments += 1,
            _ => break,
        }
        s.next();
    }
    comments
}

fn closes_container<'a, I>(s: &mut Peekable<I>) -> bool
where
    I: Iterator<Item = Event<'a>>,
{
    matches!(
        s.peek().map(|event| event.token),
        Some(Token::ObjectEnd | Token::ArrayEnd)
    )
}

//! Recursive-descent parser for the `[Links]` section.
//!
//! # Grammar
//!
//! ```text
//! section    := link* '}'? EOF
//! link       := '{' INT INT INT INT INT segment+ '}'       id type up down label
//! segment    := '{' INT INT INT INT descriptor lane+ '}'   id speed free-speed grade
//! descriptor := '{' SCI SCI DEC SCI SCI '}'                sx sy bulge ex ey
//! lane       := '{' INT INT '}'
//! ```
//!
//! The trailing `}` is the section's own closing brace, left behind by
//! [`extract_links_section`](crate::extract_links_section).  Every `{` opens
//! exactly one production, so no lookahead beyond one token is needed to tell
//! a lane rule from the segment or link close that follows it.
//!
//! Link type, label, speed limit, free speed, grade, bulge and lane-rule
//! contents are validated as numbers and then discarded.

use log::debug;

use mx_core::{LinkId, Point, SegmentId};

use crate::lexer::{Token, TokenKind, tokenize};
use crate::{NetworkError, NetworkResult};

// ── Parsed records ────────────────────────────────────────────────────────────

/// One segment as declared in the file.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedSegment {
    pub id:    SegmentId,
    pub start: Point,
    pub end:   Point,
}

/// One link and its segments, upstream to downstream (document order).
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedLink {
    pub id:       LinkId,
    pub up:       u64,
    pub down:     u64,
    pub segments: Vec<ParsedSegment>,
}

// ── Numbers ───────────────────────────────────────────────────────────────────

/// Parse `[sign]digits.digits e sign digits`, e.g. `1.5e+2` → 150.
///
/// Returns `None` for anything else, including plain decimals.
pub fn parse_scientific(s: &str) -> Option<f64> {
    let (mantissa, exponent) = s.split_once('e')?;

    let unsigned = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
    let (int, frac) = unsigned.split_once('.')?;
    if !all_digits(int) || !all_digits(frac) {
        return None;
    }

    let digits = exponent.strip_prefix(['+', '-'])?;
    if !all_digits(digits) {
        return None;
    }

    // Shape is validated; std's parser gives a correctly rounded value.
    s.parse().ok()
}

fn parse_decimal(s: &str) -> Option<f64> {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    s.parse().ok()
}

#[inline]
fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// ── Parser ────────────────────────────────────────────────────────────────────

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos:    usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self { tokens: tokenize(text), pos: 0 }
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek_is_open(&self) -> bool {
        matches!(self.peek(), Some(t) if t.kind == TokenKind::Open)
    }

    fn next(&mut self, expected: &'static str) -> NetworkResult<Token<'a>> {
        let tok = *self.tokens.get(self.pos).ok_or(NetworkError::UnexpectedEnd { expected })?;
        self.pos += 1;
        Ok(tok)
    }

    fn expect(&mut self, kind: TokenKind<'static>, expected: &'static str) -> NetworkResult<()> {
        let tok = self.next(expected)?;
        if tok.kind != kind {
            return Err(unexpected(&tok, expected));
        }
        Ok(())
    }

    fn word(&mut self, expected: &'static str) -> NetworkResult<(&'a str, usize)> {
        let tok = self.next(expected)?;
        match tok.kind {
            TokenKind::Word(w) => Ok((w, tok.offset)),
            _ => Err(unexpected(&tok, expected)),
        }
    }

    fn int<T: std::str::FromStr>(&mut self) -> NetworkResult<T> {
        let (w, offset) = self.word("integer")?;
        let value = if all_digits(w) { w.parse().ok() } else { None };
        value.ok_or_else(|| malformed(w, offset, "integer"))
    }

    fn sci(&mut self) -> NetworkResult<f64> {
        let (w, offset) = self.word("scientific number")?;
        parse_scientific(w).ok_or_else(|| malformed(w, offset, "scientific number"))
    }

    fn dec(&mut self) -> NetworkResult<f64> {
        let (w, offset) = self.word("decimal number")?;
        parse_decimal(w).ok_or_else(|| malformed(w, offset, "decimal number"))
    }

    // ── Productions ───────────────────────────────────────────────────────

    fn section(&mut self) -> NetworkResult<Vec<ParsedLink>> {
        let mut links = Vec::new();
        while let Some(tok) = self.peek().copied() {
            match tok.kind {
                TokenKind::Open => links.push(self.link()?),
                TokenKind::Close if self.pos + 1 == self.tokens.len() => self.pos += 1,
                _ => return Err(unexpected(&tok, "'{' opening a link")),
            }
        }
        Ok(links)
    }

    fn link(&mut self) -> NetworkResult<ParsedLink> {
        self.expect(TokenKind::Open, "'{' opening a link")?;
        let id = LinkId(self.int()?);
        let _link_type: u32 = self.int()?;
        let up: u64 = self.int()?;
        let down: u64 = self.int()?;
        let _label: u32 = self.int()?;

        let mut segments = vec![self.segment()?];
        while self.peek_is_open() {
            segments.push(self.segment()?);
        }
        self.expect(TokenKind::Close, "'}' closing a link")?;

        Ok(ParsedLink { id, up, down, segments })
    }

    fn segment(&mut self) -> NetworkResult<ParsedSegment> {
        self.expect(TokenKind::Open, "'{' opening a segment")?;
        let id = SegmentId(self.int()?);
        let _speed_limit: u32 = self.int()?;
        let _free_speed: u32 = self.int()?;
        let _grade: u32 = self.int()?;

        self.expect(TokenKind::Open, "'{' opening a segment descriptor")?;
        let start = Point::new(self.sci()?, self.sci()?);
        let _bulge = self.dec()?;
        let end = Point::new(self.sci()?, self.sci()?);
        self.expect(TokenKind::Close, "'}' closing a segment descriptor")?;

        self.lane_rule()?;
        while self.peek_is_open() {
            self.lane_rule()?;
        }
        self.expect(TokenKind::Close, "'}' closing a segment")?;

        Ok(ParsedSegment { id, start, end })
    }

    fn lane_rule(&mut self) -> NetworkResult<()> {
        self.expect(TokenKind::Open, "'{' opening a lane rule")?;
        let _lane: u32 = self.int()?;
        let _rule: u32 = self.int()?;
        self.expect(TokenKind::Close, "'}' closing a lane rule")
    }
}

fn unexpected(tok: &Token<'_>, expected: &'static str) -> NetworkError {
    NetworkError::UnexpectedToken { offset: tok.offset, expected, found: tok.text().to_owned() }
}

fn malformed(token: &str, offset: usize, kind: &'static str) -> NetworkError {
    NetworkError::MalformedNumber { offset, token: token.to_owned(), kind }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse the `[Links]` section body and check segment chain continuity.
///
/// A segment whose start lies `max_gap` or further from the previous
/// segment's end is rejected with [`NetworkError::SegmentGap`].
pub fn parse_links(section: &str, max_gap: f64) -> NetworkResult<Vec<ParsedLink>> {
    let links = Parser::new(section).section()?;

    for link in &links {
        for pair in link.segments.windows(2) {
            let (prev, seg) = (&pair[0], &pair[1]);
            if seg.start == prev.end {
                continue;
            }
            let distance = seg.start.distance(prev.end);
            if distance >= max_gap {
                return Err(NetworkError::SegmentGap { segment: seg.id, distance });
            }
        }
    }

    debug!(
        "parsed {} links / {} segments",
        links.len(),
        links.iter().map(|l| l.segments.len()).sum::<usize>()
    );
    Ok(links)
}

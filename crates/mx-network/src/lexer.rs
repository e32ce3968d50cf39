//! Tokenizer for the `[Links]` section.
//!
//! The section is a tree of brace-delimited records of numeric words.  Braces
//! are always tokens on their own; spaces, tabs, line breaks and commas only
//! separate words.

/// Token kind.  Words borrow from the input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Open,
    Close,
    Word(&'a str),
}

/// A token and its byte offset in the section text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind:   TokenKind<'a>,
    pub offset: usize,
}

impl Token<'_> {
    /// Source text of the token, for error messages.
    pub fn text(&self) -> &str {
        match self.kind {
            TokenKind::Open => "{",
            TokenKind::Close => "}",
            TokenKind::Word(w) => w,
        }
    }
}

#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Split `text` into braces and words.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        let breaks_word = c == '{' || c == '}' || is_separator(c);
        if breaks_word {
            if let Some(start) = word_start.take() {
                tokens.push(Token { kind: TokenKind::Word(&text[start..i]), offset: start });
            }
        }
        match c {
            '{' => tokens.push(Token { kind: TokenKind::Open, offset: i }),
            '}' => tokens.push(Token { kind: TokenKind::Close, offset: i }),
            _ if breaks_word => {}
            _ => {
                word_start.get_or_insert(i);
            }
        }
    }
    if let Some(start) = word_start {
        tokens.push(Token { kind: TokenKind::Word(&text[start..]), offset: start });
    }
    tokens
}

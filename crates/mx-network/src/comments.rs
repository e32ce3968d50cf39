//! Comment removal for the MITSIM network file.
//!
//! MITSIM accepts Perl (`#`), C++ (`//`) and C (`/* */`, possibly spanning
//! lines) comments anywhere in the file.  Each line is processed in a fixed
//! order:
//!
//! 1. if a block comment is open, drop everything through the first `*/`
//!    (or the whole line if there is none);
//! 2. cut at the first `#`;
//! 3. cut at the first `//`;
//! 4. remove every complete `/* … */`;
//! 5. cut at an unmatched `/*` and remember that a block comment is open.
//!
//! The order matters: `/* a # b */` loses its closer in step 2 and opens a
//! block comment, exactly as MITSIM's own reader does.

/// Line-by-line comment remover.  Carries the "inside `/* */`" flag between
/// calls to [`strip_line`](Self::strip_line).
#[derive(Debug, Default)]
pub struct CommentStripper {
    in_block: bool,
}

impl CommentStripper {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if the last processed line ended inside a block comment.
    pub fn in_block(&self) -> bool {
        self.in_block
    }

    /// Return the non-comment text of `line`.
    pub fn strip_line(&mut self, line: &str) -> String {
        let mut line = line;

        if self.in_block {
            match line.find("*/") {
                Some(close) => {
                    line = &line[close + 2..];
                    self.in_block = false;
                }
                None => return String::new(),
            }
        }

        if let Some(hash) = line.find('#') {
            line = &line[..hash];
        }
        if let Some(slashes) = line.find("//") {
            line = &line[..slashes];
        }

        let mut out = String::with_capacity(line.len());
        let mut rest = line;
        while let Some(open) = rest.find("/*") {
            out.push_str(&rest[..open]);
            let body = &rest[open + 2..];
            match body.find("*/") {
                Some(close) => rest = &body[close + 2..],
                None => {
                    self.in_block = true;
                    return out;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Strip comments from every line and concatenate the fragments.
///
/// No separator is inserted between lines; the grammar that consumes the
/// result does not depend on line boundaries.
pub fn strip_comments<'a, I>(lines: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stripper = CommentStripper::new();
    let mut blob = String::new();
    for line in lines {
        blob.push_str(&stripper.strip_line(line));
    }
    blob
}

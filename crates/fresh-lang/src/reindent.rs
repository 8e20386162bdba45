//! Bracket-depth reindentation.
//!
//! The writer emits every line flush left. This pass strips whatever leading
//! whitespace a line has and indents it by the number of `{`/`[` still open,
//! so layout always mirrors nesting. A closer that would take the depth below
//! zero is flagged inline with [`UNDERFLOW_MARKER`] and counted.
//!
//! Markers already present in the input are dropped and re-derived, so
//! reindenting marked output yields the same markers again.

use fresh_core::{FreshError, FreshResult};

pub const UNDERFLOW_MARKER: &str = "INDENT PROBLEM>";

/// Reindented text plus the number of unmatched closing brackets seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reindented {
    pub text: String,
    pub underflows: usize,
}

impl Reindented {
    pub fn is_clean(&self) -> bool {
        self.underflows == 0
    }

    /// The text, or an error if any closer went unmatched.
    pub fn into_strict(self) -> FreshResult<String> {
        if self.is_clean() {
            Ok(self.text)
        } else {
            Err(FreshError::IndentUnderflow {
                count: self.underflows,
            })
        }
    }
}

/// Streaming state for the reindentation scan.
#[derive(Debug)]
pub struct Reindenter<'a> {
    unit: &'a str,
    depth: usize,
    line_start: bool,
    underflows: usize,
    /// Length of the [`UNDERFLOW_MARKER`] prefix matched so far.
    marker_matched: usize,
}

impl<'a> Reindenter<'a> {
    pub fn new(unit: &'a str) -> Self {
        Self {
            unit,
            depth: 0,
            line_start: true,
            underflows: 0,
            marker_matched: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn underflows(&self) -> usize {
        self.underflows
    }

    /// Append the reindented form of `input` to `out`. State carries over
    /// between calls, so input may arrive in pieces; call [`finish`] after
    /// the last one.
    ///
    /// [`finish`]: Reindenter::finish
    pub fn feed(&mut self, input: &str, out: &mut String) {
        for c in input.chars() {
            self.push(c, out);
        }
    }

    /// Flush a partially matched marker left at the end of the input.
    pub fn finish(&mut self, out: &mut String) {
        self.flush_marker(out);
    }

    fn push(&mut self, c: char, out: &mut String) {
        if UNDERFLOW_MARKER[self.marker_matched..].starts_with(c) {
            self.marker_matched += c.len_utf8();
            if self.marker_matched == UNDERFLOW_MARKER.len() {
                self.marker_matched = 0;
            }
            return;
        }
        if self.marker_matched > 0 {
            self.flush_marker(out);
            self.push(c, out);
            return;
        }
        self.push_text(c, out);
    }

    /// Emit a partial marker match as ordinary text.
    fn flush_marker(&mut self, out: &mut String) {
        let matched = std::mem::take(&mut self.marker_matched);
        for c in UNDERFLOW_MARKER[..matched].chars() {
            self.push_text(c, out);
        }
    }

    fn push_text(&mut self, c: char, out: &mut String) {
        if self.line_start {
            match c {
                ' ' | '\t' => return,
                '\n' => {
                    out.push('\n');
                    return;
                }
                _ => {}
            }
            self.line_start = false;
            if is_closer(c) {
                self.close(out);
            }
            for _ in 0..self.depth {
                out.push_str(self.unit);
            }
            out.push(c);
            if is_opener(c) {
                self.depth += 1;
            }
            return;
        }

        match c {
            '\n' => self.line_start = true,
            _ if is_opener(c) => self.depth += 1,
            _ if is_closer(c) => self.close(out),
            _ => {}
        }
        out.push(c);
    }

    fn close(&mut self, out: &mut String) {
        if self.depth == 0 {
            self.underflows += 1;
            out.push_str(UNDERFLOW_MARKER);
        } else {
            self.depth -= 1;
        }
    }
}

fn is_opener(c: char) -> bool {
    c == '{' || c == '['
}

fn is_closer(c: char) -> bool {
    c == '}' || c == ']'
}

/// Reindent `text`, using `unit` once per open bracket.
pub fn reindent(text: &str, unit: &str) -> Reindented {
    let mut reindenter = Reindenter::new(unit);
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    reindenter.feed(text, &mut out);
    reindenter.finish(&mut out);
    if reindenter.underflows() > 0 {
        tracing::warn!(
            count = reindenter.underflows(),
            "closing brackets without a matching opener"
        );
    }
    if reindenter.depth() > 0 {
        tracing::debug!(depth = reindenter.depth(), "input ended with unclosed brackets");
    }
    Reindented {
        text: out,
        underflows: reindenter.underflows(),
    }
}

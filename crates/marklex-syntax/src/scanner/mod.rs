//! # Scanner - Block-Level State Machine
//!
//! The scanner walks the source once, left to right, and cuts it into
//! [`Token`]s. It is a hand-rolled state machine: each [`State`] names the
//! routine to run next, and each routine returns the state that follows it.
//!
//! ```text
//! Block ──► ListOrRule ──► Block | Text
//!       ──► AtxHeader  ──► Block | Text
//!       ──► Paragraph  ──► Setext | Text
//!       ──► Text       ──► Block | Paragraph (continuation line)
//!                      ──► AtxHeader | ListOrRule (`#`, `*`, `+` continuation line)
//! Setext ──► Block | Text
//! Block at end of input ──► Done
//! ```
//!
//! ## Why a Queue?
//!
//! A routine can confirm several tokens at once (the text of a line and the
//! line break after it). They are queued and handed out one at a time by the
//! [`Iterator`] impl, so the consumer pulls tokens on demand and the scanner
//! never runs further ahead than the routine that produced them.
//!
//! ## Routines
//!
//! - [`block`] - dispatch on the next character
//! - [`paragraph`] - inline text, soft and hard line breaks, continuation
//! - [`construct`] - ATX headers, setext headers, rules and list items

mod block;
mod construct;
mod paragraph;

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::cursor::Cursor;
use crate::error::ScanError;
use crate::options::{ScanOptions, UnterminatedHeader};
use crate::token::{Token, TokenKind};

/// What the scanner does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Decide which construct starts at the current position.
    Block,
    /// Text of the given kind, preceded by a setext check on continuation lines.
    Paragraph(TokenKind),
    /// Text of the given kind up to the end of the line.
    Text(TokenKind),
    /// A line of `=` or `-` under a paragraph line.
    Setext,
    /// ATX header, or text of the given kind if the `#` run is not one.
    AtxHeader(TokenKind),
    /// Rule or list item, or text of the given kind if the marker opens neither.
    ListOrRule(TokenKind),
    /// No further tokens.
    Done,
}

/// Pull-based markdown scanner.
///
/// Yields tokens in source order; the last one is always `EOF` or `ERROR`.
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    options: ScanOptions,
    state: State,
    queue: VecDeque<Token<'a>>,
    error: Option<ScanError>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ScanOptions::default())
    }

    pub fn with_options(input: &'a str, options: ScanOptions) -> Self {
        Self {
            cursor: Cursor::new(input),
            options,
            state: State::Block,
            queue: VecDeque::new(),
            error: None,
        }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// The error that ended the scan, if it ended with an `ERROR` token.
    pub fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    fn step(&mut self, state: State) -> State {
        let next = match state {
            State::Block => block::block(self),
            State::Paragraph(kind) => paragraph::paragraph(self, kind),
            State::Text(kind) => paragraph::text(self, kind),
            State::Setext => construct::setext_header(self),
            State::AtxHeader(kind) => construct::atx_header(self, kind),
            State::ListOrRule(kind) => construct::list_or_rule(self, kind),
            State::Done => State::Done,
        };
        log::trace!("{state:?} -> {next:?} at {}", self.cursor.pos());
        next
    }

    /// Emit the pending span as `kind`.
    fn push(&mut self, kind: TokenKind) {
        let token = self.cursor.emit(kind);
        self.queue.push_back(token);
    }

    /// Emit the pending span as `kind` if it is not empty.
    fn push_text(&mut self, kind: TokenKind) {
        if !self.cursor.pending().is_empty() {
            self.push(kind);
        }
    }

    /// Emit the pending span without its trailing spaces, which become
    /// leading markup of the next token.
    fn push_trimmed(&mut self, kind: TokenKind) {
        let trailing = self.cursor.trailing_spaces();
        for _ in 0..trailing {
            self.cursor.back_up();
        }
        self.push(kind);
        self.cursor.skip(trailing);
    }

    /// Queue a terminal error and stop.
    fn fail(&mut self, err: ScanError) -> State {
        log::debug!("scan failed: {err}");
        let token = self.cursor.error(&err);
        self.queue.push_back(token);
        self.error = Some(err);
        State::Done
    }

    fn line_ending(&self) -> Option<usize> {
        self.cursor.line_ending(self.options.line_endings)
    }

    /// Returns true at a line ending or at end of input.
    fn at_line_end(&self) -> bool {
        self.cursor.eof() || self.line_ending().is_some()
    }

    /// Consume the rest of the line, stopping before its line ending.
    fn consume_line(&mut self) {
        while !self.at_line_end() {
            self.cursor.advance();
        }
    }

    /// Discard leading spaces.
    fn skip_indent(&mut self) {
        self.cursor.accept_run_of(" ");
        self.cursor.ignore();
    }

    /// Consume a line ending without emitting it.
    fn swallow_line_ending(&mut self) {
        if let Some(len) = self.line_ending() {
            self.cursor.skip(len);
        }
    }

    /// How a header line that started at `offset` ends: `Ok(Some(len))` for a
    /// line ending, `Ok(None)` for an accepted end of input.
    fn header_terminator(&self, offset: usize) -> Result<Option<usize>, ScanError> {
        match self.line_ending() {
            Some(len) => Ok(Some(len)),
            None => match self.options.unterminated_header {
                UnterminatedHeader::Accept => Ok(None),
                UnterminatedHeader::Error => Err(ScanError::UnterminatedHeader { offset }),
            },
        }
    }

    /// Length of a hard-line-break marker (two or more spaces then a line
    /// ending) at the current position.
    fn hard_break_len(&self) -> Option<usize> {
        let rest = self.cursor.rest();
        let spaces = rest.len() - rest.trim_start_matches(' ').len();
        if spaces < 2 {
            return None;
        }
        self.options
            .line_endings
            .match_len(&rest[spaces..])
            .map(|len| spaces + len)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(token);
            }
            if self.state == State::Done {
                return None;
            }
            self.state = self.step(self.state);
        }
    }
}

impl FusedIterator for Scanner<'_> {}

/// Scan `input` with default options.
///
/// Lossless: for a stream ending in `EOF`, joining every token's `leading`
/// and `text` gives back `input`.
///
/// ```
/// use marklex_syntax::{lex, TokenKind};
///
/// let tokens = lex("# Hello\n");
/// assert_eq!(tokens[0].kind, TokenKind::H1);
/// assert_eq!(tokens[0].text, "Hello");
/// assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EOF));
/// ```
pub fn lex(input: &str) -> Vec<Token<'_>> {
    Scanner::new(input).collect()
}

/// Scan `input`, turning a terminal `ERROR` token into `Err`.
pub fn scan(input: &str, options: ScanOptions) -> Result<Vec<Token<'_>>, ScanError> {
    let mut scanner = Scanner::with_options(input, options);
    let tokens: Vec<_> = scanner.by_ref().collect();
    match scanner.error {
        Some(err) => Err(err),
        None => Ok(tokens),
    }
}

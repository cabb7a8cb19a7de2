//! Headers, horizontal rules and list items.
//!
//! Each routine consumes one construct and hands control back to block
//! dispatch, or falls back to paragraph text when its lookahead does not pan
//! out. Block constructs swallow their own line ending: it shows up as
//! leading markup of the next token rather than as a break token.

use super::block::LIST_MARKERS;
use super::{Scanner, State};
use crate::error::ScanError;
use crate::options::HeadingOverflow;
use crate::token::TokenKind;

/// Minimum number of marker characters in a horizontal rule.
const MIN_RULE_MARKERS: usize = 3;

/// `#` run, one space, heading text. A run without the space is `fallback`
/// text.
pub(super) fn atx_header(s: &mut Scanner<'_>, fallback: TokenKind) -> State {
    let offset = s.cursor.pos();
    let level = s.cursor.accept_run_of("#");
    if level == 0 {
        return s.fail(ScanError::EmptyHeadingRun { offset });
    }

    if s.cursor.peek() != Some(' ') {
        // `#tag`: the hashes are plain text
        log::debug!("no space after {level} hash(es) at {offset}, scanning as text");
        return State::Text(fallback);
    }

    let kind = match TokenKind::heading(level) {
        Some(kind) => kind,
        None => match s.options.heading_overflow {
            HeadingOverflow::Clamp => {
                log::warn!("ATX header level {level} at {offset} clamped to 6");
                TokenKind::H6
            }
            HeadingOverflow::Error => {
                return s.fail(ScanError::HeadingTooDeep { level, offset });
            }
        },
    };

    s.cursor.skip(1);
    s.consume_line();
    let ending = match s.header_terminator(offset) {
        Ok(ending) => ending,
        Err(err) => return s.fail(err),
    };
    s.push_trimmed(kind);
    if let Some(len) = ending {
        s.cursor.skip(len);
    }
    State::Block
}

/// Underline under a paragraph line: `=` for level 1, `-` for level 2.
///
/// The line must hold nothing but one marker character repeated, optionally
/// followed by spaces. Anything else and the line is ordinary text.
pub(super) fn setext_header(s: &mut Scanner<'_>) -> State {
    let offset = s.cursor.pos();
    let line_start = s.cursor.checkpoint();
    let (marker, kind) = match s.cursor.peek() {
        Some('=') => ("=", TokenKind::H1),
        Some('-') => ("-", TokenKind::H2),
        _ => return State::Text(TokenKind::PARAGRAPH_CONT),
    };

    s.cursor.accept_run_of(marker);
    let run_end = s.cursor.checkpoint();
    s.cursor.accept_run_of(" ");

    if !s.at_line_end() {
        log::debug!("stray characters after setext marker at {offset}, scanning as text");
        s.cursor.rewind(line_start);
        // A `- ` line under a paragraph is a list item, not more paragraph
        if marker == "-" && s.cursor.has_prefix("- ") {
            return State::Block;
        }
        return State::Text(TokenKind::PARAGRAPH_CONT);
    }

    let ending = match s.header_terminator(offset) {
        Ok(ending) => ending,
        Err(err) => return s.fail(err),
    };
    s.cursor.rewind(run_end);
    s.push(kind);
    s.cursor.accept_run_of(" ");
    s.cursor.ignore();
    if let Some(len) = ending {
        s.cursor.skip(len);
    }
    State::Block
}

/// `-`, `+` or `*`: a horizontal rule, a list item, or plain text.
///
/// The rule reading is tried first: the marker repeated at least three
/// times, with optional spaces between, and nothing else on the line. `+`
/// never makes a rule. A marker that opens neither is `fallback` text.
pub(super) fn list_or_rule(s: &mut Scanner<'_>, fallback: TokenKind) -> State {
    let Some(marker) = s.cursor.peek().filter(|&c| LIST_MARKERS.contains(c)) else {
        return State::Block;
    };

    if marker != '+' {
        let line_start = s.cursor.checkpoint();
        let marker_set = marker.to_string();
        let mut count = 0;
        loop {
            count += s.cursor.accept_run_of(&marker_set);
            if s.cursor.accept_run_of(" ") == 0 {
                break;
            }
        }
        if count >= MIN_RULE_MARKERS && s.at_line_end() {
            s.push_trimmed(TokenKind::HORIZONTAL_RULE);
            s.swallow_line_ending();
            return State::Block;
        }
        s.cursor.rewind(line_start);
    }

    s.cursor.advance();
    if !s.cursor.accept_one_of(" ") {
        log::debug!("{marker:?} without a space at {}, scanning as text", s.cursor.pos());
        return State::Text(fallback);
    }
    s.cursor.ignore();
    s.consume_line();
    s.push_trimmed(TokenKind::LIST_ITEM);
    s.swallow_line_ending();
    State::Block
}

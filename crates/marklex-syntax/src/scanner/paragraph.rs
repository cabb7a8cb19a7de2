//! Paragraph lines and the line breaks between them.

use super::{Scanner, State};
use crate::token::TokenKind;

/// Characters that underline a setext header.
pub(super) const SETEXT_MARKERS: &str = "=-";

/// What follows a paragraph line when the next line starts with `c`.
///
/// `#`, `*` and `+` may open their own constructs. When they don't, the line
/// is still a continuation of the paragraph.
fn continuation(c: char, text: State) -> State {
    match c {
        '#' => State::AtxHeader(TokenKind::PARAGRAPH_CONT),
        '*' | '+' => State::ListOrRule(TokenKind::PARAGRAPH_CONT),
        _ => text,
    }
}

/// Enter a paragraph line. Continuation lines may turn out to be a setext
/// underline for the line before them.
pub(super) fn paragraph(s: &mut Scanner<'_>, kind: TokenKind) -> State {
    if kind == TokenKind::PARAGRAPH_CONT
        && s.cursor.peek().is_some_and(|c| SETEXT_MARKERS.contains(c))
    {
        return State::Setext;
    }
    text(s, kind)
}

/// Consume inline text to the end of the line and decide what follows.
pub(super) fn text(s: &mut Scanner<'_>, kind: TokenKind) -> State {
    s.consume_line();

    let Some(ending) = s.line_ending() else {
        // Last line, no line ending
        s.push_text(kind);
        return State::Block;
    };

    let trailing = s.cursor.trailing_spaces();
    if trailing >= 2 {
        return hard_break(s, kind, trailing + ending, trailing);
    }

    s.push_text(kind);
    s.cursor.advance_n(ending);
    s.push(TokenKind::SOFT_BREAK);
    s.skip_indent();

    if let Some(len) = s.line_ending() {
        // Blank line ends the paragraph
        s.cursor.advance_n(len);
        s.push(TokenKind::SOFT_BREAK);
        return State::Block;
    }

    match s.cursor.peek() {
        Some(c) => continuation(c, State::Paragraph(TokenKind::PARAGRAPH_CONT)),
        None => State::Block,
    }
}

/// Emit the text before a hard break, then the break itself (`len` bytes,
/// of which `trailing` are spaces already consumed).
fn hard_break(s: &mut Scanner<'_>, kind: TokenKind, len: usize, trailing: usize) -> State {
    for _ in 0..trailing {
        s.cursor.back_up();
    }
    s.push_text(kind);
    s.cursor.advance_n(len);
    s.push(TokenKind::HARD_BREAK);
    s.skip_indent();

    match s.cursor.peek() {
        Some(c) if SETEXT_MARKERS.contains(c) => State::Setext,
        _ if s.at_line_end() => State::Block,
        Some(c) => continuation(c, State::Text(TokenKind::PARAGRAPH_CONT)),
        None => State::Block,
    }
}

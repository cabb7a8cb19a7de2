//! Block-level dispatch.

use super::{Scanner, State};
use crate::token::TokenKind;

/// Characters that open a list item or a horizontal rule.
pub(super) const LIST_MARKERS: &str = "-+*";

/// Characters that start an ordinary paragraph.
pub(super) fn is_word(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Decide which construct starts at the current position.
pub(super) fn block(s: &mut Scanner<'_>) -> State {
    if let Some(len) = s.hard_break_len() {
        s.cursor.advance_n(len);
        s.push(TokenKind::HARD_BREAK);
        return State::Block;
    }

    match s.cursor.peek() {
        Some(c) if LIST_MARKERS.contains(c) => State::ListOrRule(TokenKind::PARAGRAPH),
        Some(c) if is_word(c) => State::Paragraph(TokenKind::PARAGRAPH),
        Some('#') => State::AtxHeader(TokenKind::PARAGRAPH),
        None => {
            s.push_text(TokenKind::PARAGRAPH);
            s.push(TokenKind::EOF);
            State::Done
        }
        Some(' ') => {
            s.skip_indent();
            State::Block
        }
        Some(_) => match s.line_ending() {
            // Blank line
            Some(len) => {
                s.cursor.advance_n(len);
                s.push(TokenKind::SOFT_BREAK);
                State::Block
            }
            None => {
                log::debug!(
                    "no block construct at {}, scanning as paragraph",
                    s.cursor.pos()
                );
                State::Text(TokenKind::PARAGRAPH)
            }
        },
    }
}

use crate::error::ScanError;
use crate::options::LineEndings;
use crate::token::{Token, TokenKind};

/// A char-level cursor over the source with a pending span.
///
/// Text before `pos` has been consumed. The pending span `start..pos` is what
/// the next [`emit`](Cursor::emit) turns into a token value; `mark..start` is
/// markup that was [`ignore`](Cursor::ignore)d since the last emission.
///
/// Every advance pushes the width of the char it decoded, so any number of
/// [`back_up`](Cursor::back_up) calls are safe down to the start of the
/// pending span.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    /// End of the previous token (start of its successor's leading markup).
    mark: usize,
    /// Start of the pending span.
    start: usize,
    pos: usize,
    /// Widths of the chars advanced over since `start`.
    widths: Vec<usize>,
    /// Bumped whenever `start` moves, invalidating older checkpoints.
    epoch: usize,
}

/// A saved position inside the pending span, see [`Cursor::rewind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pos: usize,
    depth: usize,
    epoch: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            mark: 0,
            start: 0,
            pos: 0,
            widths: Vec::new(),
            epoch: 0,
        }
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns true if at end of input.
    pub fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The unconsumed remainder.
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// The pending span `start..pos`.
    pub fn pending(&self) -> &'a str {
        &self.input[self.start..self.pos]
    }

    /// Decodes the next char and moves past it.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        let width = c.len_utf8();
        self.pos += width;
        self.widths.push(width);
        Some(c)
    }

    /// Advances over `n` chars, stopping early at end of input.
    pub fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// The next char, without moving.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Rewinds one advanced char. Returns false if the pending span is empty.
    pub fn back_up(&mut self) -> bool {
        match self.widths.pop() {
            Some(width) => {
                self.pos -= width;
                true
            }
            None => false,
        }
    }

    /// Advances if the next char is in `set`.
    pub fn accept_one_of(&mut self, set: &str) -> bool {
        match self.peek() {
            Some(c) if set.contains(c) => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    /// Advances while the next char is in `set`, returning the count consumed.
    pub fn accept_run_of(&mut self, set: &str) -> usize {
        let mut n = 0;
        while self.accept_one_of(set) {
            n += 1;
        }
        n
    }

    /// Checks if the remainder starts with `literal`, without consuming.
    pub fn has_prefix(&self, literal: &str) -> bool {
        self.rest().starts_with(literal)
    }

    /// Length of the line ending at the current position, if any.
    pub fn line_ending(&self, policy: LineEndings) -> Option<usize> {
        policy.match_len(self.rest())
    }

    /// Number of trailing spaces in the pending span.
    pub fn trailing_spaces(&self) -> usize {
        let pending = self.pending();
        pending.len() - pending.trim_end_matches(' ').len()
    }

    /// Cuts the pending span into a token and starts a new one.
    pub fn emit(&mut self, kind: TokenKind) -> Token<'a> {
        let token = Token::new(
            kind,
            &self.input[self.start..self.pos],
            &self.input[self.mark..self.start],
            self.start..self.pos,
        );
        self.mark = self.pos;
        self.reset_start();
        token
    }

    /// Terminal error token. The pending span is dropped.
    pub fn error(&mut self, err: &ScanError) -> Token<'a> {
        let token = Token::error(err, &self.input[self.mark..self.start], self.pos);
        self.mark = self.pos;
        self.reset_start();
        token
    }

    /// Discards the pending span; it becomes leading markup of the next token.
    pub fn ignore(&mut self) {
        self.reset_start();
    }

    /// Advances over `n` chars, then ignores everything pending.
    pub fn skip(&mut self, n: usize) {
        self.advance_n(n);
        self.ignore();
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            depth: self.widths.len(),
            epoch: self.epoch,
        }
    }

    /// Moves back to `checkpoint`.
    ///
    /// Returns false and leaves the cursor untouched if the pending span was
    /// emitted or ignored since the checkpoint was taken, or if the checkpoint
    /// is ahead of the cursor.
    pub fn rewind(&mut self, checkpoint: Checkpoint) -> bool {
        if checkpoint.epoch != self.epoch || checkpoint.depth > self.widths.len() {
            return false;
        }
        self.pos = checkpoint.pos;
        self.widths.truncate(checkpoint.depth);
        true
    }

    fn reset_start(&mut self) {
        self.start = self.pos;
        self.widths.clear();
        self.epoch += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello");
        assert_eq!(cur.pos(), 0);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some('h'));
        assert_eq!(cur.advance(), Some('h'));
        assert_eq!(cur.pos(), 1);
        assert_eq!(cur.pending(), "h");
    }

    #[test]
    fn empty_string_input() {
        let mut cur = Cursor::new("");
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.advance(), None);
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn advance_at_eof_does_not_move() {
        let mut cur = Cursor::new("x");
        assert_eq!(cur.advance(), Some('x'));
        assert_eq!(cur.advance(), None);
        assert_eq!(cur.advance(), None);
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn multibyte_chars_advance_by_width() {
        let mut cur = Cursor::new("é€x");
        assert_eq!(cur.advance(), Some('é'));
        assert_eq!(cur.pos(), 2);
        assert_eq!(cur.advance(), Some('€'));
        assert_eq!(cur.pos(), 5);
        assert_eq!(cur.peek(), Some('x'));
    }

    #[test]
    fn back_up_is_safe_repeatedly() {
        let mut cur = Cursor::new("a€b");
        cur.advance_n(3);
        assert!(cur.eof());
        assert!(cur.back_up());
        assert_eq!(cur.peek(), Some('b'));
        assert!(cur.back_up());
        assert_eq!(cur.peek(), Some('€'));
        assert!(cur.back_up());
        assert_eq!(cur.pos(), 0);
        assert!(!cur.back_up());
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn back_up_stops_at_pending_start() {
        let mut cur = Cursor::new("ab");
        cur.advance();
        cur.ignore();
        assert!(!cur.back_up());
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn accept_one_of_only_matches_set() {
        let mut cur = Cursor::new("-x");
        assert!(!cur.accept_one_of("*+"));
        assert!(cur.accept_one_of("-+*"));
        assert!(!cur.accept_one_of("-+*"));
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn accept_run_of_counts_chars() {
        let mut cur = Cursor::new("### title");
        assert_eq!(cur.accept_run_of("#"), 3);
        assert_eq!(cur.accept_run_of("#"), 0);
        assert_eq!(cur.peek(), Some(' '));
    }

    #[test]
    fn has_prefix_does_not_consume() {
        let cur = Cursor::new("  \r\n");
        assert!(cur.has_prefix("  \r\n"));
        assert!(!cur.has_prefix("\r\n"));
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn emit_cuts_pending_span_with_leading_markup() {
        let mut cur = Cursor::new("# Title");
        cur.skip(2);
        cur.advance_n(5);
        let token = cur.emit(TokenKind::H1);
        assert_eq!(token.text, "Title");
        assert_eq!(token.leading, "# ");
        assert_eq!(token.span, 2..7);
        assert_eq!(cur.pending(), "");
    }

    #[test]
    fn consecutive_emits_have_empty_leading() {
        let mut cur = Cursor::new("ab");
        cur.advance();
        let first = cur.emit(TokenKind::PARAGRAPH);
        cur.advance();
        let second = cur.emit(TokenKind::PARAGRAPH_CONT);
        assert_eq!(first.text, "a");
        assert_eq!(second.text, "b");
        assert_eq!(second.leading, "");
    }

    #[test]
    fn trailing_spaces_counts_only_spaces() {
        let mut cur = Cursor::new("text \t  ");
        cur.advance_n(8);
        assert_eq!(cur.trailing_spaces(), 2);
    }

    #[test]
    fn rewind_to_checkpoint() {
        let mut cur = Cursor::new("- - x");
        let start = cur.checkpoint();
        cur.advance_n(4);
        assert!(cur.rewind(start));
        assert_eq!(cur.pos(), 0);
        assert_eq!(cur.pending(), "");
        // the back-up stack was truncated along with the position
        assert!(!cur.back_up());
    }

    #[test]
    fn rewind_refuses_stale_checkpoint() {
        let mut cur = Cursor::new("abc");
        let start = cur.checkpoint();
        cur.advance();
        cur.ignore();
        cur.advance();
        assert!(!cur.rewind(start));
        assert_eq!(cur.pos(), 2);
    }

    #[test]
    fn line_ending_respects_policy() {
        let cur = Cursor::new("\nnext");
        assert_eq!(cur.line_ending(LineEndings::Any), Some(1));
        assert_eq!(cur.line_ending(LineEndings::Crlf), None);
    }
}

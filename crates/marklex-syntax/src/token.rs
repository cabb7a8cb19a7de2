//! Token kinds and token values produced by the scanner.
//!
//! Every token keeps the exact slice of source it was cut from, plus the
//! markup bytes the scanner stepped over just before it. Together these cover
//! every byte of the input.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use crate::error::ScanError;

/// All token kinds the scanner knows about.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for syntax
/// kinds. `BLOCK_QUOTE`, `ORDERED_LIST_ITEM` and `CODE` are part of the
/// vocabulary but no scanning routine produces them.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum TokenKind {
    // === Text ===
    /// First line of a paragraph
    PARAGRAPH,
    /// A further line of the current paragraph
    PARAGRAPH_CONT,

    // === Headings ===
    /// Level 1 heading (`#` or `===` underline)
    H1,
    /// Level 2 heading (`##` or `---` underline)
    H2,
    H3,
    H4,
    H5,
    H6,

    // === Other blocks ===
    /// Thematic break (`---`, `* * *`)
    HORIZONTAL_RULE,
    /// Unordered list item (`- `, `+ `, `* `)
    LIST_ITEM,
    /// Reserved: `> ` quotes are scanned as paragraph text
    BLOCK_QUOTE,
    /// Reserved: `1. ` items are scanned as paragraph text
    ORDERED_LIST_ITEM,
    /// Reserved: code blocks are scanned as paragraph text
    CODE,

    // === Line endings ===
    /// Ordinary line ending
    SOFT_BREAK,
    /// Line ending preceded by two or more spaces
    HARD_BREAK,

    // === Terminals ===
    /// End of input
    EOF,
    /// Malformed construct; text holds the message
    ERROR,
}

impl TokenKind {
    /// Heading kind for `level` (1-based), if it is in `1..=6`.
    pub fn heading(level: usize) -> Option<Self> {
        match level {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            5 => Some(Self::H5),
            6 => Some(Self::H6),
            _ => None,
        }
    }

    /// Heading level of this kind, if it is a heading.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Self::H1 => Some(1),
            Self::H2 => Some(2),
            Self::H3 => Some(3),
            Self::H4 => Some(4),
            Self::H5 => Some(5),
            Self::H6 => Some(6),
            _ => None,
        }
    }

    pub fn is_heading(self) -> bool {
        self.heading_level().is_some()
    }

    /// Returns true for the kinds that end a stream.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::EOF | Self::ERROR)
    }

    pub fn is_line_break(self) -> bool {
        matches!(self, Self::SOFT_BREAK | Self::HARD_BREAK)
    }

    /// Returns true for line endings and terminals, whose text is not content.
    pub fn is_structural(self) -> bool {
        self.is_line_break() || self.is_terminal()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A scanned token.
///
/// `text` is the token value and `span` its byte range in the source.
/// `leading` holds the bytes discarded since the previous token (delimiters
/// like `# ` or `- `, indentation, swallowed line endings).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: Cow<'a, str>,
    pub leading: Cow<'a, str>,
    pub span: Range<usize>,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, leading: &'a str, span: Range<usize>) -> Self {
        Self {
            kind,
            text: Cow::Borrowed(text),
            leading: Cow::Borrowed(leading),
            span,
        }
    }

    /// Terminal error token at `offset`. Its text is the error message, not source.
    pub fn error(err: &ScanError, leading: &'a str, offset: usize) -> Self {
        Self {
            kind: TokenKind::ERROR,
            text: Cow::Owned(err.to_string()),
            leading: Cow::Borrowed(leading),
            span: offset..offset,
        }
    }

    /// Detach the token from the source buffer.
    pub fn into_owned(self) -> Token<'static> {
        Token {
            kind: self.kind,
            text: Cow::Owned(self.text.into_owned()),
            leading: Cow::Owned(self.leading.into_owned()),
            span: self.span,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "EOF"),
            TokenKind::ERROR => write!(f, "ERROR: {}", self.text),
            TokenKind::SOFT_BREAK => write!(f, "Soft return"),
            TokenKind::HARD_BREAK => write!(f, "Hard return"),
            kind => write!(f, "{kind} {:?}", self.text),
        }
    }
}

/// Rebuild the source from a token stream by joining `leading` and `text`.
///
/// Exact for every stream that ends in `EOF`.
pub fn reconstruct<'t, 'a: 't>(tokens: impl IntoIterator<Item = &'t Token<'a>>) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&token.leading);
        // Error text is a message, not source
        if token.kind == TokenKind::ERROR {
            continue;
        }
        out.push_str(&token.text);
    }
    out
}

//! # marklex-syntax
//!
//! A streaming, block-level Markdown scanner. Source text goes in, an ordered
//! stream of typed tokens comes out: paragraphs and their continuation lines,
//! ATX and setext headers, horizontal rules, unordered list items, and the
//! soft and hard line breaks between them.
//!
//! ## Why a Hand-Rolled Scanner?
//!
//! The interesting part of block-level Markdown is ambiguity. The same
//! leading character can open several constructs:
//!
//! ```text
//! "- item"     → LIST_ITEM       (marker, one space)
//! "---"        → HORIZONTAL_RULE (marker repeated, nothing else)
//! "Title\n---" → H2              (underline under a paragraph line)
//! "-dash"      → PARAGRAPH       (none of the above)
//! ```
//!
//! Deciding between them needs trailing context, sometimes a whole line of
//! it, and sometimes a decision about the line *before*. A regex-driven
//! tokenizer can't express that; a small state machine with a cursor that
//! can back up can.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Cursor → Scanner states → Tokens
//!               (spans)  (Block, Paragraph, ...)
//! ```
//!
//! ### 1. Cursor ([`cursor`] module)
//!
//! Holds the source and a position, with advance/peek/back-up/accept
//! primitives. Text between the last emission and the position is the
//! *pending span*; emitting cuts it into a token.
//!
//! ### 2. Scanner ([`scanner`] module)
//!
//! A set of states, each a plain function that consumes one construct and
//! returns the next state. [`Scanner`] drives them lazily as an iterator.
//!
//! ### 3. Threaded stream ([`stream`] module)
//!
//! The same scanner on a worker thread, handing tokens over a rendezvous
//! channel, for consumers that want a producer/consumer split.
//!
//! ## The Lossless Guarantee
//!
//! Delimiters such as `# ` or `- ` are not part of a token's value, but they
//! are not thrown away either: each token carries the markup skipped before
//! it in [`Token::leading`]. Joining `leading` and `text` over a stream that
//! ends in `EOF` gives back the input byte for byte:
//!
//! ```
//! use marklex_syntax::{lex, reconstruct};
//!
//! let input = "# Hello\n\nSome *text*  \nmore\n- item\n";
//! let tokens = lex(input);
//! assert_eq!(reconstruct(&tokens), input);
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use marklex_syntax::{Scanner, TokenKind};
//!
//! let kinds: Vec<_> = Scanner::new("Title\n===\n- item\n").map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [TokenKind::PARAGRAPH, TokenKind::SOFT_BREAK, TokenKind::H1, TokenKind::LIST_ITEM, TokenKind::EOF]
//! );
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! marklex-syntax/
//! ├── lib.rs           # This file - public API
//! ├── cursor.rs        # Source position, pending span, back-up stack
//! ├── token.rs         # TokenKind enum, Token, Display rendering
//! ├── options.rs       # Line ending and header policies
//! ├── error.rs         # ScanError
//! ├── stream.rs        # Worker thread + rendezvous channel
//! └── scanner/
//!     ├── mod.rs       # Scanner struct, State enum, lex() and scan()
//!     ├── block.rs     # Block dispatch
//!     ├── paragraph.rs # Text lines, soft and hard breaks
//!     └── construct.rs # ATX/setext headers, rules, list items
//! ```

pub mod cursor;
pub mod error;
pub mod options;
pub mod scanner;
pub mod stream;
pub mod token;

pub use error::ScanError;
pub use options::{HeadingOverflow, LineEndings, ScanOptions, UnterminatedHeader};
pub use scanner::{Scanner, lex, scan};
pub use token::{Token, TokenKind, reconstruct};

//! Scanner policies for the behaviours markdown sources disagree on.

/// Which byte sequences end a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LineEndings {
    /// `\r\n` or a bare `\n`.
    #[default]
    Any,
    /// Only `\r\n`; a bare `\n` is ordinary text.
    Crlf,
}

impl LineEndings {
    /// Length of the line ending at the start of `rest`, if there is one.
    pub fn match_len(self, rest: &str) -> Option<usize> {
        if rest.starts_with("\r\n") {
            Some(2)
        } else if self == LineEndings::Any && rest.starts_with('\n') {
            Some(1)
        } else {
            None
        }
    }
}

/// What to do with an ATX run of seven or more `#`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HeadingOverflow {
    /// Treat it as a level 6 heading.
    #[default]
    Clamp,
    /// End the scan with an error token.
    Error,
}

/// What to do with a header line that reaches end of input without a line ending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnterminatedHeader {
    #[default]
    Error,
    /// End of input terminates the header like a line ending would.
    Accept,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScanOptions {
    pub line_endings: LineEndings,
    pub heading_overflow: HeadingOverflow,
    pub unterminated_header: UnterminatedHeader,
}

impl ScanOptions {
    /// The behaviour of the original CRLF-only scanner.
    pub fn strict() -> Self {
        Self {
            line_endings: LineEndings::Crlf,
            heading_overflow: HeadingOverflow::Clamp,
            unterminated_header: UnterminatedHeader::Error,
        }
    }

    pub fn with_line_endings(mut self, line_endings: LineEndings) -> Self {
        self.line_endings = line_endings;
        self
    }

    pub fn with_heading_overflow(mut self, heading_overflow: HeadingOverflow) -> Self {
        self.heading_overflow = heading_overflow;
        self
    }

    pub fn with_unterminated_header(mut self, unterminated_header: UnterminatedHeader) -> Self {
        self.unterminated_header = unterminated_header;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LineEndings::Any, "\r\nrest", Some(2))]
    #[case(LineEndings::Any, "\nrest", Some(1))]
    #[case(LineEndings::Any, "\rrest", None)]
    #[case(LineEndings::Crlf, "\r\nrest", Some(2))]
    #[case(LineEndings::Crlf, "\nrest", None)]
    #[case(LineEndings::Crlf, "", None)]
    fn line_ending_lengths(
        #[case] policy: LineEndings,
        #[case] rest: &str,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(policy.match_len(rest), expected);
    }

    #[test]
    fn defaults_accept_lf_and_clamp() {
        let options = ScanOptions::default();
        assert_eq!(options.line_endings, LineEndings::Any);
        assert_eq!(options.heading_overflow, HeadingOverflow::Clamp);
        assert_eq!(options.unterminated_header, UnterminatedHeader::Error);
    }

    #[test]
    fn builder_methods_override_fields() {
        let options = ScanOptions::default()
            .with_line_endings(LineEndings::Crlf)
            .with_heading_overflow(HeadingOverflow::Error)
            .with_unterminated_header(UnterminatedHeader::Accept);
        assert_eq!(options.line_endings, LineEndings::Crlf);
        assert_eq!(options.heading_overflow, HeadingOverflow::Error);
        assert_eq!(options.unterminated_header, UnterminatedHeader::Accept);
    }
}

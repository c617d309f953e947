//! Placeholder tokenization
//!
//! Splits text into literal and `{{expression}}` segments in O(n) using a
//! forward-only state machine.

/// A fragment of scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied verbatim
    Literal(&'a str),
    /// Trimmed text between `{{` and `}}`
    Expression(&'a str),
}

impl Segment<'_> {
    /// Whether this is an expression segment
    pub fn is_expression(&self) -> bool {
        matches!(self, Segment::Expression(_))
    }
}

/// Scanner state
///
/// ```text
/// Normal ──{───> SeenLBrace ──{───> InToken ──}───> SeenRBrace ──}───> [Expression] → Normal
///   │               │                  │                  │
///   │ (not {)       │ (not {)          │ (not })          │ (not })
///   └──────────────>└─────────────────>└─────────────────>└──────────> InToken
///
/// Unterminated {{ at end of input → literal text
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    /// Scanning literal text
    Normal,

    /// Seen a `{` at `pos`
    SeenLBrace { pos: usize },

    /// Inside `{{...}}` opened at `start`
    InToken { start: usize },

    /// Seen a `}` at `rbrace_pos` inside a token opened at `start`
    SeenRBrace { start: usize, rbrace_pos: usize },
}

/// Lazy iterator over the segments of a string
///
/// Restartable: scanning the same text again yields identical segments.
pub struct Segments<'a> {
    text: &'a str,
    bytes: &'a [u8],
    /// Current byte position
    pos: usize,
    /// Start of the literal run not yet emitted
    literal_start: usize,
    state: ScanState,
    /// Expression found while a literal run was still pending
    pending: Option<Segment<'a>>,
}

/// Scans `text` for `{{...}}` regions
pub fn tokenize(text: &str) -> Segments<'_> {
    Segments::new(text)
}

impl<'a> Segments<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            literal_start: 0,
            state: ScanState::Normal,
            pending: None,
        }
    }

    /// Number of expression segments in `text`
    pub fn count_expressions(text: &str) -> usize {
        Segments::new(text).filter(Segment::is_expression).count()
    }

    /// Advances the state machine by one byte. Returns the byte range of a
    /// completed `{{...}}` token, including the braces.
    fn step(&mut self, byte: u8) -> Option<(usize, usize)> {
        match self.state {
            ScanState::Normal => {
                if byte == b'{' {
                    self.state = ScanState::SeenLBrace { pos: self.pos };
                }
                self.pos += 1;
                None
            }
            ScanState::SeenLBrace { pos } => {
                if byte == b'{' {
                    self.state = ScanState::InToken { start: pos };
                    self.pos += 1;
                } else {
                    // Reprocess this byte as literal text
                    self.state = ScanState::Normal;
                }
                None
            }
            ScanState::InToken { start } => {
                if byte == b'}' {
                    self.state = ScanState::SeenRBrace {
                        start,
                        rbrace_pos: self.pos,
                    };
                }
                self.pos += 1;
                None
            }
            ScanState::SeenRBrace { start, rbrace_pos } => {
                if byte == b'}' {
                    self.state = ScanState::Normal;
                    self.pos += 1;
                    Some((start, rbrace_pos + 2))
                } else {
                    // Lone } inside the expression; reprocess in InToken
                    self.state = ScanState::InToken { start };
                    None
                }
            }
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if let Some(segment) = self.pending.take() {
            return Some(segment);
        }

        while self.pos < self.bytes.len() {
            let byte = self.bytes[self.pos];
            let Some((start, end)) = self.step(byte) else {
                continue;
            };

            // Braces are ASCII, so these offsets are char boundaries
            let expression = Segment::Expression(self.text[start + 2..end - 2].trim());
            let literal = &self.text[self.literal_start..start];
            self.literal_start = end;

            if literal.is_empty() {
                return Some(expression);
            }
            self.pending = Some(expression);
            return Some(Segment::Literal(literal));
        }

        // End of input: the rest, including any unterminated `{{`, is literal
        if self.literal_start < self.bytes.len() {
            let literal = &self.text[self.literal_start..];
            self.literal_start = self.bytes.len();
            self.state = ScanState::Normal;
            return Some(Segment::Literal(literal));
        }
        None
    }
}

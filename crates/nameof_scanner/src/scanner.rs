//! The TypeScript scanner.
//!
//! Converts source text into tokens on demand. Positions are byte offsets
//! into the source so node ranges can slice the original text directly.

use crate::char_codes::*;
use nameof_ast::syntax_kind::SyntaxKind;
use nameof_ast::types::TokenFlags;
use nameof_core::TextSpan;
use nameof_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};

/// Saved scanner state for lookahead and speculative parsing.
#[derive(Debug, Clone)]
pub struct ScannerState {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_number: f64,
    token_flags: TokenFlags,
    raw_range: (usize, usize),
    diagnostic_count: usize,
}

/// The scanner converts TypeScript source text into tokens.
pub struct Scanner<'a> {
    /// The source text being scanned.
    text: &'a str,
    bytes: &'a [u8],
    /// Current position in the text.
    pos: usize,
    /// Start of the current token including leading trivia.
    full_start: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    /// The current token kind.
    token: SyntaxKind,
    /// Cooked value of the current identifier, string, or template token;
    /// source spelling for numbers and regular expressions.
    token_value: String,
    /// Numeric value of the current numeric literal.
    token_number: f64,
    /// Token flags for the current token.
    token_flags: TokenFlags,
    /// Raw text bounds of the current template token.
    raw_range: (usize, usize),
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source text.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_number: 0.0,
            token_flags: TokenFlags::NONE,
            raw_range: (0, 0),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Skip a shebang line at the very beginning of the file.
    /// Call this before the first `scan()` call.
    pub fn skip_shebang(&mut self) {
        if self.pos == 0 && self.bytes.starts_with(b"#!") {
            self.pos = memchr::memchr2(b'\n', b'\r', self.bytes).unwrap_or(self.bytes.len());
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Look ahead: save state, call f, restore state and return the result.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let result = f(self);
        self.restore_state(state);
        result
    }

    /// Try scanning: save state, call f, restore the state if f returns None.
    pub fn try_scan<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let state = self.save_state();
        let result = f(self);
        if result.is_none() {
            self.restore_state(state);
        }
        result
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    #[inline]
    pub fn token_number(&self) -> f64 {
        self.token_number
    }

    /// Start position of the current token (after trivia).
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Start position of the current token including leading trivia.
    #[inline]
    pub fn full_start(&self) -> usize {
        self.full_start
    }

    /// End of the current token.
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// Source text of the current token.
    pub fn token_text(&self) -> &'a str {
        &self.text[self.token_start..self.pos]
    }

    /// Raw text between the delimiters of the current template token.
    pub fn token_raw_text(&self) -> &'a str {
        &self.text[self.raw_range.0..self.raw_range.1]
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_number: self.token_number,
            token_flags: self.token_flags,
            raw_range: self.raw_range,
            diagnostic_count: self.diagnostics.len(),
        }
    }

    /// Restore a saved state, discarding diagnostics reported since.
    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.full_start = state.full_start;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.token_number = state.token_number;
        self.token_flags = state.token_flags;
        self.raw_range = state.raw_range;
        self.diagnostics.truncate(state.diagnostic_count);
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn error(&mut self, message: &DiagnosticMessage, start: usize, end: usize) {
        let span = TextSpan::from_bounds(start as u32, end as u32);
        self.diagnostics.add(Diagnostic {
            span: Some(span),
            ..Diagnostic::new(message, &[])
        });
    }

    /// Skip whitespace and comments, setting the line break flag.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.byte_at(0) {
            match ch {
                b'\r' | b'\n' => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                }
                b' ' | b'\t' | 0x0B | 0x0C => self.pos += 1,
                b'/' if self.byte_at(1) == Some(b'/') => {
                    let rest = &self.bytes[self.pos..];
                    self.pos += memchr::memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
                }
                b'/' if self.byte_at(1) == Some(b'*') => {
                    let start = self.pos;
                    let body = &self.bytes[self.pos + 2..];
                    let (len, terminated) = match memchr::memmem::find(body, b"*/") {
                        Some(idx) => (idx, true),
                        None => (body.len(), false),
                    };
                    if memchr::memchr2(b'\n', b'\r', &body[..len]).is_some() {
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    }
                    self.pos += 2 + len;
                    if terminated {
                        self.pos += 2;
                    } else {
                        self.error(&messages::ASTERISK_SLASH_EXPECTED, start, self.pos);
                    }
                }
                _ if ch < 0x80 => return,
                _ => match self.current_char() {
                    Some(c) if is_line_break(c) => {
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                        self.pos += c.len_utf8();
                    }
                    Some(c) if is_white_space_single_line(c) => self.pos += c.len_utf8(),
                    _ => return,
                },
            }
        }
    }

    #[inline]
    fn advance(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();

        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.byte_at(0) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        use SyntaxKind::*;
        let next = self.byte_at(1);
        let after = self.byte_at(2);
        self.token = match ch {
            b'(' => self.advance(1, OpenParenToken),
            b')' => self.advance(1, CloseParenToken),
            b'{' => self.advance(1, OpenBraceToken),
            b'}' => self.advance(1, CloseBraceToken),
            b'[' => self.advance(1, OpenBracketToken),
            b']' => self.advance(1, CloseBracketToken),
            b';' => self.advance(1, SemicolonToken),
            b',' => self.advance(1, CommaToken),
            b'~' => self.advance(1, TildeToken),
            b'@' => self.advance(1, AtToken),
            b':' => self.advance(1, ColonToken),
            b'.' => match (next, after) {
                (Some(b'.'), Some(b'.')) => self.advance(3, DotDotDotToken),
                (Some(d), _) if is_digit(d) => self.scan_number(),
                _ => self.advance(1, DotToken),
            },
            b'?' => match (next, after) {
                (Some(b'.'), Some(d)) if is_digit(d) => self.advance(1, QuestionToken),
                (Some(b'.'), _) => self.advance(2, QuestionDotToken),
                (Some(b'?'), Some(b'=')) => self.advance(3, QuestionQuestionEqualsToken),
                (Some(b'?'), _) => self.advance(2, QuestionQuestionToken),
                _ => self.advance(1, QuestionToken),
            },
            b'<' => match (next, after) {
                (Some(b'<'), Some(b'=')) => self.advance(3, LessThanLessThanEqualsToken),
                (Some(b'<'), _) => self.advance(2, LessThanLessThanToken),
                (Some(b'='), _) => self.advance(2, LessThanEqualsToken),
                _ => self.advance(1, LessThanToken),
            },
            // Compound `>` tokens are produced on request by the parser.
            b'>' => self.advance(1, GreaterThanToken),
            b'=' => match (next, after) {
                (Some(b'='), Some(b'=')) => self.advance(3, EqualsEqualsEqualsToken),
                (Some(b'='), _) => self.advance(2, EqualsEqualsToken),
                (Some(b'>'), _) => self.advance(2, EqualsGreaterThanToken),
                _ => self.advance(1, EqualsToken),
            },
            b'!' => match (next, after) {
                (Some(b'='), Some(b'=')) => self.advance(3, ExclamationEqualsEqualsToken),
                (Some(b'='), _) => self.advance(2, ExclamationEqualsToken),
                _ => self.advance(1, ExclamationToken),
            },
            b'+' => match next {
                Some(b'+') => self.advance(2, PlusPlusToken),
                Some(b'=') => self.advance(2, PlusEqualsToken),
                _ => self.advance(1, PlusToken),
            },
            b'-' => match next {
                Some(b'-') => self.advance(2, MinusMinusToken),
                Some(b'=') => self.advance(2, MinusEqualsToken),
                _ => self.advance(1, MinusToken),
            },
            b'*' => match (next, after) {
                (Some(b'*'), Some(b'=')) => self.advance(3, AsteriskAsteriskEqualsToken),
                (Some(b'*'), _) => self.advance(2, AsteriskAsteriskToken),
                (Some(b'='), _) => self.advance(2, AsteriskEqualsToken),
                _ => self.advance(1, AsteriskToken),
            },
            b'/' => match next {
                Some(b'=') => self.advance(2, SlashEqualsToken),
                _ => self.advance(1, SlashToken),
            },
            b'%' => match next {
                Some(b'=') => self.advance(2, PercentEqualsToken),
                _ => self.advance(1, PercentToken),
            },
            b'&' => match (next, after) {
                (Some(b'&'), Some(b'=')) => self.advance(3, AmpersandAmpersandEqualsToken),
                (Some(b'&'), _) => self.advance(2, AmpersandAmpersandToken),
                (Some(b'='), _) => self.advance(2, AmpersandEqualsToken),
                _ => self.advance(1, AmpersandToken),
            },
            b'|' => match (next, after) {
                (Some(b'|'), Some(b'=')) => self.advance(3, BarBarEqualsToken),
                (Some(b'|'), _) => self.advance(2, BarBarToken),
                (Some(b'='), _) => self.advance(2, BarEqualsToken),
                _ => self.advance(1, BarToken),
            },
            b'^' => match next {
                Some(b'=') => self.advance(2, CaretEqualsToken),
                _ => self.advance(1, CaretToken),
            },
            b'\'' | b'"' => self.scan_string_literal(ch),
            b'`' => {
                self.pos += 1;
                self.scan_template(true)
            }
            b'0'..=b'9' => self.scan_number(),
            b'#' => {
                self.pos += 1;
                match self.current_char() {
                    Some(c) if is_identifier_start(c) => {
                        self.scan_identifier_rest();
                        self.token_value = self.token_text().to_string();
                        PrivateIdentifier
                    }
                    _ => {
                        self.error(&messages::INVALID_CHARACTER, self.token_start, self.pos);
                        Unknown
                    }
                }
            }
            _ => match self.current_char() {
                Some(c) if is_identifier_start(c) => self.scan_identifier(),
                Some(c) => {
                    self.pos += c.len_utf8();
                    self.error(&messages::INVALID_CHARACTER, self.token_start, self.pos);
                    Unknown
                }
                None => {
                    self.pos += 1;
                    Unknown
                }
            },
        };

        self.token
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    fn scan_identifier(&mut self) -> SyntaxKind {
        self.scan_identifier_rest();
        let text = self.token_text();
        self.token_value.push_str(text);
        SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::Identifier)
    }

    /// Consume identifier characters starting at the current position.
    fn scan_identifier_rest(&mut self) {
        while let Some(ch) = self.byte_at(0) {
            if ch < 0x80 {
                if !is_identifier_part(ch as char) {
                    break;
                }
                self.pos += 1;
            } else {
                match self.current_char() {
                    Some(c) if is_identifier_part(c) => self.pos += c.len_utf8(),
                    _ => break,
                }
            }
        }
    }

    // ========================================================================
    // Strings and templates
    // ========================================================================

    fn scan_string_literal(&mut self, quote: u8) -> SyntaxKind {
        if quote == b'\'' {
            self.token_flags |= TokenFlags::SINGLE_QUOTE;
        }
        self.pos += 1;
        let mut result = String::new();
        let mut chunk_start = self.pos;
        loop {
            let Some(ch) = self.byte_at(0) else {
                result.push_str(&self.text[chunk_start..self.pos]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_STRING_LITERAL, self.token_start, self.pos);
                break;
            };
            if ch == quote {
                result.push_str(&self.text[chunk_start..self.pos]);
                self.pos += 1;
                break;
            }
            if ch == b'\\' {
                result.push_str(&self.text[chunk_start..self.pos]);
                self.scan_escape_sequence(&mut result);
                chunk_start = self.pos;
                continue;
            }
            if ch == b'\n' || ch == b'\r' {
                result.push_str(&self.text[chunk_start..self.pos]);
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_STRING_LITERAL, self.token_start, self.pos);
                break;
            }
            self.pos += 1;
        }
        self.token_value = result;
        SyntaxKind::StringLiteral
    }

    /// Scan template text after a backtick (`starts_template`) or after the
    /// `}` closing a substitution.
    fn scan_template(&mut self, starts_template: bool) -> SyntaxKind {
        let raw_start = self.pos;
        let mut result = String::new();
        let mut chunk_start = self.pos;
        let kind = loop {
            let Some(ch) = self.byte_at(0) else {
                result.push_str(&self.text[chunk_start..self.pos]);
                self.raw_range = (raw_start, self.pos);
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_TEMPLATE_LITERAL, self.token_start, self.pos);
                break if starts_template {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
            };
            match ch {
                b'`' => {
                    result.push_str(&self.text[chunk_start..self.pos]);
                    self.raw_range = (raw_start, self.pos);
                    self.pos += 1;
                    break if starts_template {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                b'$' if self.byte_at(1) == Some(b'{') => {
                    result.push_str(&self.text[chunk_start..self.pos]);
                    self.raw_range = (raw_start, self.pos);
                    self.pos += 2;
                    break if starts_template {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                b'\\' => {
                    result.push_str(&self.text[chunk_start..self.pos]);
                    self.scan_escape_sequence(&mut result);
                    chunk_start = self.pos;
                }
                b'\r' => {
                    // Template values normalize CRLF and CR to LF.
                    result.push_str(&self.text[chunk_start..self.pos]);
                    result.push('\n');
                    self.pos += 1;
                    if self.byte_at(0) == Some(b'\n') {
                        self.pos += 1;
                    }
                    chunk_start = self.pos;
                }
                _ => self.pos += 1,
            }
        };
        self.token_value = result;
        kind
    }

    /// Decode the escape sequence at the current backslash into `out`.
    fn scan_escape_sequence(&mut self, out: &mut String) {
        let start = self.pos;
        self.pos += 1;
        let Some(ch) = self.byte_at(0) else {
            return;
        };
        self.pos += 1;
        match ch {
            b'0' if !self.byte_at(0).is_some_and(is_digit) => out.push('\0'),
            b'b' => out.push('\u{0008}'),
            b't' => out.push('\t'),
            b'n' => out.push('\n'),
            b'v' => out.push('\u{000B}'),
            b'f' => out.push('\u{000C}'),
            b'r' => out.push('\r'),
            b'\'' => out.push('\''),
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'\r' => {
                if self.byte_at(0) == Some(b'\n') {
                    self.pos += 1;
                }
            }
            b'\n' => {}
            b'x' => match self.scan_hex_value(2, 2) {
                Some(c) => out.push(c),
                None => self.invalid_escape(out, start),
            },
            b'u' => {
                let decoded = if self.byte_at(0) == Some(b'{') {
                    self.pos += 1;
                    let value = self.scan_hex_value(1, 6);
                    if value.is_some() && self.byte_at(0) == Some(b'}') {
                        self.pos += 1;
                        value
                    } else {
                        None
                    }
                } else {
                    self.scan_hex_value(4, 4)
                };
                match decoded {
                    Some(c) => out.push(c),
                    None => self.invalid_escape(out, start),
                }
            }
            _ if ch < 0x80 => out.push(ch as char),
            _ => {
                // Non-ASCII escaped character: take the whole code point.
                self.pos -= 1;
                if let Some(c) = self.current_char() {
                    self.pos += c.len_utf8();
                    if c != LINE_SEPARATOR && c != PARAGRAPH_SEPARATOR {
                        out.push(c);
                    }
                }
            }
        }
    }

    fn scan_hex_value(&mut self, min_digits: usize, max_digits: usize) -> Option<char> {
        let mut value: u32 = 0;
        let mut digits = 0;
        while digits < max_digits {
            match self.byte_at(0).and_then(|b| digit_value(b, 16)) {
                Some(d) => {
                    value = value * 16 + d;
                    digits += 1;
                    self.pos += 1;
                }
                None => break,
            }
        }
        if digits < min_digits {
            return None;
        }
        char::from_u32(value)
    }

    fn invalid_escape(&mut self, out: &mut String, start: usize) {
        self.token_flags |= TokenFlags::CONTAINS_INVALID_ESCAPE;
        self.error(&messages::HEXADECIMAL_DIGIT_EXPECTED, start, self.pos);
        out.push_str(&self.text[start..self.pos]);
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        if self.byte_at(0) == Some(b'0') {
            let radix = match self.byte_at(1) {
                Some(b'x' | b'X') => Some((16, TokenFlags::HEX_SPECIFIER)),
                Some(b'b' | b'B') => Some((2, TokenFlags::BINARY_SPECIFIER)),
                Some(b'o' | b'O') => Some((8, TokenFlags::OCTAL_SPECIFIER)),
                _ => None,
            };
            if let Some((radix, flag)) = radix {
                return self.scan_radix_number(start, radix, flag);
            }
        }

        self.scan_digits();
        if self.byte_at(0) == Some(b'.') {
            self.pos += 1;
            self.scan_digits();
        }
        if let Some(b'e' | b'E') = self.byte_at(0) {
            self.pos += 1;
            self.token_flags |= TokenFlags::SCIENTIFIC;
            if let Some(b'+' | b'-') = self.byte_at(0) {
                self.pos += 1;
            }
            if !self.scan_digits() {
                self.error(&messages::DIGIT_EXPECTED, self.pos, self.pos);
            }
        }

        let spelled = &self.text[start..self.pos];
        let normalized: String = spelled.chars().filter(|&c| c != '_').collect();
        self.token_number = normalized.parse::<f64>().unwrap_or(f64::NAN);
        self.finish_number()
    }

    fn scan_radix_number(&mut self, start: usize, radix: u32, flag: TokenFlags) -> SyntaxKind {
        self.pos += 2;
        self.token_flags |= flag;
        let mut value = 0f64;
        let mut digits = 0;
        while let Some(b) = self.byte_at(0) {
            if b == b'_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
            } else if let Some(d) = digit_value(b, radix) {
                value = value * radix as f64 + d as f64;
                digits += 1;
            } else {
                break;
            }
            self.pos += 1;
        }
        if digits == 0 {
            let message = if radix == 16 {
                &messages::HEXADECIMAL_DIGIT_EXPECTED
            } else {
                &messages::DIGIT_EXPECTED
            };
            self.error(message, start, self.pos);
        }
        self.token_number = value;
        self.finish_number()
    }

    /// Consume decimal digits and separators; true if any digit was seen.
    fn scan_digits(&mut self) -> bool {
        let mut any = false;
        while let Some(b) = self.byte_at(0) {
            if is_digit(b) {
                any = true;
            } else if b == b'_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
            } else {
                break;
            }
            self.pos += 1;
        }
        any
    }

    fn finish_number(&mut self) -> SyntaxKind {
        let kind = if self.byte_at(0) == Some(b'n') {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.token_value = self.token_text().to_string();
        kind
    }

    // ========================================================================
    // Rescanning
    // ========================================================================

    /// Rescan `>` as `>=`, `>>`, `>>=`, `>>>`, or `>>>=`.
    pub fn rescan_greater_than_token(&mut self) -> SyntaxKind {
        use SyntaxKind::*;
        if self.token == GreaterThanToken {
            self.token = match (self.byte_at(0), self.byte_at(1), self.byte_at(2)) {
                (Some(b'>'), Some(b'>'), Some(b'=')) => self.advance(3, GreaterThanGreaterThanGreaterThanEqualsToken),
                (Some(b'>'), Some(b'>'), _) => self.advance(2, GreaterThanGreaterThanGreaterThanToken),
                (Some(b'>'), Some(b'='), _) => self.advance(2, GreaterThanGreaterThanEqualsToken),
                (Some(b'>'), _, _) => self.advance(1, GreaterThanGreaterThanToken),
                (Some(b'='), _, _) => self.advance(1, GreaterThanEqualsToken),
                _ => GreaterThanToken,
            };
        }
        self.token
    }

    /// Rescan the current `/` or `/=` token as a regular expression literal.
    pub fn rescan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            return self.token;
        }
        self.pos = self.token_start + 1;
        let mut in_character_class = false;
        loop {
            let Some(ch) = self.byte_at(0) else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL, self.token_start, self.pos);
                break;
            };
            match ch {
                b'\n' | b'\r' => {
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    self.error(&messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL, self.token_start, self.pos);
                    break;
                }
                b'\\' => {
                    self.pos += 1;
                    if let Some(c) = self.current_char() {
                        if !is_line_break(c) {
                            self.pos += c.len_utf8();
                        }
                    }
                    continue;
                }
                b'[' => in_character_class = true,
                b']' => in_character_class = false,
                b'/' if !in_character_class => {
                    self.pos += 1;
                    self.scan_identifier_rest();
                    break;
                }
                _ => {}
            }
            self.pos += 1;
        }
        self.token_value = self.token_text().to_string();
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    /// Rescan the current `}` as a template middle or tail.
    pub fn rescan_template_token(&mut self) -> SyntaxKind {
        if self.token == SyntaxKind::CloseBraceToken {
            self.pos = self.token_start + 1;
            self.token = self.scan_template(false);
        }
        self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: scan all tokens until EOF.
    fn scan_all(text: &str) -> Vec<SyntaxKind> {
        let mut scanner = Scanner::new(text);
        let mut tokens = Vec::new();
        loop {
            let kind = scanner.scan();
            if kind == SyntaxKind::EndOfFileToken {
                break;
            }
            tokens.push(kind);
        }
        tokens
    }

    #[test]
    fn test_scan_simple_tokens() {
        assert_eq!(
            scan_all("( ) { } [ ] ; , : @"),
            vec![
                SyntaxKind::OpenParenToken,
                SyntaxKind::CloseParenToken,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::OpenBracketToken,
                SyntaxKind::CloseBracketToken,
                SyntaxKind::SemicolonToken,
                SyntaxKind::CommaToken,
                SyntaxKind::ColonToken,
                SyntaxKind::AtToken,
            ]
        );
    }

    #[test]
    fn test_scan_operators() {
        assert_eq!(
            scan_all("=== !== => ?. ?? ??= ** &&= ..."),
            vec![
                SyntaxKind::EqualsEqualsEqualsToken,
                SyntaxKind::ExclamationEqualsEqualsToken,
                SyntaxKind::EqualsGreaterThanToken,
                SyntaxKind::QuestionDotToken,
                SyntaxKind::QuestionQuestionToken,
                SyntaxKind::QuestionQuestionEqualsToken,
                SyntaxKind::AsteriskAsteriskToken,
                SyntaxKind::AmpersandAmpersandEqualsToken,
                SyntaxKind::DotDotDotToken,
            ]
        );
    }

    #[test]
    fn test_question_dot_before_digit_is_conditional() {
        assert_eq!(
            scan_all("a?.5:1"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::QuestionToken,
                SyntaxKind::NumericLiteral,
                SyntaxKind::ColonToken,
                SyntaxKind::NumericLiteral,
            ]
        );
    }

    #[test]
    fn test_scan_identifier_and_keyword() {
        let mut scanner = Scanner::new("nameof typeof ünïcode");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "nameof");
        assert_eq!(scanner.scan(), SyntaxKind::TypeOfKeyword);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "ünïcode");
        assert_eq!(scanner.token_end(), "nameof typeof ünïcode".len());
    }

    #[test]
    fn test_scan_string_literal_cooks_escapes() {
        let mut scanner = Scanner::new(r#"'it\'s' "a\nbA\x42\u{1F600}""#);
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "it's");
        assert!(scanner.token_flags().contains(TokenFlags::SINGLE_QUOTE));
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "a\nbAB\u{1F600}");
        assert!(scanner.diagnostics().is_empty());
    }

    #[test]
    fn test_unterminated_string_reports() {
        let mut scanner = Scanner::new("\"abc\nx");
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::UNTERMINATED));
        assert_eq!(scanner.diagnostics().len(), 1);
        assert_eq!(scanner.diagnostics().diagnostics()[0].code, 1002);
    }

    #[test]
    fn test_scan_template_pieces() {
        let mut scanner = Scanner::new("`a${x}b\\n${y}c`");
        assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
        assert_eq!(scanner.token_value(), "a");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.rescan_template_token(), SyntaxKind::TemplateMiddle);
        assert_eq!(scanner.token_value(), "b\n");
        assert_eq!(scanner.token_raw_text(), "b\\n");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.rescan_template_token(), SyntaxKind::TemplateTail);
        assert_eq!(scanner.token_value(), "c");
    }

    #[test]
    fn test_scan_no_substitution_template() {
        let mut scanner = Scanner::new("`plain`");
        assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
        assert_eq!(scanner.token_value(), "plain");
    }

    #[test]
    fn test_scan_number_formats() {
        let cases = [
            ("42", 42.0),
            ("3.5", 3.5),
            (".5", 0.5),
            ("1e3", 1000.0),
            ("0x1F", 31.0),
            ("0b101", 5.0),
            ("0o17", 15.0),
            ("1_000", 1000.0),
        ];
        for (text, expected) in cases {
            let mut scanner = Scanner::new(text);
            assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral, "{}", text);
            assert_eq!(scanner.token_number(), expected, "{}", text);
            assert_eq!(scanner.token_value(), text);
        }
    }

    #[test]
    fn test_scan_bigint() {
        let mut scanner = Scanner::new("123n");
        assert_eq!(scanner.scan(), SyntaxKind::BigIntLiteral);
        assert_eq!(scanner.token_value(), "123n");
    }

    #[test]
    fn test_scan_comments_and_line_breaks() {
        let mut scanner = Scanner::new("a // comment\n/* multi\nline */ b");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert!(!scanner.has_preceding_line_break());
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert!(scanner.has_preceding_line_break());
        assert_eq!(scanner.token_value(), "b");
    }

    #[test]
    fn test_unterminated_block_comment() {
        let mut scanner = Scanner::new("/* open");
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
        assert_eq!(scanner.diagnostics().diagnostics()[0].code, 1010);
    }

    #[test]
    fn test_rescan_greater_than() {
        let mut scanner = Scanner::new(">>>= x");
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
        assert_eq!(
            scanner.rescan_greater_than_token(),
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
        );
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    }

    #[test]
    fn test_rescan_regex() {
        let mut scanner = Scanner::new("/a[/]b\\//gi.test");
        assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
        assert_eq!(scanner.rescan_slash_token(), SyntaxKind::RegularExpressionLiteral);
        assert_eq!(scanner.token_value(), "/a[/]b\\//gi");
        assert_eq!(scanner.scan(), SyntaxKind::DotToken);
    }

    #[test]
    fn test_private_identifier() {
        let mut scanner = Scanner::new("#secret");
        assert_eq!(scanner.scan(), SyntaxKind::PrivateIdentifier);
        assert_eq!(scanner.token_value(), "#secret");
    }

    #[test]
    fn test_shebang() {
        let mut scanner = Scanner::new("#!/usr/bin/env node\nx");
        scanner.skip_shebang();
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "x");
    }

    #[test]
    fn test_try_scan_restores_state() {
        let mut scanner = Scanner::new("a b");
        scanner.scan();
        let result: Option<()> = scanner.try_scan(|s| {
            s.scan();
            None
        });
        assert!(result.is_none());
        assert_eq!(scanner.token_value(), "a");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "b");
    }
}

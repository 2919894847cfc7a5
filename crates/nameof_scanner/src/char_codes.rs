//! Character classification used by the scanner.

use unicode_xid::UnicodeXID;

pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';
pub const NON_BREAKING_SPACE: char = '\u{00A0}';

#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR)
}

/// Whitespace that does not end a line.
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    match ch {
        ' ' | '\t' | '\u{000B}' | '\u{000C}' | NON_BREAKING_SPACE | BYTE_ORDER_MARK => true,
        _ if (ch as u32) < 0x80 => false,
        _ => !is_line_break(ch) && ch.is_whitespace(),
    }
}

#[inline]
pub fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn digit_value(ch: u8, radix: u32) -> Option<u32> {
    (ch as char).to_digit(radix)
}

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphabetic() || ch == '$' || ch == '_'
    } else {
        UnicodeXID::is_xid_start(ch)
    }
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphanumeric() || ch == '$' || ch == '_'
    } else {
        UnicodeXID::is_xid_continue(ch) || ch == '\u{200C}' || ch == '\u{200D}'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_classes() {
        assert!(is_identifier_start('$'));
        assert!(is_identifier_start('é'));
        assert!(!is_identifier_start('1'));
        assert!(is_identifier_part('1'));
        assert!(!is_identifier_part('-'));
    }

    #[test]
    fn test_whitespace_classes() {
        assert!(is_white_space_single_line('\t'));
        assert!(is_white_space_single_line(NON_BREAKING_SPACE));
        assert!(!is_white_space_single_line('\n'));
        assert!(is_line_break(LINE_SEPARATOR));
    }
}

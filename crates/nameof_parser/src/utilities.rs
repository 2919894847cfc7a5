//! Parser utility functions.

use nameof_ast::syntax_kind::SyntaxKind;

/// Check if a token kind can start an expression.
pub fn is_start_of_expression(kind: SyntaxKind) -> bool {
    is_start_of_left_hand_side_expression(kind)
        || matches!(
            kind,
            SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::TildeToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::DeleteKeyword
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::AwaitKeyword
                | SyntaxKind::YieldKeyword
                | SyntaxKind::PrivateIdentifier
                | SyntaxKind::AtToken
        )
        || (kind.is_keyword() && !kind.is_reserved_word())
}

/// Check if a token kind is a left-hand-side expression start.
pub fn is_start_of_left_hand_side_expression(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::SlashToken
            | SyntaxKind::SlashEqualsToken
            | SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::ImportKeyword
    )
}

/// Tokens at which statement-level error recovery stops skipping.
pub fn is_statement_recovery_point(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::IfKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::ExportKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::SemicolonToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::EndOfFileToken
    )
}

/// Whether a file name denotes a JavaScript (not TypeScript) source.
pub fn is_javascript_file(file_name: &str) -> bool {
    [".js", ".jsx", ".mjs", ".cjs"]
        .iter()
        .any(|ext| file_name.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_starts() {
        assert!(is_start_of_expression(SyntaxKind::Identifier));
        assert!(is_start_of_expression(SyntaxKind::TypeKeyword));
        assert!(is_start_of_expression(SyntaxKind::TemplateHead));
        assert!(!is_start_of_expression(SyntaxKind::CloseParenToken));
        assert!(!is_start_of_expression(SyntaxKind::SemicolonToken));
    }

    #[test]
    fn test_javascript_detection() {
        assert!(is_javascript_file("src/a.js"));
        assert!(is_javascript_file("b.mjs"));
        assert!(!is_javascript_file("c.ts"));
    }
}

//! Keyword resolution for identifier lexemes.
//!
//! Two tables:
//! 1. **Reserved words**: length-bucketed lookup, always keywords.
//! 2. **Restricted words**: `module`, `open` and the module directives. These
//!    are identifiers unless the context tracker says otherwise, so they are
//!    only *recognised* here; the classifier decides from the frame stack.

use crate::token::TokenKind;

/// Look up a reserved word by text.
///
/// Returns the token kind for the word's highlighting class, or `None` for a
/// plain identifier. Restricted words (`module`, `requires`, `record`, ...)
/// are never returned here.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    let bytes = text.as_bytes();
    let len = bytes.len();

    // All reserved words are 1-12 bytes and start with `_` or a lowercase letter.
    if !(1..=12).contains(&len) {
        return None;
    }
    if !(bytes[0].is_ascii_lowercase() || bytes[0] == b'_') {
        return None;
    }

    match len {
        1 => match text {
            "_" => Some(TokenKind::Keyword),
            _ => None,
        },
        2 => match text {
            "do" | "if" => Some(TokenKind::KeywordControl),
            _ => None,
        },
        3 => match text {
            "for" | "try" => Some(TokenKind::KeywordControl),
            "new" => Some(TokenKind::KeywordNew),
            "int" => Some(TokenKind::Keyword),
            _ => None,
        },
        4 => match text {
            "case" | "else" => Some(TokenKind::KeywordControl),
            "this" => Some(TokenKind::KeywordThis),
            "true" => Some(TokenKind::BooleanLiteral),
            "null" => Some(TokenKind::NullLiteral),
            "byte" | "char" | "enum" | "goto" | "long" | "void" => Some(TokenKind::Keyword),
            _ => None,
        },
        5 => match text {
            "break" | "catch" | "throw" | "while" => Some(TokenKind::KeywordControl),
            "super" => Some(TokenKind::KeywordThis),
            "false" => Some(TokenKind::BooleanLiteral),
            "class" | "const" | "final" | "float" | "short" => Some(TokenKind::Keyword),
            _ => None,
        },
        6 => match text {
            "assert" | "switch" => Some(TokenKind::KeywordControl),
            "return" => Some(TokenKind::KeywordReturn),
            "double" | "import" | "native" | "public" | "static" | "throws" => {
                Some(TokenKind::Keyword)
            }
            _ => None,
        },
        7 => match text {
            "default" | "finally" => Some(TokenKind::KeywordControl),
            "boolean" | "extends" | "package" | "private" => Some(TokenKind::Keyword),
            _ => None,
        },
        8 => match text {
            "continue" => Some(TokenKind::KeywordControl),
            "abstract" | "strictfp" | "volatile" => Some(TokenKind::Keyword),
            _ => None,
        },
        9 => match text {
            "interface" | "protected" | "transient" => Some(TokenKind::Keyword),
            _ => None,
        },
        10 => match text {
            "implements" | "instanceof" => Some(TokenKind::Keyword),
            _ => None,
        },
        12 => match text {
            "synchronized" => Some(TokenKind::Keyword),
            _ => None,
        },
        _ => None,
    }
}

/// Module directive words, keywords only inside a module body.
pub(crate) fn is_module_directive(text: &str) -> bool {
    matches!(
        text,
        "requires" | "exports" | "opens" | "uses" | "provides" | "transitive" | "to" | "with"
    )
}

/// Primitive type names, allowed inside type arguments (`List<int[]>`).
pub(crate) fn is_primitive_type(text: &str) -> bool {
    matches!(
        text,
        "boolean" | "byte" | "char" | "short" | "int" | "long" | "float" | "double"
    )
}

/// Modifiers that may precede a generic method's type parameters
/// (`public static <T> T id(T t)`).
pub(crate) fn is_declaration_modifier(text: &str) -> bool {
    matches!(
        text,
        "public"
            | "protected"
            | "private"
            | "static"
            | "final"
            | "abstract"
            | "synchronized"
            | "native"
            | "strictfp"
            | "default"
    )
}

/// Which body a type declaration keyword opens, if any.
///
/// `record` is not reserved, so the classifier checks it separately.
pub(crate) fn type_declaration_body(text: &str) -> Option<DeclarationBody> {
    match text {
        "class" | "record" => Some(DeclarationBody::Class),
        "interface" => Some(DeclarationBody::Interface),
        "enum" => Some(DeclarationBody::Enum),
        _ => None,
    }
}

/// Body kind a declaration header opens.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum DeclarationBody {
    Class,
    Interface,
    Enum,
}

#[cfg(test)]
mod tests;

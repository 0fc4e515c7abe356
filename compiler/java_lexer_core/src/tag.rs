//! Raw lexeme tags produced by the scanner.
//!
//! Discriminants are grouped into semantic ranges so range checks stay
//! cheap:
//!
//! | Range   | Group                  |
//! |---------|------------------------|
//! | 0-15    | identifiers, literals  |
//! | 32-79   | operators              |
//! | 80-111  | delimiters             |
//! | 112-127 | trivia                 |
//! | 240-254 | errors                 |
//! | 255     | end of input           |

/// Coarse lexical tag for one raw lexeme.
///
/// Keywords are not distinguished here: every word is `Ident`, and
/// `java_lexer` decides what it means in context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RawTag {
    // === Identifiers & Literals (0-15) ===
    Ident = 0,
    /// Decimal integer, with optional `l`/`L` suffix.
    Int = 1,
    /// `0x` integer.
    HexInt = 2,
    /// Integer with a leading `0` and more digits.
    OctInt = 3,
    /// `0b` integer.
    BinInt = 4,
    Float = 5,
    Char = 6,
    String = 7,
    /// `"""` … `"""`.
    TextBlock = 8,

    // === Operators (32-79) ===
    Plus = 32,
    Minus = 33,
    Star = 34,
    Slash = 35,
    Percent = 36,
    Caret = 37,
    Ampersand = 38,
    Pipe = 39,
    Tilde = 40,
    Bang = 41,
    Equal = 42,
    Less = 43,
    Greater = 44,
    Question = 45,
    Colon = 46,
    PlusPlus = 47,
    MinusMinus = 48,
    AmpersandAmpersand = 49,
    PipePipe = 50,
    EqualEqual = 51,
    BangEqual = 52,
    LessEqual = 53,
    GreaterEqual = 54,
    /// `<<`
    Shl = 55,
    /// `>>`
    Shr = 56,
    /// `>>>`
    UShr = 57,
    PlusEqual = 58,
    MinusEqual = 59,
    StarEqual = 60,
    SlashEqual = 61,
    PercentEqual = 62,
    CaretEqual = 63,
    AmpersandEqual = 64,
    PipeEqual = 65,
    ShlEqual = 66,
    ShrEqual = 67,
    UShrEqual = 68,
    /// `->`
    Arrow = 69,
    /// `::`
    ColonColon = 70,

    // === Delimiters (80-111) ===
    LeftParen = 80,
    RightParen = 81,
    LeftBracket = 82,
    RightBracket = 83,
    LeftBrace = 84,
    RightBrace = 85,
    Semicolon = 86,
    Comma = 87,
    Dot = 88,
    /// `...`
    Ellipsis = 89,
    At = 90,

    // === Trivia (112-127) ===
    /// Spaces, tabs, form feeds and line terminators.
    Whitespace = 112,
    LineComment = 113,
    BlockComment = 114,
    /// `/** … */`
    JavadocComment = 115,
    /// `/*-{ … }-*/`
    NativeBlock = 116,

    // === Errors (240-254) ===
    /// A byte or code point that starts no Java token.
    InvalidByte = 240,
    UnterminatedString = 241,
    UnterminatedChar = 242,
    UnterminatedTextBlock = 243,
    UnterminatedBlockComment = 244,
    UnterminatedNativeBlock = 245,

    // === Control ===
    Eof = 255,
}

impl RawTag {
    /// The fixed source text of this tag, if it has one.
    pub fn lexeme(self) -> Option<&'static str> {
        let text = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::Ampersand => "&",
            Self::Pipe => "|",
            Self::Tilde => "~",
            Self::Bang => "!",
            Self::Equal => "=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Question => "?",
            Self::Colon => ":",
            Self::PlusPlus => "++",
            Self::MinusMinus => "--",
            Self::AmpersandAmpersand => "&&",
            Self::PipePipe => "||",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::PlusEqual => "+=",
            Self::MinusEqual => "-=",
            Self::StarEqual => "*=",
            Self::SlashEqual => "/=",
            Self::PercentEqual => "%=",
            Self::CaretEqual => "^=",
            Self::AmpersandEqual => "&=",
            Self::PipeEqual => "|=",
            Self::ShlEqual => "<<=",
            Self::ShrEqual => ">>=",
            Self::UShrEqual => ">>>=",
            Self::Arrow => "->",
            Self::ColonColon => "::",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Ellipsis => "...",
            Self::At => "@",
            _ => return None,
        };
        Some(text)
    }

    /// Human-readable name for debug output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ident => "identifier",
            Self::Int | Self::HexInt | Self::OctInt | Self::BinInt => "integer",
            Self::Float => "float",
            Self::Char => "char",
            Self::String => "string",
            Self::TextBlock => "text block",
            Self::Whitespace => "whitespace",
            Self::LineComment => "line comment",
            Self::BlockComment => "block comment",
            Self::JavadocComment => "javadoc comment",
            Self::NativeBlock => "native block",
            Self::InvalidByte => "invalid byte",
            Self::UnterminatedString => "unterminated string",
            Self::UnterminatedChar => "unterminated char",
            Self::UnterminatedTextBlock => "unterminated text block",
            Self::UnterminatedBlockComment => "unterminated block comment",
            Self::UnterminatedNativeBlock => "unterminated native block",
            Self::Eof => "end of input",
            _ => self.lexeme().unwrap_or("operator"),
        }
    }

    #[inline]
    pub fn is_trivia(self) -> bool {
        (112..=127).contains(&(self as u8))
    }

    #[inline]
    pub fn is_error(self) -> bool {
        (240..=254).contains(&(self as u8))
    }

    #[inline]
    pub fn is_operator(self) -> bool {
        (32..=79).contains(&(self as u8))
    }

    /// Number of `>` characters if this tag is a run of closing angles.
    ///
    /// `>=`-style assignments are not runs: they never close a type argument
    /// list.
    #[inline]
    pub fn closing_angle_count(self) -> u32 {
        match self {
            Self::Greater => 1,
            Self::Shr => 2,
            Self::UShr => 3,
            _ => 0,
        }
    }
}

/// One raw lexeme: a tag and its length in bytes.
///
/// The start offset is implied by the scanner position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}

const _: () = assert!(std::mem::size_of::<RawToken>() <= 8);

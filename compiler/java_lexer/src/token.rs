//! Classified tokens: spans, kinds and per-token flags.

use std::fmt;

use bitflags::bitflags;

/// Byte range in the source, end exclusive.
///
/// Layout: 8 bytes total.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create a point span (zero-length).
    #[inline]
    pub const fn point(offset: u32) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

const _: () = assert!(std::mem::size_of::<Span>() == 8);

/// Final token classification.
///
/// Discriminants are grouped so category checks are range compares:
///
/// | Range   | Group       |
/// |---------|-------------|
/// | 0-15    | trivia      |
/// | 16-31   | keywords    |
/// | 32-47   | names       |
/// | 48-63   | literals    |
/// | 64-95   | delimiters  |
/// | 96-111  | operators   |
/// | 240-255 | errors      |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    // === Trivia ===
    Whitespace = 0,
    CommentLine = 1,
    CommentBlock = 2,
    CommentJavadoc = 3,
    /// JSNI `/*-{ … }-*/` block, kept opaque.
    NativeBlock = 4,

    // === Keywords ===
    Keyword = 16,
    /// Control flow: `if`, `for`, `switch`, `try`, `throw`, ...
    KeywordControl = 17,
    KeywordReturn = 18,
    KeywordNew = 19,
    /// `this` and `super`.
    KeywordThis = 20,
    /// Restricted word acting as a keyword inside a module declaration.
    ModuleKeyword = 21,

    // === Names ===
    Identifier = 32,
    /// Name introduced by a `class`, `interface`, `enum` or `record` header.
    ClassName = 33,
    /// Identifier directly followed by `(`.
    FunctionName = 34,
    EnumConstant = 35,
    /// `@` of an annotation and each part of its name.
    Annotation = 36,

    // === Literals ===
    IntegerLiteral = 48,
    FloatLiteral = 49,
    CharLiteral = 50,
    StringLiteral = 51,
    TextBlock = 52,
    BooleanLiteral = 53,
    NullLiteral = 54,

    // === Delimiters ===
    LParen = 64,
    RParen = 65,
    LBrace = 66,
    RBrace = 67,
    LBracket = 68,
    RBracket = 69,
    Semicolon = 70,
    Comma = 71,
    Dot = 72,
    Ellipsis = 73,
    Question = 74,
    Colon = 75,
    Arrow = 76,
    ColonColon = 77,

    // === Operators ===
    Operator = 96,
    GenericOpen = 97,
    GenericClose = 98,

    // === Errors ===
    UnterminatedLiteral = 240,
    Unknown = 241,
}

impl TokenKind {
    /// Every kind, in discriminant order.
    pub const ALL: [TokenKind; 42] = [
        Self::Whitespace,
        Self::CommentLine,
        Self::CommentBlock,
        Self::CommentJavadoc,
        Self::NativeBlock,
        Self::Keyword,
        Self::KeywordControl,
        Self::KeywordReturn,
        Self::KeywordNew,
        Self::KeywordThis,
        Self::ModuleKeyword,
        Self::Identifier,
        Self::ClassName,
        Self::FunctionName,
        Self::EnumConstant,
        Self::Annotation,
        Self::IntegerLiteral,
        Self::FloatLiteral,
        Self::CharLiteral,
        Self::StringLiteral,
        Self::TextBlock,
        Self::BooleanLiteral,
        Self::NullLiteral,
        Self::LParen,
        Self::RParen,
        Self::LBrace,
        Self::RBrace,
        Self::LBracket,
        Self::RBracket,
        Self::Semicolon,
        Self::Comma,
        Self::Dot,
        Self::Ellipsis,
        Self::Question,
        Self::Colon,
        Self::Arrow,
        Self::ColonColon,
        Self::Operator,
        Self::GenericOpen,
        Self::GenericClose,
        Self::UnterminatedLiteral,
        Self::Unknown,
    ];

    #[inline]
    pub fn is_trivia(self) -> bool {
        (self as u8) < 16
    }

    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            Self::CommentLine | Self::CommentBlock | Self::CommentJavadoc | Self::NativeBlock
        )
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        (16..32).contains(&(self as u8))
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        (48..64).contains(&(self as u8))
    }

    #[inline]
    pub fn is_error(self) -> bool {
        (self as u8) >= 240
    }

    /// Stable display name, used by debug dumps and summaries.
    pub fn name(self) -> &'static str {
        match self {
            Self::Whitespace => "Whitespace",
            Self::CommentLine => "CommentLine",
            Self::CommentBlock => "CommentBlock",
            Self::CommentJavadoc => "CommentJavadoc",
            Self::NativeBlock => "NativeBlock",
            Self::Keyword => "Keyword",
            Self::KeywordControl => "KeywordControl",
            Self::KeywordReturn => "KeywordReturn",
            Self::KeywordNew => "KeywordNew",
            Self::KeywordThis => "KeywordThis",
            Self::ModuleKeyword => "ModuleKeyword",
            Self::Identifier => "Identifier",
            Self::ClassName => "ClassName",
            Self::FunctionName => "FunctionName",
            Self::EnumConstant => "EnumConstant",
            Self::Annotation => "Annotation",
            Self::IntegerLiteral => "IntegerLiteral",
            Self::FloatLiteral => "FloatLiteral",
            Self::CharLiteral => "CharLiteral",
            Self::StringLiteral => "StringLiteral",
            Self::TextBlock => "TextBlock",
            Self::BooleanLiteral => "BooleanLiteral",
            Self::NullLiteral => "NullLiteral",
            Self::LParen => "LParen",
            Self::RParen => "RParen",
            Self::LBrace => "LBrace",
            Self::RBrace => "RBrace",
            Self::LBracket => "LBracket",
            Self::RBracket => "RBracket",
            Self::Semicolon => "Semicolon",
            Self::Comma => "Comma",
            Self::Dot => "Dot",
            Self::Ellipsis => "Ellipsis",
            Self::Question => "Question",
            Self::Colon => "Colon",
            Self::Arrow => "Arrow",
            Self::ColonColon => "ColonColon",
            Self::Operator => "Operator",
            Self::GenericOpen => "GenericOpen",
            Self::GenericClose => "GenericClose",
            Self::UnterminatedLiteral => "UnterminatedLiteral",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

bitflags! {
    /// Per-token metadata bits.
    #[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
    pub struct TokenFlags: u8 {
        /// Resolved as a restricted (module) keyword from context.
        const CONTEXTUAL_KW = 1 << 0;
        /// A diagnostic was recorded for this token.
        const HAS_ERROR = 1 << 1;
        /// One `>` of a `>>` or `>>>` run split inside type arguments.
        const SPLIT = 1 << 2;
        /// First non-trivia token on its line.
        const LINE_START = 1 << 3;
    }
}

const _: () = assert!(std::mem::size_of::<TokenFlags>() == 1);

/// One classified token.
///
/// `line` and `column` are 1-based; columns count bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub line: u32,
    pub column: u32,
    pub flags: TokenFlags,
}

impl Token {
    /// The token's text within `source` (the string it was lexed from).
    ///
    /// Returns `""` if the span does not fit `source`.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.to_range()).unwrap_or("")
    }

    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

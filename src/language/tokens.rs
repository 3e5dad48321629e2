//! The token kinds supplied from outside the grammar by a scanner.

use super::Kind;

/// Tokens which the grammar cannot recognize by itself because where they
/// begin and end depends on context. These are requested from a scanner
/// (see `parsing::Scanner`) whenever the grammar could accept one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    CommandStop,
    ScopesStop,
    ParagraphMark,
    Text,
    MpInclusionsBody,
    UseMpGraphicBody,
    ReusableMpGraphicBody,
    MpCodeBody,
    MpPageBody,
    StaticMpFigureBody,
    TikzBody,
    LuaBody,
    TypingHtmlBody,
    TypingCssBody,
    TypingMpBody,
    TypingLuaBody,
    TypingXmlBody,
    TypingParsedXmlBody,
    TypingTexBody,
    TypingUnnamedBody,
}

impl TokenKind {
    pub const ALL: [TokenKind; 20] = [
        TokenKind::CommandStop,
        TokenKind::ScopesStop,
        TokenKind::ParagraphMark,
        TokenKind::Text,
        TokenKind::MpInclusionsBody,
        TokenKind::UseMpGraphicBody,
        TokenKind::ReusableMpGraphicBody,
        TokenKind::MpCodeBody,
        TokenKind::MpPageBody,
        TokenKind::StaticMpFigureBody,
        TokenKind::TikzBody,
        TokenKind::LuaBody,
        TokenKind::TypingHtmlBody,
        TokenKind::TypingCssBody,
        TokenKind::TypingMpBody,
        TokenKind::TypingLuaBody,
        TokenKind::TypingXmlBody,
        TokenKind::TypingParsedXmlBody,
        TokenKind::TypingTexBody,
        TokenKind::TypingUnnamedBody,
    ];

    /// The node kind a token of this kind is reported as.
    pub fn kind(&self) -> Kind {
        match self {
            TokenKind::CommandStop => Kind::CommandStop,
            TokenKind::ScopesStop => Kind::ScopesStop,
            TokenKind::ParagraphMark => Kind::ParagraphMark,
            TokenKind::Text => Kind::Text,
            TokenKind::MpInclusionsBody => Kind::MpInclusionsBody,
            TokenKind::UseMpGraphicBody => Kind::UseMpGraphicBody,
            TokenKind::ReusableMpGraphicBody => Kind::ReusableMpGraphicBody,
            TokenKind::MpCodeBody => Kind::MpCodeBody,
            TokenKind::MpPageBody => Kind::MpPageBody,
            TokenKind::StaticMpFigureBody => Kind::StaticMpFigureBody,
            TokenKind::TikzBody => Kind::TikzBody,
            TokenKind::LuaBody => Kind::LuaBody,
            TokenKind::TypingHtmlBody => Kind::TypingHtmlBody,
            TokenKind::TypingCssBody => Kind::TypingCssBody,
            TokenKind::TypingMpBody => Kind::TypingMpBody,
            TokenKind::TypingLuaBody => Kind::TypingLuaBody,
            TokenKind::TypingXmlBody => Kind::TypingXmlBody,
            TokenKind::TypingParsedXmlBody => Kind::TypingParsedXmlBody,
            TokenKind::TypingTexBody => Kind::TypingTexBody,
            TokenKind::TypingUnnamedBody => Kind::TypingUnnamedBody,
        }
    }

    /// Boundary markers say "this construct ends here" and are the only
    /// tokens permitted to have zero width.
    pub fn is_boundary(&self) -> bool {
        matches!(self, TokenKind::CommandStop | TokenKind::ScopesStop)
    }

    fn bit(&self) -> u32 {
        1 << (*self as u32)
    }
}

/// A set of token kinds, as offered to a scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenSet(u32);

impl TokenSet {
    pub fn empty() -> TokenSet {
        TokenSet(0)
    }

    pub fn of(kind: TokenKind) -> TokenSet {
        TokenSet(kind.bit())
    }

    pub fn insert(&mut self, kind: TokenKind) {
        self.0 |= kind.bit();
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = TokenKind> + '_ {
        TokenKind::ALL
            .into_iter()
            .filter(|kind| self.contains(*kind))
    }
}

impl FromIterator<TokenKind> for TokenSet {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> TokenSet {
        let mut set = TokenSet::empty();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

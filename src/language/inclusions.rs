//! Embedded regions of other languages.
//!
//! Each inclusion is a `\start<Name> ... \stop<Name>` pair whose interior is
//! captured verbatim. The same table drives the grammar rules and the
//! scanner which finds where a body ends.

use super::{Kind, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    MetaPost,
    Tikz,
    Lua,
    Html,
    Css,
    Xml,
    Tex,
    Text,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::MetaPost => "metapost",
            Language::Tikz => "tikz",
            Language::Lua => "lua",
            Language::Html => "html",
            Language::Css => "css",
            Language::Xml => "xml",
            Language::Tex => "tex",
            Language::Text => "text",
        }
    }
}

#[derive(Debug)]
pub struct Inclusion {
    pub kind: Kind,
    pub body: TokenKind,
    pub open: &'static str,
    pub close: &'static str,
    pub language: Language,
}

pub static INCLUSIONS: [Inclusion; 16] = [
    Inclusion {
        kind: Kind::MpInclusionsInclusion,
        body: TokenKind::MpInclusionsBody,
        open: "\\startMPinclusions",
        close: "\\stopMPinclusions",
        language: Language::MetaPost,
    },
    Inclusion {
        kind: Kind::UseMpGraphicInclusion,
        body: TokenKind::UseMpGraphicBody,
        open: "\\startuseMPgraphic",
        close: "\\stopuseMPgraphic",
        language: Language::MetaPost,
    },
    Inclusion {
        kind: Kind::ReusableMpGraphicInclusion,
        body: TokenKind::ReusableMpGraphicBody,
        open: "\\startreusableMPgraphic",
        close: "\\stopreusableMPgraphic",
        language: Language::MetaPost,
    },
    Inclusion {
        kind: Kind::MpCodeInclusion,
        body: TokenKind::MpCodeBody,
        open: "\\startMPcode",
        close: "\\stopMPcode",
        language: Language::MetaPost,
    },
    Inclusion {
        kind: Kind::MpPageInclusion,
        body: TokenKind::MpPageBody,
        open: "\\startMPpage",
        close: "\\stopMPpage",
        language: Language::MetaPost,
    },
    Inclusion {
        kind: Kind::StaticMpFigureInclusion,
        body: TokenKind::StaticMpFigureBody,
        open: "\\startstaticMPfigure",
        close: "\\stopstaticMPfigure",
        language: Language::MetaPost,
    },
    Inclusion {
        kind: Kind::TikzInclusion,
        body: TokenKind::TikzBody,
        open: "\\starttikzpicture",
        close: "\\stoptikzpicture",
        language: Language::Tikz,
    },
    Inclusion {
        kind: Kind::LuaInclusion,
        body: TokenKind::LuaBody,
        open: "\\startluacode",
        close: "\\stopluacode",
        language: Language::Lua,
    },
    Inclusion {
        kind: Kind::TypingHtmlInclusion,
        body: TokenKind::TypingHtmlBody,
        open: "\\startHTML",
        close: "\\stopHTML",
        language: Language::Html,
    },
    Inclusion {
        kind: Kind::TypingCssInclusion,
        body: TokenKind::TypingCssBody,
        open: "\\startCSS",
        close: "\\stopCSS",
        language: Language::Css,
    },
    Inclusion {
        kind: Kind::TypingMpInclusion,
        body: TokenKind::TypingMpBody,
        open: "\\startMP",
        close: "\\stopMP",
        language: Language::MetaPost,
    },
    Inclusion {
        kind: Kind::TypingLuaInclusion,
        body: TokenKind::TypingLuaBody,
        open: "\\startLUA",
        close: "\\stopLUA",
        language: Language::Lua,
    },
    Inclusion {
        kind: Kind::TypingXmlInclusion,
        body: TokenKind::TypingXmlBody,
        open: "\\startXML",
        close: "\\stopXML",
        language: Language::Xml,
    },
    Inclusion {
        kind: Kind::TypingParsedXmlInclusion,
        body: TokenKind::TypingParsedXmlBody,
        open: "\\startPARSEDXML",
        close: "\\stopPARSEDXML",
        language: Language::Xml,
    },
    Inclusion {
        kind: Kind::TypingTexInclusion,
        body: TokenKind::TypingTexBody,
        open: "\\startTEX",
        close: "\\stopTEX",
        language: Language::Tex,
    },
    Inclusion {
        kind: Kind::TypingUnnamedInclusion,
        body: TokenKind::TypingUnnamedBody,
        open: "\\starttyping",
        close: "\\stoptyping",
        language: Language::Text,
    },
];

/// Look up the inclusion whose body is delivered as the given token.
pub fn by_body(token: TokenKind) -> Option<&'static Inclusion> {
    INCLUSIONS
        .iter()
        .find(|inclusion| inclusion.body == token)
}

/// Look up the inclusion by the kind of its body node.
pub fn by_body_kind(kind: Kind) -> Option<&'static Inclusion> {
    INCLUSIONS
        .iter()
        .find(|inclusion| {
            inclusion
                .body
                .kind()
                == kind
        })
}

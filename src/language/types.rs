//! Types representing a concrete syntax tree for ConTeXt documents

use serde::{Serialize, Serializer};

/// The kind of a node in the syntax tree, and also the name of the grammar
/// rule which produced it. The strings returned by `as_str()` are the
/// stable vocabulary consumed by downstream tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    // areas
    Document,
    Preamble,
    Main,
    Postamble,
    ComponentId,

    // project structure
    GenericId,
    ProjectId,
    ProductId,
    EnvironmentId,
    ProjectCommand,
    ProductCommand,
    EnvironmentCommand,

    // groups
    BraceGroup,
    CommandGroup,

    // inline math
    MathGroup,
    MathText,
    InlineMath,

    // commands
    Command,
    CommandName,
    EmptyBlock,
    OptionBlock,
    Keyword,
    SettingsBlock,
    Setting,
    TitleSetting,
    SubtitleSetting,
    Key,
    Value,
    ValueText,
    ValueBraceGroup,
    ValueBraceGroupText,
    CommandScope,

    // text
    MacroArgument,
    TextBlock,
    Text,
    ParagraphMark,
    Escaped,
    LineComment,

    // language inclusions
    MpInclusionsInclusion,
    UseMpGraphicInclusion,
    ReusableMpGraphicInclusion,
    MpCodeInclusion,
    MpPageInclusion,
    StaticMpFigureInclusion,
    TikzInclusion,
    LuaInclusion,
    TypingHtmlInclusion,
    TypingCssInclusion,
    TypingMpInclusion,
    TypingLuaInclusion,
    TypingXmlInclusion,
    TypingParsedXmlInclusion,
    TypingTexInclusion,
    TypingUnnamedInclusion,

    // verbatim bodies of the inclusions
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

    // structural helpers, never present in a finished tree
    Content,
    MathContent,
    SettingItem,
    ValueContent,
    ValueBraceGroupContent,
    CommandStop,
    ScopesStop,

    // hidden in the grammar, but carrying source text
    Whitespace,
    EndOfLine,

    // input that could not be parsed
    Error,

    // literal tokens and inline patterns, named by their text
    Anonymous(&'static str),
}

/// How a kind is reported in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Named,
    Anonymous,
    Hidden,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Document => "document",
            Kind::Preamble => "preamble",
            Kind::Main => "main",
            Kind::Postamble => "postamble",
            Kind::ComponentId => "component_id",
            Kind::GenericId => "generic_id",
            Kind::ProjectId => "project_id",
            Kind::ProductId => "product_id",
            Kind::EnvironmentId => "environment_id",
            Kind::ProjectCommand => "project_command",
            Kind::ProductCommand => "product_command",
            Kind::EnvironmentCommand => "environment_command",
            Kind::BraceGroup => "brace_group",
            Kind::CommandGroup => "command_group",
            Kind::MathGroup => "math_group",
            Kind::MathText => "math_text",
            Kind::InlineMath => "inline_math",
            Kind::Command => "command",
            Kind::CommandName => "command_name",
            Kind::EmptyBlock => "empty_block",
            Kind::OptionBlock => "option_block",
            Kind::Keyword => "keyword",
            Kind::SettingsBlock => "settings_block",
            Kind::Setting => "setting",
            Kind::TitleSetting => "title_setting",
            Kind::SubtitleSetting => "subtitle_setting",
            Kind::Key => "key",
            Kind::Value => "value",
            Kind::ValueText => "value_text",
            Kind::ValueBraceGroup => "value_brace_group",
            Kind::ValueBraceGroupText => "value_brace_group_text",
            Kind::CommandScope => "command_scope",
            Kind::MacroArgument => "macro_argument",
            Kind::TextBlock => "text_block",
            Kind::Text => "text",
            Kind::ParagraphMark => "paragraph_mark",
            Kind::Escaped => "escaped",
            Kind::LineComment => "line_comment",
            Kind::MpInclusionsInclusion => "MPinclusions_inclusion",
            Kind::UseMpGraphicInclusion => "useMPgraphic_inclusion",
            Kind::ReusableMpGraphicInclusion => "reusableMPgraphic_inclusion",
            Kind::MpCodeInclusion => "MPcode_inclusion",
            Kind::MpPageInclusion => "MPpage_inclusion",
            Kind::StaticMpFigureInclusion => "staticMPfigure_inclusion",
            Kind::TikzInclusion => "tikzcode_inclusion",
            Kind::LuaInclusion => "luacode_inclusion",
            Kind::TypingHtmlInclusion => "typing_html_inclusion",
            Kind::TypingCssInclusion => "typing_css_inclusion",
            Kind::TypingMpInclusion => "typing_mp_inclusion",
            Kind::TypingLuaInclusion => "typing_lua_inclusion",
            Kind::TypingXmlInclusion => "typing_xml_inclusion",
            Kind::TypingParsedXmlInclusion => "typing_parsedxml_inclusion",
            Kind::TypingTexInclusion => "typing_tex_inclusion",
            Kind::TypingUnnamedInclusion => "typing_unnamed_inclusion",
            Kind::MpInclusionsBody => "code_MPinclusions_body",
            Kind::UseMpGraphicBody => "code_useMPgraphic_body",
            Kind::ReusableMpGraphicBody => "code_reusableMPgraphic_body",
            Kind::MpCodeBody => "code_MPcode_body",
            Kind::MpPageBody => "code_MPpage_body",
            Kind::StaticMpFigureBody => "code_staticMPfigure_body",
            Kind::TikzBody => "code_tikz_body",
            Kind::LuaBody => "code_lua_body",
            Kind::TypingHtmlBody => "typing_html_body",
            Kind::TypingCssBody => "typing_css_body",
            Kind::TypingMpBody => "typing_mp_body",
            Kind::TypingLuaBody => "typing_lua_body",
            Kind::TypingXmlBody => "typing_xml_body",
            Kind::TypingParsedXmlBody => "typing_parsedxml_body",
            Kind::TypingTexBody => "typing_tex_body",
            Kind::TypingUnnamedBody => "typing_unnamed_body",
            Kind::Content => "_content",
            Kind::MathContent => "_math_content",
            Kind::SettingItem => "_setting",
            Kind::ValueContent => "_value_content",
            Kind::ValueBraceGroupContent => "_value_brace_group_content",
            Kind::CommandStop => "_command_stop",
            Kind::ScopesStop => "_scopes_stop",
            Kind::Whitespace => "whitespace",
            Kind::EndOfLine => "end_of_line",
            Kind::Error => "ERROR",
            Kind::Anonymous(text) => text,
        }
    }

    pub fn visibility(&self) -> Visibility {
        match self {
            Kind::Content
            | Kind::MathContent
            | Kind::SettingItem
            | Kind::ValueContent
            | Kind::ValueBraceGroupContent
            | Kind::CommandStop
            | Kind::ScopesStop => Visibility::Hidden,
            Kind::Whitespace | Kind::EndOfLine | Kind::Anonymous(_) => Visibility::Anonymous,
            _ => Visibility::Named,
        }
    }

    pub fn is_named(&self) -> bool {
        self.visibility() == Visibility::Named
    }

    pub fn is_hidden(&self) -> bool {
        self.visibility() == Visibility::Hidden
    }
}

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Span {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Where a node came from. The conflict resolver ranks competing token
/// streams by this, the way a longest-match lexer prefers literal strings
/// over patterns and real tokens over extras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Origin {
    Rule,
    Extra,
    Pattern,
    External,
    Literal,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub kind: Kind,
    pub span: Span,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub extra: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(skip)]
    pub(crate) origin: Origin,
}

impl Node {
    pub(crate) fn leaf(kind: Kind, span: Span, origin: Origin) -> Node {
        Node {
            kind,
            span,
            extra: origin == Origin::Extra,
            children: Vec::new(),
            origin,
        }
    }

    pub(crate) fn branch(kind: Kind, span: Span, children: Vec<Node>) -> Node {
        Node {
            kind,
            span,
            extra: false,
            children,
            origin: Origin::Rule,
        }
    }

    pub fn is_named(&self) -> bool {
        self.kind
            .is_named()
    }

    pub fn is_leaf(&self) -> bool {
        self.children
            .is_empty()
    }

    /// The source text covered by this node.
    pub fn text<'i>(&self, source: &'i str) -> &'i str {
        &source[self.span.start..self.span.end]
    }

    pub fn named_children(&self) -> impl Iterator<Item = &Node> {
        self.children
            .iter()
            .filter(|child| child.is_named())
    }

    pub fn child(&self, kind: Kind) -> Option<&Node> {
        self.children
            .iter()
            .find(|child| child.kind == kind)
    }

    /// Pre-order traversal of this node and everything beneath it.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// The leaves beneath this node, in source order. Concatenating their
    /// text reconstructs the source covered by this node.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.descendants()
            .filter(|node| node.is_leaf())
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self
            .stack
            .pop()?;

        self.stack
            .extend(
                node.children
                    .iter()
                    .rev(),
            );

        Some(node)
    }
}

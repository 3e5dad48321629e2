//! Renderers for colourizing ConTeXt markup

use crate::formatting::*;
use owo_colors::OwoColorize;

/// Embellish fragments with ANSI escapes to create syntax highlighting in
/// terminal output.
pub struct Terminal;

impl Render for Terminal {
    fn style(&self, syntax: Syntax, content: &str) -> String {
        match syntax {
            Syntax::Neutral => content.to_string(),
            Syntax::Text => content.to_string(),
            Syntax::Paragraph => content.to_string(),
            Syntax::Command => content // entity.name.function - #3465a4 (blue) bold
                .color(owo_colors::Rgb(0x34, 0x65, 0xa4))
                .bold()
                .to_string(),
            Syntax::Structure => content // keyword.control - #75507b (purple) bold
                .color(owo_colors::Rgb(0x75, 0x50, 0x7b))
                .bold()
                .to_string(),
            Syntax::Identifier => content // entity.name.type - #8f5902 (brown) bold
                .color(owo_colors::Rgb(0x8f, 0x59, 0x02))
                .bold()
                .to_string(),
            Syntax::Bracket => content // punctuation.section.brackets - #999999 bold
                .color(owo_colors::Rgb(153, 153, 153))
                .bold()
                .to_string(),
            Syntax::Option => content // variable.parameter - #729fcf (light blue)
                .color(owo_colors::Rgb(0x72, 0x9f, 0xcf))
                .to_string(),
            Syntax::Key => content // variable.other.member - #60989a bold
                .color(owo_colors::Rgb(0x60, 0x98, 0x9a))
                .bold()
                .to_string(),
            Syntax::Value => content // string - #4e9a06 (green)
                .color(owo_colors::Rgb(0x4e, 0x9a, 0x06))
                .to_string(),
            Syntax::Math => content // markup.math - #ad7fa8 (purple)
                .color(owo_colors::Rgb(0xad, 0x7f, 0xa8))
                .to_string(),
            Syntax::Escape => content // constant.character.escape - #f57900 (orange)
                .color(owo_colors::Rgb(0xf5, 0x79, 0x00))
                .bold()
                .to_string(),
            Syntax::Comment => content // comment - #888a85 (grey) italic
                .color(owo_colors::Rgb(0x88, 0x8a, 0x85))
                .italic()
                .to_string(),
            Syntax::Argument => content // variable.parameter - #729fcf (light blue) bold
                .color(owo_colors::Rgb(0x72, 0x9f, 0xcf))
                .bold()
                .to_string(),
            Syntax::Language => content // storage.type.embedded - #c4a000 bold
                .color(owo_colors::Rgb(0xc4, 0xa0, 0x00))
                .bold()
                .to_string(),
            Syntax::Embedded => content // markup.raw - #3b5d7d
                .color(owo_colors::Rgb(0x3b, 0x5d, 0x7d))
                .to_string(),
            Syntax::Error => content // invalid - #cc0000 (red) bold
                .color(owo_colors::Rgb(204, 0, 0))
                .bold()
                .underline()
                .to_string(),
        }
    }
}

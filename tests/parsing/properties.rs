#[cfg(test)]
mod verify {
    use context::language::*;
    use context::parsing;

    fn sexp(source: &str) -> String {
        let tree = parsing::parse(source).unwrap();
        assert!(!tree.has_error(), "unexpected errors parsing {:?}", source);
        tree.to_sexp()
    }

    #[test]
    fn leaves_cover_the_source() {
        let sources = [
            "Hello world",
            "\\starttext\n\\section{One}\n\nSome text.\n\n\\stoptext\n",
            "\\setup [ a , b ] % comment\n{x}",
            "$a + b$ and \\# and #1",
            "a } b",
            "{abc",
            "\\startluacode\n  print(\"}\")\n\\stopluacode",
        ];

        for source in sources {
            let tree = parsing::parse(source).unwrap();
            let text: String = tree
                .leaves()
                .map(|node| tree.text(node))
                .collect();
            assert_eq!(text, source);
        }
    }

    #[test]
    fn whitespace_between_tokens_is_insignificant() {
        let expected = sexp("\\setup[a,b]{x}");
        assert_eq!(sexp("\\setup [ a , b ] {x}"), expected);
        assert_eq!(sexp("\\setup[a,b]\n{x}"), expected);
        assert_eq!(sexp("\\setup[\n  a,\n  b\n]{x}"), expected);
    }

    fn structure(source: &str) -> Vec<Kind> {
        let tree = parsing::parse(source).unwrap();
        assert!(!tree.has_error(), "unexpected errors parsing {:?}", source);
        tree.root()
            .descendants()
            .filter(|node| node.is_named() && node.kind != Kind::LineComment)
            .map(|node| node.kind)
            .collect()
    }

    #[test]
    fn comments_between_tokens_are_insignificant() {
        let pairs = [
            // after text
            ("x \\relax", "x% note\n \\relax"),
            ("Hello \\emph{world}", "Hello % note\n\\emph{world}"),
            // inside a scope
            ("\\emph{I}", "\\emph{I% note\n}"),
            ("\\emph{I}", "\\emph{% note\nI}"),
            // between blocks
            ("\\setup[a][b=1]", "\\setup[a]% note\n[b=1]"),
            ("\\setup[a][b=1]", "\\setup[a] % one\n % two\n [b=1]"),
        ];

        for (plain, commented) in pairs {
            assert_eq!(structure(commented), structure(plain), "{:?}", commented);

            let tree = parsing::parse(commented).unwrap();
            assert!(tree
                .root()
                .descendants()
                .any(|node| node.kind == Kind::LineComment));
        }
    }

    #[test]
    fn brace_group_spellings() {
        for source in ["{x}", "\\bgroup x\\egroup", "{x\\egroup", "\\bgroup x}"] {
            assert_eq!(
                sexp(source),
                "(document (main (brace_group (text_block (text)))))",
                "{:?}",
                source
            );
        }
    }

    #[test]
    fn inclusions_are_verbatim() {
        let body = " x = {1}; % not a comment\n\\relax\n";

        for inclusion in &INCLUSIONS {
            let source = format!("{}{}{}", inclusion.open, body, inclusion.close);
            let tree = parsing::parse(&source).unwrap();
            assert!(!tree.has_error(), "{:?}", source);
            assert_eq!(
                tree.to_sexp(),
                format!(
                    "(document (main ({} ({}))))",
                    inclusion
                        .kind
                        .as_str(),
                    inclusion
                        .body
                        .kind()
                        .as_str()
                )
            );

            let injections = tree.injections();
            assert_eq!(injections.len(), 1);
            assert_eq!(injections[0].body, body);
            assert_eq!(
                injections[0].language,
                inclusion
                    .language
                    .as_str()
            );
        }
    }

    #[test]
    fn brackets_after_math_are_text() {
        assert_eq!(
            sexp("$x$[a=b]"),
            "(document (main (inline_math (math_text)) (text_block (text))))"
        );
    }

    #[test]
    fn settings_win_over_options() {
        assert_eq!(
            sexp("\\setup[a,b]"),
            "(document (main (command (command_name) (option_block (keyword) (keyword)))))"
        );
        assert_eq!(
            sexp("\\setup[a=1]"),
            "(document (main (command (command_name) (settings_block (setting (key) (value (value_text)))))))"
        );
        assert_eq!(
            sexp("\\setup[a=1,]"),
            "(document (main (command (command_name) (settings_block (setting (key) (value (value_text)))))))"
        );
    }

    #[test]
    fn nested_values() {
        assert_eq!(
            sexp("\\setup[style={\\bf x}]"),
            "(document (main (command (command_name) (settings_block (setting (key) (value (value_brace_group (command (command_name)) (value_brace_group_text))))))))"
        );
    }
}

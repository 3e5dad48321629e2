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
    fn plain_text() {
        assert_eq!(
            sexp("Hello world"),
            "(document (main (text_block (text))))"
        );
    }

    #[test]
    fn empty_and_blank_documents() {
        for source in ["", "   \n\n  ", "% nothing but a comment\n"] {
            let tree = parsing::parse(source).unwrap();
            assert!(!tree.has_error());
            assert_eq!(
                tree.root()
                    .kind,
                Kind::Document
            );
            assert_eq!(
                tree.root()
                    .span,
                Span::new(0, source.len())
            );
        }
    }

    #[test]
    fn text_areas() {
        let source = "\\starttext Hello \\stoptext";
        assert_eq!(
            sexp(source),
            "(document (preamble) (main (text_block (text))) (postamble))"
        );

        let tree = parsing::parse(source).unwrap();
        let runs: Vec<&str> = tree
            .text_runs()
            .map(|node| tree.text(node))
            .collect();
        assert_eq!(runs, vec!["Hello "]);
    }

    #[test]
    fn comment_after_a_single_letter() {
        let tree = parsing::parse("I% note\nam here").unwrap();
        assert!(!tree.has_error());

        let words: Vec<&str> = tree
            .words()
            .into_iter()
            .map(|(_, word)| word)
            .collect();
        assert_eq!(words, vec!["I", "am", "here"]);

        let comments: Vec<&str> = tree
            .root()
            .descendants()
            .filter(|node| node.kind == Kind::LineComment)
            .map(|node| tree.text(node))
            .collect();
        assert_eq!(comments, vec!["% note"]);
    }

    #[test]
    fn escaped_percent_is_not_a_comment() {
        let tree = parsing::parse("5\\% off").unwrap();
        assert!(!tree.has_error());
        assert!(!tree
            .root()
            .descendants()
            .any(|node| node.kind == Kind::LineComment));

        let words: Vec<&str> = tree
            .words()
            .into_iter()
            .map(|(_, word)| word)
            .collect();
        assert_eq!(words, vec!["5", "off"]);
    }

    #[test]
    fn component_areas() {
        assert_eq!(
            sexp("\\startcomponent intro\nText\n\\stopcomponent"),
            "(document (preamble (component_id)) (main (text_block (text))) (postamble))"
        );
    }

    #[test]
    fn command_with_options() {
        assert_eq!(
            sexp("\\setupbodyfont[10pt,ss]"),
            "(document (main (command (command_name) (option_block (keyword) (keyword)))))"
        );
    }

    #[test]
    fn command_with_settings() {
        assert_eq!(
            sexp("\\define[title=Foo, key=bar]"),
            "(document (main (command (command_name) (settings_block (title_setting (value (value_text))) (setting (key) (value (value_text)))))))"
        );
    }

    #[test]
    fn empty_blocks() {
        for source in ["\\blank[]", "\\blank[ ]"] {
            assert_eq!(
                sexp(source),
                "(document (main (command (command_name) (empty_block))))"
            );
        }
    }

    #[test]
    fn command_scopes() {
        assert_eq!(
            sexp("\\emph{important}"),
            "(document (main (command (command_name) (command_scope (text_block (text))))))"
        );
    }

    #[test]
    fn inline_math() {
        assert_eq!(
            sexp("$x^2$"),
            "(document (main (inline_math (math_text))))"
        );
        assert_eq!(
            sexp("$\\frac{a}{b}$"),
            "(document (main (inline_math (math_text) (math_group (math_text)) (math_group (math_text)))))"
        );
    }

    #[test]
    fn escapes_split_text() {
        assert_eq!(
            sexp("100\\% sure"),
            "(document (main (text_block (text)) (escaped) (text_block (text))))"
        );
    }

    #[test]
    fn macro_arguments() {
        assert_eq!(
            sexp("\\def\\foo#1{#1}"),
            "(document (main (command (command_name)) (command (command_name)) (macro_argument) (brace_group (macro_argument))))"
        );
    }

    #[test]
    fn project_structure() {
        assert_eq!(
            sexp("\\product intro"),
            "(document (main (product_command (product_id))))"
        );
        assert_eq!(
            sexp("\\environment[env-common]"),
            "(document (main (environment_command (environment_id))))"
        );
        assert_eq!(
            sexp("\\project [manual]"),
            "(document (main (project_command (project_id))))"
        );
    }

    #[test]
    fn lua_inclusion() {
        let source = "\\startluacode print(1) \\stopluacode";
        assert_eq!(
            sexp(source),
            "(document (main (luacode_inclusion (code_lua_body))))"
        );

        let tree = parsing::parse(source).unwrap();
        let injections = tree.injections();
        assert_eq!(injections.len(), 1);
        assert_eq!(injections[0].language, "lua");
        assert_eq!(injections[0].kind, Kind::LuaBody);
        assert_eq!(injections[0].body, " print(1) ");
        assert_eq!(tree.languages(), vec![Language::Lua]);
    }

    #[test]
    fn paragraphs() {
        let source = "First paragraph.\n\nSecond paragraph.";
        assert_eq!(
            sexp(source),
            "(document (main (text_block (text) (paragraph_mark) (text))))"
        );

        let tree = parsing::parse(source).unwrap();
        let words: Vec<&str> = tree
            .words()
            .into_iter()
            .map(|(_, word)| word)
            .collect();
        assert_eq!(
            words,
            vec!["First", "paragraph.", "Second", "paragraph."]
        );
    }

    #[test]
    fn unnamed_tokens_go_by_stable_names() {
        let sources = [
            "\\project [manual]",
            "\\emph{x}% note\n$a^2$ \\# 1",
            "\\setup [a, b]\n{x}",
        ];

        for source in sources {
            let tree = parsing::parse(source).unwrap();
            assert!(!tree.has_error(), "{:?}", source);

            for node in tree.leaves() {
                let name = node
                    .kind
                    .as_str();
                let spelled = name == tree.text(node);
                let word = name
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c == '_');
                assert!(spelled || word, "{:?} in {:?}", name, source);
            }
        }

        let tree = parsing::parse("\\project [manual]").unwrap();
        let json = serde_json::to_string(tree.root()).unwrap();
        assert!(json.contains("\"horizontal_space\""));
        assert!(!json.contains("[ \\\\t]+"));
    }
}

#[cfg(test)]
mod verify {
    use std::cell::RefCell;
    use std::sync::atomic::AtomicBool;

    use context::formatting::Identity;
    use context::grammar;
    use context::language::*;
    use context::parsing::{self, ContextScanner, Parser, ParsingError, Scanner, Token};
    use context::rendering;

    fn error_nodes<'i>(tree: &Tree<'i>) -> Vec<&'i str> {
        tree.root()
            .descendants()
            .filter(|node| node.kind == Kind::Error)
            .map(|node| tree.text(node))
            .collect()
    }

    #[test]
    fn stray_closing_brace() {
        let tree = parsing::parse("a } b").unwrap();
        assert!(tree.has_error());
        assert_eq!(tree.errors(), &[ParsingError::Unrecognized(2, 1)]);
        assert_eq!(error_nodes(&tree), vec!["}"]);

        // the well-formed input either side survives
        let runs: Vec<&str> = tree
            .text_runs()
            .map(|node| tree.text(node))
            .collect();
        assert_eq!(runs, vec!["a ", "b"]);
    }

    #[test]
    fn unclosed_brace_group() {
        let tree = parsing::parse("{abc").unwrap();
        assert!(tree.has_error());
        assert_eq!(tree.errors(), &[ParsingError::UnexpectedEndOfInput(4)]);
        assert_eq!(error_nodes(&tree), vec!["{"]);
    }

    #[test]
    fn unmatched_stop_is_skipped_whole() {
        let tree = parsing::parse("\\stoptext").unwrap();
        assert_eq!(tree.errors(), &[ParsingError::Unrecognized(0, 9)]);
        assert_eq!(error_nodes(&tree), vec!["\\stoptext"]);
    }

    #[test]
    fn errors_sit_directly_under_document() {
        let tree = parsing::parse("Text } \\emph{more}").unwrap();
        let root = tree.root();
        assert!(root
            .children
            .iter()
            .any(|node| node.kind == Kind::Error));
        assert!(root
            .children
            .iter()
            .any(|node| node.kind == Kind::Command));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ParsingError::Unrecognized(2, 1).to_string(),
            "unrecognized input at offset 2"
        );
        assert_eq!(
            ParsingError::Expected(5, "'}'".to_string()).to_string(),
            "expected '}' at offset 5"
        );
        assert_eq!(ParsingError::UnexpectedEndOfInput(4).offset(), 4);
        assert_eq!(ParsingError::Unrecognized(2, 3).width(), Some(3));
    }

    #[test]
    fn cancellation() {
        let flag = AtomicBool::new(true);
        let language = grammar::language().unwrap();
        let result = Parser::new(language, &ContextScanner, "Hello \\emph{world}")
            .cancel_on(&flag)
            .parse();
        assert_eq!(result.unwrap_err(), ParsingError::Cancelled(0));

        let flag = AtomicBool::new(false);
        let result = Parser::new(language, &ContextScanner, "Hello \\emph{world}")
            .cancel_on(&flag)
            .parse();
        assert!(result.is_ok());
    }

    struct Silent;

    impl Scanner for Silent {
        fn scan(&self, _valid: TokenSet, _offset: usize, _remaining: &str) -> Option<Token> {
            None
        }
    }

    #[test]
    fn text_needs_the_scanner() {
        let language = grammar::language().unwrap();
        let tree = parsing::parse_with(language, &Silent, "Hello").unwrap();
        assert_eq!(tree.errors(), &[ParsingError::Unrecognized(0, 5)]);
        assert_eq!(error_nodes(&tree), vec!["Hello"]);
    }

    #[test]
    fn deeply_nested_groups_are_skipped() {
        let depth = 10_000;
        let source = format!("{}x{}", "{".repeat(depth), "}".repeat(depth));

        let tree = parsing::parse(&source).unwrap();
        assert!(tree.has_error());
        assert_eq!(tree.errors()[0], ParsingError::TooDeep(0));

        // nothing is lost, and the tree is shallow enough to walk and print
        let text: String = tree
            .leaves()
            .map(|node| tree.text(node))
            .collect();
        assert_eq!(text, source);
        assert!(tree
            .to_sexp()
            .starts_with("(document (ERROR)"));
        assert_eq!(rendering::render(&Identity, &tree), source);
    }

    #[test]
    fn moderate_nesting_parses() {
        let depth = 200;
        let source = format!("{}x{}", "{".repeat(depth), "}".repeat(depth));

        let tree = parsing::parse(&source).unwrap();
        assert!(!tree.has_error());
        assert_eq!(
            tree.root()
                .descendants()
                .filter(|node| node.kind == Kind::BraceGroup)
                .count(),
            depth
        );
    }

    struct Recording {
        asked: RefCell<Vec<usize>>,
    }

    impl Scanner for Recording {
        fn scan(&self, valid: TokenSet, offset: usize, remaining: &str) -> Option<Token> {
            self.asked
                .borrow_mut()
                .push(
                    valid
                        .iter()
                        .count(),
                );
            ContextScanner.scan(valid, offset, remaining)
        }
    }

    #[test]
    fn scanner_is_asked_for_one_kind_at_a_time() {
        let scanner = Recording {
            asked: RefCell::new(Vec::new()),
        };
        let language = grammar::language().unwrap();
        let source = "\\starttext\n\\section{One}\n\nSome text.\n\n\\startluacode\nprint(1)\n\\stopluacode\n\\stoptext\n";
        let tree = parsing::parse_with(language, &scanner, source).unwrap();
        assert!(!tree.has_error());

        let asked = scanner
            .asked
            .into_inner();
        assert!(!asked.is_empty());
        assert!(asked
            .iter()
            .all(|&count| count == 1));
    }
}

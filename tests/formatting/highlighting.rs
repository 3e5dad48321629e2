#[cfg(test)]
mod examples {
    use std::fs;
    use std::path::Path;

    use context::formatting::*;
    use context::parsing;
    use context::rendering::{self, Terminal};

    /// Highlighting with the Identity renderer must reproduce each sample
    /// document exactly, broken ones included.
    #[test]
    fn identity_reproduces_input() {
        for dir in ["tests/samples/", "tests/broken/"] {
            let entries = fs::read_dir(Path::new(dir)).expect("Failed to read directory");

            for entry in entries {
                let path = entry
                    .expect("Failed to read directory entry")
                    .path();
                if path
                    .extension()
                    .and_then(|s| s.to_str())
                    != Some("tex")
                {
                    continue;
                }

                let content = parsing::load(&path)
                    .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", path, e));
                let tree = parsing::parse(&content).unwrap();

                let result = rendering::render(&Identity, &tree);
                assert_eq!(result, content, "{:?}", path);
            }
        }
    }

    #[test]
    fn terminal_adds_escapes() {
        let tree = parsing::parse("\\emph{important} text").unwrap();
        let result = rendering::render(&Terminal, &tree);
        assert!(result.contains("\u{1b}["));
        assert!(result.contains("\\emph"));
    }

    #[test]
    fn fragments_classified() {
        let tree = parsing::parse("\\setup[a=1] $x$").unwrap();
        let fragments = highlight(&tree);

        let find = |text: &str| {
            fragments
                .iter()
                .find(|(_, content)| content == text)
                .map(|(syntax, _)| *syntax)
        };

        assert_eq!(find("\\setup"), Some(Syntax::Command));
        assert_eq!(find("a"), Some(Syntax::Key));
        assert_eq!(find("1"), Some(Syntax::Value));
        assert_eq!(find("x"), Some(Syntax::Math));
    }
}

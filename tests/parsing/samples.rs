#[cfg(test)]
mod samples {
    use std::fs;
    use std::path::{Path, PathBuf};

    use context::parsing;

    fn documents(dir: &Path) -> Vec<PathBuf> {
        assert!(dir.exists(), "{:?} directory missing", dir);

        let entries = fs::read_dir(dir).expect("Failed to read directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("tex")
            {
                files.push(path);
            }
        }

        assert!(!files.is_empty(), "No .tex files found in {:?}", dir);
        files.sort();
        files
    }

    #[test]
    fn ensure_samples_parse() {
        let mut failures = Vec::new();

        for file in documents(Path::new("tests/samples/")) {
            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let tree = parsing::parse(&content)
                .unwrap_or_else(|e| panic!("Failed to parse file {:?}: {}", file, e));

            if tree.has_error() {
                println!("File {:?} failed to parse:", file);
                for error in tree.errors() {
                    println!("  {}", error);
                }
                failures.push(file);
            }
        }

        if !failures.is_empty() {
            panic!(
                "Sample files should parse cleanly, but {} failed",
                failures.len()
            );
        }
    }

    #[test]
    fn ensure_broken_recovered() {
        let mut unexpected = Vec::new();

        for file in documents(Path::new("tests/broken/")) {
            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let tree = parsing::parse(&content)
                .unwrap_or_else(|e| panic!("Failed to parse file {:?}: {}", file, e));

            if !tree.has_error() {
                println!("File {:?} unexpectedly parsed cleanly", file);
                unexpected.push(file);
            }
        }

        if !unexpected.is_empty() {
            panic!(
                "Broken files should report errors, but {} did not",
                unexpected.len()
            );
        }
    }
}

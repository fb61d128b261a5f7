/// Markdown-based golden tests
///
/// Each file in tests/uic-examples/ holds a `.ui` document under `## Input`, the
/// expected Swift under `## Output` and, for localized examples, the expected
/// `.strings` table under `## Strings`. `{{VERSION}}` in the expected output stands for
/// the crate version.

use similar::{ChangeTag, TextDiff};
use std::fs;
use std::path::PathBuf;

use qlift_uic::transpiler::transform;

/// A parsed golden test case
#[derive(Debug)]
struct UicExample {
    name: String,
    input: String,
    expected_code: String,
    expected_strings: Option<String>,
}

#[derive(PartialEq)]
enum Section {
    None,
    Input,
    Output,
    Strings,
}

fn parse_example(content: &str, filename: &str) -> Result<UicExample, String> {
    let mut name = String::new();
    let mut input = String::new();
    let mut code = String::new();
    let mut strings: Option<String> = None;

    let mut section = Section::None;
    let mut in_code_block = false;

    for line in content.lines() {
        if !in_code_block {
            if let Some(title) = line.strip_prefix("# ") {
                name = title.trim().to_string();
                continue;
            }
            if line.starts_with("## ") {
                section = match line[3..].trim() {
                    "Input" => Section::Input,
                    "Output" => Section::Output,
                    "Strings" => {
                        strings = Some(String::new());
                        Section::Strings
                    }
                    _ => Section::None,
                };
                continue;
            }
        }

        if line.starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }

        if in_code_block {
            let target = match section {
                Section::Input => &mut input,
                Section::Output => &mut code,
                Section::Strings => strings.get_or_insert_with(String::new),
                Section::None => continue,
            };
            target.push_str(line);
            target.push('\n');
        }
    }

    if name.is_empty() {
        return Err(format!("No title found in {}", filename));
    }
    if input.is_empty() {
        return Err(format!("No input section found in {}", filename));
    }
    if code.is_empty() {
        return Err(format!("No output section found in {}", filename));
    }

    Ok(UicExample {
        name,
        input,
        expected_code: code,
        expected_strings: strings,
    })
}

/// Load all examples, sorted by file name
fn load_examples() -> Vec<(String, String)> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("uic-examples");

    let mut examples = Vec::new();
    if let Ok(entries) = fs::read_dir(&dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("md") {
                continue;
            }
            if let Some(filename) = path.file_name().and_then(|s| s.to_str()) {
                if let Ok(content) = fs::read_to_string(&path) {
                    examples.push((filename.to_string(), content));
                }
            }
        }
    }

    examples.sort_by(|a, b| a.0.cmp(&b.0));
    examples
}

/// `03-preferences.md` is the golden output for `preferences.ui`
fn file_stem(filename: &str) -> &str {
    let stem = filename.trim_end_matches(".md");
    match stem.split_once('-') {
        Some((prefix, rest)) if prefix.chars().all(|c| c.is_ascii_digit()) => rest,
        _ => stem,
    }
}

fn diff(expected: &str, actual: &str) -> String {
    let mut out = String::new();
    for change in TextDiff::from_lines(expected, actual).iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        out.push_str(&format!("{}{}", sign, change));
    }
    out
}

#[test]
fn test_parse_example_files() {
    let examples = load_examples();
    assert!(!examples.is_empty(), "No examples found in tests/uic-examples/");

    for (filename, content) in examples {
        let example = parse_example(&content, &filename)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", filename, e));
        assert!(example.input.contains("<ui"), "Input of {} is not a .ui document", filename);
        println!("✓ Parsed {}: {}", filename, example.name);
    }
}

#[test]
fn test_transform_all_examples() {
    let mut failures = Vec::new();

    for (filename, content) in load_examples() {
        let example = parse_example(&content, &filename).expect("Failed to parse example");
        let stem = file_stem(&filename);
        let localize = example.expected_strings.is_some();

        println!("Testing: {} ({})", example.name, filename);

        let result = match transform(example.input.as_bytes(), stem, localize) {
            Ok(result) => result,
            Err(e) => {
                println!("\n=== TRANSFORM ERROR in {} ===\n{}\n", filename, e);
                failures.push(filename.clone());
                continue;
            }
        };

        let expected_code = example
            .expected_code
            .replace("{{VERSION}}", env!("CARGO_PKG_VERSION"));
        if result.code.trim_end() != expected_code.trim_end() {
            println!("\n=== CODE MISMATCH in {} ===", filename);
            println!("{}", diff(expected_code.trim_end(), result.code.trim_end()));
            failures.push(filename.clone());
            continue;
        }

        if let Some(expected_strings) = &example.expected_strings {
            let actual = result.strings.to_strings_file();
            if actual.trim_end() != expected_strings.trim_end() {
                println!("\n=== STRINGS MISMATCH in {} ===", filename);
                println!("{}", diff(expected_strings.trim_end(), actual.trim_end()));
                failures.push(filename.clone());
                continue;
            }
        }

        println!("✓ {}", filename);
    }

    if !failures.is_empty() {
        panic!("\n\n{} examples failed:\n{}\n", failures.len(), failures.join("\n"));
    }
}

#[test]
fn test_examples_are_deterministic() {
    for (filename, content) in load_examples() {
        let example = parse_example(&content, &filename).expect("Failed to parse example");
        let stem = file_stem(&filename);
        let first = transform(example.input.as_bytes(), stem, true).unwrap();
        let second = transform(example.input.as_bytes(), stem, true).unwrap();
        assert_eq!(first, second, "{} is not deterministic", filename);
    }
}

#[test]
fn test_file_stem() {
    assert_eq!(file_stem("03-preferences.md"), "preferences");
    assert_eq!(file_stem("dialog.md"), "dialog");
}

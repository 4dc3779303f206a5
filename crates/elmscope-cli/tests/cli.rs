use std::fs;

use elmscope::pipeline::load_tree;
use elmscope::{ElmscopeOptions, InputOptions, MakeOptions, Task, load_make_settings, run_main};
use elmscope_core::{PrintConfig, PrintFormat, SyntaxKind, parse_tree};
use elmscope_error::ErrorKind;
use elmscope_make::MakeSettings;
use pretty_assertions::assert_eq;

/// ```elm
/// module Main exposing (..)
/// import Dict
/// double n = add n n
/// add a b = a
/// ```
const MAIN: &str = r#"(module
  (module_declaration "module" (upper_case_path Main) "exposing" "(" .. ")")
  (import_clause "import" (upper_case_path Dict))
  (value_declaration (function_declaration_left double (pattern n)) "="
    (expression (list_of_operands (lower_case_path add) (lower_case_path n) (lower_case_path n))))
  (value_declaration (function_declaration_left add (pattern a) (pattern b)) "="
    (expression (list_of_operands (lower_case_path a)))))"#;

fn project() -> (tempfile::TempDir, String) {
    let tmp = tempfile::tempdir().unwrap();
    let main = tmp.path().join("Main.sexp");
    fs::write(&main, MAIN).unwrap();
    let main = main.to_string_lossy().into_owned();
    (tmp, main)
}

fn options(file: &str) -> ElmscopeOptions {
    ElmscopeOptions {
        input: InputOptions::new().with_file(file),
        sequential: true,
        json: true,
        ..Default::default()
    }
}

fn json(opts: &ElmscopeOptions, task: &Task) -> serde_json::Value {
    serde_json::from_str(&run_main(opts, task).unwrap()).unwrap()
}

/// Start offset of the binding site of `name`.
fn binding_offset(file: &str, name: &str) -> usize {
    let tree = load_tree(file).unwrap();
    tree.nodes()
        .find(|n| {
            n.name() == name
                && n.parent().is_some_and(|p| {
                    p.is_kind(SyntaxKind::FunctionDeclarationLeft) || p.is_kind(SyntaxKind::Pattern)
                })
        })
        .unwrap()
        .span()
        .start
}

#[test]
fn names_and_references() {
    let (_tmp, main) = project();
    let opts = options(&main);

    let names = json(&opts, &Task::Names);
    assert_eq!(names[0]["file"], main.as_str());
    let declared: Vec<_> = names[0]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(declared, vec!["double", "add"]);

    let refs = json(&opts, &Task::Refs);
    let summary: Vec<_> = refs[0]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| {
            (
                item["name"].as_str().unwrap().to_string(),
                item["resolution"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("add".to_string(), "resolved".to_string()),
            ("n".to_string(), "resolved".to_string()),
            ("n".to_string(), "resolved".to_string()),
            ("a".to_string(), "resolved".to_string()),
        ]
    );
    assert_eq!(
        refs[0]["items"][0]["target"]["start"],
        binding_offset(&main, "add")
    );
}

#[test]
fn usages_and_rename_at_offset() {
    let (_tmp, main) = project();
    let opts = options(&main);
    let n = binding_offset(&main, "n");

    let usages = json(&opts, &Task::Usages { offset: n });
    assert_eq!(usages[0]["items"].as_array().unwrap().len(), 2);

    let edits = json(
        &opts,
        &Task::Rename {
            offset: n,
            new_name: "count".into(),
        },
    );
    let edits = edits[0]["items"].as_array().unwrap();
    assert_eq!(edits.len(), 3);
    assert_eq!(edits[0]["span"]["start"], n);
    assert!(edits.iter().all(|e| e["new_text"] == "count"));

    let err = run_main(
        &opts,
        &Task::Rename {
            offset: n,
            new_name: "Count".into(),
        },
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidIdentifier);
}

#[test]
fn usages_need_a_single_tree() {
    let (tmp, main) = project();
    let other = tmp.path().join("Other.sexp");
    fs::write(&other, MAIN).unwrap();
    let mut opts = options(&main);
    opts.input = opts.input.with_file(other.to_string_lossy());

    let err = run_main(&opts, &Task::Usages { offset: 0 }).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn unused_imports_as_text() {
    let (_tmp, main) = project();
    let mut opts = options(&main);
    opts.json = false;

    let text = run_main(&opts, &Task::UnusedImports).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(format!("{main}:").as_str()));
    assert!(lines.next().unwrap().ends_with("unused import Dict"));
    assert_eq!(lines.next(), None);
}

#[test]
fn malformed_trees_are_skipped_in_directories() {
    let (tmp, _main) = project();
    fs::write(tmp.path().join("Broken.sexp"), "(module (value_declaration").unwrap();
    let deep = format!("{}x{}", "(pattern ".repeat(5_000), ")".repeat(5_000));
    fs::write(tmp.path().join("Deep.sexp"), deep).unwrap();
    fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

    let opts = ElmscopeOptions {
        input: InputOptions::new().with_dir(tmp.path().to_string_lossy()),
        json: true,
        ..Default::default()
    };
    let names = json(&opts, &Task::Names);
    let files = names.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0]["file"].as_str().unwrap().ends_with("Main.sexp"));
}

#[test]
fn print_compact_reads_back() {
    let (_tmp, main) = project();
    let mut opts = options(&main);
    opts.json = false;

    let config = PrintConfig::new().with_format(PrintFormat::Compact);
    let printed = run_main(&opts, &Task::Print { config }).unwrap();
    let reparsed = parse_tree(&printed).unwrap();
    assert_eq!(reparsed.len(), load_tree(&main).unwrap().len());
}

#[test]
fn make_settings_and_disabled_make() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("custom.toml");
    fs::write(&config, "[make]\nenabled = false\n").unwrap();

    let settings = load_make_settings(
        &MakeOptions::new()
            .with_config(Some(config.to_string_lossy().into_owned()))
            .with_elm_make(Some("/opt/elm-make".into())),
        tmp.path(),
    )
    .unwrap();
    assert_eq!(
        settings,
        MakeSettings::default()
            .with_enabled(false)
            .with_executable("/opt/elm-make")
    );

    let source = tmp.path().join("Main.elm");
    fs::write(&source, "module Main exposing (..)\n").unwrap();
    let opts = options(&source.to_string_lossy());
    let reports = json(&opts, &Task::Make { settings });
    assert_eq!(reports[0]["items"].as_array().unwrap().len(), 0);
}

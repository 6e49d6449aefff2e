//! End-to-end scenarios exercising the full parse -> resolve -> validate ->
//! fold -> transform -> emit pipeline through a single [`compile`] call.

use eligian_core::{compile, CompileOptions};
use eligian_workspace::{CancellationToken, InMemoryFileSystemProvider};

fn provider_with(files: &[(&str, &str)]) -> Box<InMemoryFileSystemProvider> {
    let fs = InMemoryFileSystemProvider::new();
    for (path, contents) in files {
        fs.set_file(*path, *contents);
    }
    Box::new(fs)
}

#[test]
fn single_library_import_lowers_the_action_call() {
    let fs = provider_with(&[
        ("animations.eligian", "library animations\naction fadeIn(selector, duration) { selectElement(selector); }"),
        (
            "main.eligian",
            "import { fadeIn } from \"./animations.eligian\"\n\
             timeline \"t\" in \"#s\" using raf { at 0s..1s { fadeIn(\"#el\", 1000); } }",
        ),
    ]);
    let outcome = compile("main.eligian", fs, &CompileOptions::default(), &CancellationToken::new()).unwrap();
    assert!(!outcome.has_errors(), "{:?}", outcome.diagnostics);
    let json = outcome.json.unwrap();
    let ops = &json["timelines"][0]["timelineActions"][0]["startOperations"];
    assert_eq!(ops[0]["systemName"], "requestAction");
    assert_eq!(ops[1]["systemName"], "startAction");
    let data = &ops[1]["operationData"]["actionOperationData"];
    assert_eq!(data["selector"], "#el");
    assert_eq!(data["duration"], 1000);
}

#[test]
fn nested_library_import_merges_both_underlying_actions() {
    let fs = provider_with(&[
        ("libs/base.eligian", "library base\naction selectAndLog(selector) { selectElement(selector); log(selector); }"),
        (
            "libs/extended.eligian",
            "library extended\nimport { selectAndLog } from \"./base.eligian\"\n\
             action selectLogAndAnimate(selector) { selectAndLog(selector); }",
        ),
        (
            "main.eligian",
            "import { selectLogAndAnimate } from \"./libs/extended.eligian\"\n\
             timeline \"t\" in \"#s\" using raf { at 0s..1s { selectLogAndAnimate(\"#el\"); } }",
        ),
    ]);
    let outcome = compile("main.eligian", fs, &CompileOptions::default(), &CancellationToken::new()).unwrap();
    assert!(!outcome.has_errors(), "{:?}", outcome.diagnostics);
    let json = outcome.json.unwrap();
    let actions = json["actions"].as_array().unwrap();
    assert!(actions.iter().any(|a| a["name"] == "selectAndLog"));
    assert!(actions.iter().any(|a| a["name"] == "selectLogAndAnimate"));
}

#[test]
fn constant_folding_with_expressions_produces_no_init_actions() {
    let fs = provider_with(&[(
        "main.eligian",
        "const BASE = 100;\nconst MUL = 2;\nconst DELAY = @BASE * @MUL;\n\
         timeline \"t\" in \"#s\" using raf { at 0s..1s { wait(@DELAY); } }",
    )]);
    let outcome = compile("main.eligian", fs, &CompileOptions::default(), &CancellationToken::new()).unwrap();
    assert!(!outcome.has_errors(), "{:?}", outcome.diagnostics);
    let json = outcome.json.unwrap();
    let ops = &json["timelines"][0]["timelineActions"][0]["startOperations"];
    let wait_op = ops.as_array().unwrap().iter().find(|op| op["systemName"] == "wait").unwrap();
    assert_eq!(wait_op["operationData"]["milliseconds"], 200);
    assert_eq!(json["initActions"].as_array().unwrap().len(), 0);
}

#[test]
fn argument_arity_mismatch_for_events_warns_without_suppressing_emission() {
    let fs = provider_with(&[(
        "main.eligian",
        "on event \"before-request-video-url\" action handleUrl(index, position) { log(index); }\n\
         timeline \"t\" in \"#s\" using raf { at 0s..1s { log(\"hi\"); } }",
    )]);
    let outcome = compile("main.eligian", fs, &CompileOptions::default(), &CancellationToken::new()).unwrap();
    let warning = outcome
        .diagnostics
        .iter()
        .find(|d| d.message.contains("provides 3") && d.message.contains("declares 2"))
        .expect("expected an arity-mismatch warning");
    assert!(!warning.is_error());
    assert!(outcome.json.is_some());
}

#[test]
fn invalid_css_selector_syntax_is_reported() {
    let fs = provider_with(&[(
        "main.eligian",
        "timeline \"t\" in \"#s\" using raf { at 0s..1s { selectElement(\".button[\"); } }",
    )]);
    let outcome = compile("main.eligian", fs, &CompileOptions::default(), &CancellationToken::new()).unwrap();
    assert!(outcome.has_errors());
    assert!(outcome.json.is_none());
    assert!(outcome.diagnostics.iter().any(|d| d.message.contains("not a syntactically valid CSS selector")));
}

#[test]
fn entry_file_that_is_a_library_is_rejected() {
    let fs = provider_with(&[("main.eligian", "library just_a_lib\naction noop() { log(\"x\"); }")]);
    let outcome = compile("main.eligian", fs, &CompileOptions::default(), &CancellationToken::new()).unwrap();
    assert!(outcome.has_errors());
    assert!(outcome.json.is_none());
    assert!(outcome.diagnostics.iter().any(|d| d.message.contains("must be a program")));
}

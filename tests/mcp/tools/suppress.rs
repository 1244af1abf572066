use hushlint::mcp::{
    HushlintMcpServer,
    types::{DiagnosticInput, SuppressSourceParams},
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

const TODO: &str = "TODO: Fix this the next time the file is edited.";

fn error(line: usize, rule_id: &str) -> DiagnosticInput {
    DiagnosticInput {
        line,
        rule_id: rule_id.to_string(),
        severity: None,
    }
}

fn params(source: &str, file_path: &str, diagnostics: Vec<DiagnosticInput>) -> SuppressSourceParams {
    SuppressSourceParams {
        source: source.to_string(),
        file_path: file_path.to_string(),
        diagnostics,
        message: None,
        rules: None,
        inline: None,
        project_root_path: None,
    }
}

#[tokio::test]
async fn test_suppress_source_inserts_directive() {
    let server = HushlintMcpServer::new();
    let source = "function foo(a, b) {\n  return a == b;\n}\n";

    let result = server
        .suppress_source(Parameters(params(source, "foo.js", vec![error(2, "eqeqeq")])))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["changed"], true);
    assert_eq!(json_result["inserted"], 1);
    assert_eq!(
        json_result["source"],
        format!("function foo(a, b) {{\n  // eslint-disable-next-line eqeqeq -- {TODO}\n  return a == b;\n}}\n")
    );
}

#[tokio::test]
async fn test_suppress_source_merges_existing_directive() {
    let server = HushlintMcpServer::new();
    let source = "// eslint-disable-next-line eqeqeq -- legacy\nfoo(a == b);\n";

    let result = server
        .suppress_source(Parameters(params(
            source,
            "foo.ts",
            vec![error(2, "eqeqeq"), error(2, "no-undef")],
        )))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["merged"], 1);
    assert_eq!(json_result["alreadySuppressed"], 1);
    assert_eq!(
        json_result["source"],
        "// eslint-disable-next-line eqeqeq, no-undef -- legacy\nfoo(a == b);\n"
    );
}

#[tokio::test]
async fn test_suppress_source_ignores_warnings() {
    let server = HushlintMcpServer::new();
    let source = "foo(a == b);\n";
    let warning = DiagnosticInput {
        severity: Some(1),
        ..error(1, "eqeqeq")
    };

    let result = server
        .suppress_source(Parameters(params(source, "foo.js", vec![warning])))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["changed"], false);
    assert_eq!(json_result["source"], source);
}

#[tokio::test]
async fn test_suppress_source_uses_project_config() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({ "inline": true, "message": "from config" }))
        .unwrap();
    let server = HushlintMcpServer::new();

    let mut request = params("foo(a == b);\n", "foo.js", vec![error(1, "eqeqeq")]);
    request.project_root_path = Some(fixture.root());

    let result = server.suppress_source(Parameters(request)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(
        json_result["source"],
        "foo(a == b); // eslint-disable-line eqeqeq -- from config\n"
    );
}

#[tokio::test]
async fn test_suppress_source_reports_skipped() {
    let server = HushlintMcpServer::new();

    let result = server
        .suppress_source(Parameters(params("foo();\n\nbar();\n", "foo.js", vec![error(2, "no-undef")])))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["changed"], false);
    let skipped = json_result["skipped"].as_array().unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0]["line"], 2);
    assert_eq!(skipped[0]["ruleId"], "no-undef");
}

#[tokio::test]
async fn test_suppress_source_parse_error() {
    let server = HushlintMcpServer::new();

    let result = server
        .suppress_source(Parameters(params("const = ;", "broken.js", vec![error(1, "no-undef")])))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_suppress_source_rejects_multiline_message() {
    let server = HushlintMcpServer::new();
    let mut request = params("foo(a == b);\n", "foo.js", vec![error(1, "eqeqeq")]);
    request.message = Some("first\nsecond".to_string());

    assert!(server.suppress_source(Parameters(request)).await.is_err());
}

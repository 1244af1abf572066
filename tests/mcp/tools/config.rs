use hushlint::mcp::{HushlintMcpServer, types::GetConfigParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let server = HushlintMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(
        json_result["config"]["message"],
        "TODO: Fix this the next time the file is edited."
    );
    assert_eq!(json_result["config"]["inline"], false);
    assert_eq!(json_result["config"]["useIgnoreFiles"], true);
    assert!(json_result["config"]["rules"].is_array());
    assert!(json_result["config"]["baseConfig"].is_null());
    assert_eq!(json_result["fromFile"], false);
}

#[tokio::test]
async fn test_get_config_from_hushlintrc() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "message": "Legacy code, see #42",
            "rules": ["eqeqeq"],
            "baseConfig": ".eslintrc.strict.json"
        }))
        .unwrap();

    let server = HushlintMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["config"]["message"], "Legacy code, see #42");
    assert_eq!(json_result["config"]["rules"], json!(["eqeqeq"]));
    assert_eq!(json_result["config"]["baseConfig"], ".eslintrc.strict.json");
}

#[tokio::test]
async fn test_get_config_invalid_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({ "ignores": ["[unclosed"] }))
        .unwrap();

    let server = HushlintMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    assert!(server.get_config(params).await.is_err());
}

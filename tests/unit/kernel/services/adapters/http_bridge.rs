use super::*;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(command: &str, cwd: &str) -> ExecRequest {
    ExecRequest {
        command: command.to_string(),
        current_directory: cwd.to_string(),
    }
}

#[tokio::test]
async fn posts_command_and_returns_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/execute"))
        .and(body_json(serde_json::json!({
            "command": "ls",
            "currentDirectory": "proj"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "output": "a\nb\n" })),
        )
        .mount(&server)
        .await;

    let bridge = HttpExecutionBridge::new(&server.uri()).unwrap();
    let output = bridge.execute(request("ls", "proj")).await.unwrap();
    assert_eq!(output.stdout, "a\nb\n");
    assert_eq!(output.new_directory, None);
}

#[tokio::test]
async fn new_directory_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "output": "",
            "newDirectory": "proj/src"
        })))
        .mount(&server)
        .await;

    let bridge = HttpExecutionBridge::new(&format!("{}/", server.uri())).unwrap();
    let output = bridge.execute(request("cd src", "proj")).await.unwrap();
    assert_eq!(output.new_directory.as_deref(), Some("proj/src"));
}

#[tokio::test]
async fn non_success_status_carries_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/execute"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "error": "sh: nope: not found" })),
        )
        .mount(&server)
        .await;

    let bridge = HttpExecutionBridge::new(&server.uri()).unwrap();
    let err = bridge.execute(request("nope", "")).await.unwrap_err();
    assert_eq!(err, ExecError::Remote("sh: nope: not found".to_string()));
}

#[tokio::test]
async fn non_success_without_body_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/execute"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let bridge = HttpExecutionBridge::new(&server.uri()).unwrap();
    match bridge.execute(request("ls", "")).await {
        Err(ExecError::Remote(message)) => assert!(message.contains("502")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn garbage_success_body_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let bridge = HttpExecutionBridge::new(&server.uri()).unwrap();
    assert!(matches!(
        bridge.execute(request("ls", "")).await,
        Err(ExecError::Transport(_))
    ));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    // 端口 9 (discard) 上通常没有 HTTP 服务
    let bridge = HttpExecutionBridge::new("http://127.0.0.1:9").unwrap();
    assert!(matches!(
        bridge.execute(request("ls", "")).await,
        Err(ExecError::Transport(_))
    ));
}

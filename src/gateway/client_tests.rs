//! Tests for the HTTP gateway against a scripted local responder.

use super::*;
use crate::domain::{ActivityKind, BotStatus, SortBy};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

/// What the responder does with one incoming connection.
enum Reply {
    Json(u16, &'static str),
    Hangup,
}

#[derive(Debug, Clone)]
struct Recorded {
    /// e.g. "GET /api/bot/status HTTP/1.1"
    line: String,
    body: String,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

async fn spawn_responder(replies: Vec<Reply>) -> (String, Log) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let recorded = log.clone();

    tokio::spawn(async move {
        for reply in replies {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let request = read_request(&mut socket).await;
            recorded.lock().await.push(request);

            if let Reply::Json(status, body) = reply {
                let response = format!(
                    "HTTP/1.1 {} Scripted\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        }
    });

    (format!("http://{}/api", addr), log)
}

async fn read_request(socket: &mut TcpStream) -> Recorded {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = (head_end + 4).min(buf.len());
    while buf.len() < body_start + content_length {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body_end = (body_start + content_length).min(buf.len());
    Recorded {
        line: head.lines().next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&buf[body_start..body_end]).to_string(),
    }
}

fn gateway(base_url: &str, retries: u32) -> HttpGateway {
    HttpGateway::new(&ApiConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
        retries,
    })
    .unwrap()
}

const STATUS_JSON: &str = r#"{
    "bot_status": "running",
    "mode": "paper",
    "portfolio": {
        "total_value": 1000.0, "cash_balance": 900.0, "positions_value": 100.0,
        "total_pnl": 0.0, "total_return_pct": 0.0, "realized_pnl": 0.0,
        "unrealized_pnl": 0.0, "num_open_positions": 1, "total_trades": 2
    },
    "active_strategies": ["fullset"],
    "uptime_seconds": 61.5
}"#;

const SETTINGS_JSON: &str = r#"{
    "risk_appetite": 0.25,
    "strategies_enabled": {"fullset": false, "endgame": true, "oracle": false, "rewards": true},
    "max_capital": 500.0
}"#;

#[tokio::test]
async fn test_status_parses_response() {
    let (url, log) = spawn_responder(vec![Reply::Json(200, STATUS_JSON)]).await;
    let status = gateway(&url, 0).status().await.unwrap();

    assert_eq!(status.bot_status, BotStatus::Running);
    assert_eq!(status.uptime_seconds, 61.5);
    assert_eq!(log.lock().await[0].line, "GET /api/bot/status HTTP/1.1");
}

#[tokio::test]
async fn test_activity_sends_limit() {
    let body = r#"[{"timestamp": "10:00:00", "type": "scan", "message": "Scanning"}]"#;
    let (url, log) = spawn_responder(vec![Reply::Json(200, body)]).await;
    let entries = gateway(&url, 0).activity(Some(20)).await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, ActivityKind::Scan);
    assert_eq!(log.lock().await[0].line, "GET /api/bot/activity?limit=20 HTTP/1.1");
}

#[tokio::test]
async fn test_opportunities_builds_query() {
    let (url, log) = spawn_responder(vec![Reply::Json(200, "[]")]).await;
    let query = OpportunityQuery {
        limit: Some(5),
        min_edge: Some(1.5),
        sort_by: Some(SortBy::Annualized),
        ..OpportunityQuery::default()
    };
    let opportunities = gateway(&url, 0)
        .opportunities(StrategyType::Endgame, &query)
        .await
        .unwrap();

    assert!(opportunities.is_empty());
    assert_eq!(
        log.lock().await[0].line,
        "GET /api/strategies/opportunities/endgame?limit=5&min_edge=1.5&sort_by=annualized HTTP/1.1"
    );
}

#[tokio::test]
async fn test_start_forwards_preset() {
    let body = r#"{"success": true, "status": "running", "preset": "safe", "message": "Bot started"}"#;
    let (url, log) = spawn_responder(vec![Reply::Json(200, body)]).await;
    let reply = gateway(&url, 0).start("safe").await.unwrap();

    assert_eq!(reply.message, "Bot started");
    assert_eq!(reply.status, Some(BotStatus::Running));

    let recorded = log.lock().await;
    assert_eq!(recorded[0].line, "POST /api/bot/start HTTP/1.1");
    assert_eq!(recorded[0].body, r#"{"preset":"safe"}"#);
}

#[tokio::test]
async fn test_stop_sends_no_body() {
    let body = r#"{"success": false, "status": "stopped", "message": "Bot was already stopped"}"#;
    let (url, log) = spawn_responder(vec![Reply::Json(200, body)]).await;
    let reply = gateway(&url, 0).stop().await.unwrap();

    assert_eq!(reply.success, Some(false));
    let recorded = log.lock().await;
    assert_eq!(recorded[0].line, "POST /api/bot/stop HTTP/1.1");
    assert!(recorded[0].body.is_empty());
}

#[tokio::test]
async fn test_update_settings_accepts_wrapped_echo() {
    let body = r#"{"success": true, "settings": {
        "risk_appetite": 0.75,
        "strategies_enabled": {"fullset": true, "endgame": true, "oracle": true, "rewards": false},
        "max_capital": 2000.0
    }}"#;
    let (url, log) = spawn_responder(vec![Reply::Json(200, body)]).await;
    let update = SettingsUpdate {
        max_capital: Some(2000.0),
        ..SettingsUpdate::default()
    };
    let settings = gateway(&url, 0).update_settings(&update).await.unwrap();

    assert_eq!(settings.risk_appetite, 0.75);
    assert_eq!(settings.max_capital, 2000.0);
    assert_eq!(log.lock().await[0].body, r#"{"max_capital":2000.0}"#);
}

#[tokio::test]
async fn test_update_settings_accepts_bare_echo() {
    let (url, _log) = spawn_responder(vec![Reply::Json(200, SETTINGS_JSON)]).await;
    let settings = gateway(&url, 0)
        .update_settings(&SettingsUpdate::default())
        .await
        .unwrap();
    assert_eq!(settings.max_capital, 500.0);
}

#[tokio::test]
async fn test_error_detail_is_unpacked() {
    let body = r#"{"detail": "Unknown strategy: martingale"}"#;
    let (url, _log) = spawn_responder(vec![Reply::Json(400, body)]).await;
    let err = gateway(&url, 0).settings().await.unwrap_err();

    assert_eq!(
        err,
        GatewayError::Status {
            status: 400,
            message: "Unknown strategy: martingale".to_string()
        }
    );
    assert_eq!(err.kind(), super::super::ErrorKind::Remote);
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let (url, log) = spawn_responder(vec![
        Reply::Json(500, r#"{"detail": "boom"}"#),
        Reply::Json(200, SETTINGS_JSON),
    ])
    .await;
    let result = gateway(&url, 3).settings().await;

    assert!(matches!(result, Err(GatewayError::Status { status: 500, .. })));
    assert_eq!(log.lock().await.len(), 1);
}

#[tokio::test]
async fn test_malformed_body() {
    let (url, _log) = spawn_responder(vec![Reply::Json(200, r#"{"bot_status": 7}"#)]).await;
    let err = gateway(&url, 0).status().await.unwrap_err();
    assert!(matches!(err, GatewayError::Malformed(_)));
}

#[tokio::test]
async fn test_get_retries_after_hangup() {
    let (url, log) = spawn_responder(vec![Reply::Hangup, Reply::Json(200, SETTINGS_JSON)]).await;
    let settings = gateway(&url, 1).settings().await.unwrap();

    assert_eq!(settings.risk_appetite, 0.25);
    assert_eq!(log.lock().await.len(), 2);
}

#[tokio::test]
async fn test_post_is_not_retried_after_hangup() {
    let (url, log) = spawn_responder(vec![
        Reply::Hangup,
        Reply::Json(200, r#"{"message": "Bot started"}"#),
    ])
    .await;
    let err = gateway(&url, 1).start("balanced").await.unwrap_err();

    assert!(err.is_transient());
    assert_eq!(log.lock().await.len(), 1);
}

#[tokio::test]
async fn test_connection_refused_is_transport() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = gateway(&format!("http://{}/api", addr), 1)
        .status()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), super::super::ErrorKind::Transport);
}

#[tokio::test]
async fn test_apply_preset_encodes_path() {
    let body = r#"{"success": true, "preset": "my preset", "settings": {
        "risk_appetite": 0.5,
        "strategies_enabled": {"fullset": true, "endgame": true, "oracle": false, "rewards": true},
        "max_capital": 1000.0
    }}"#;
    let (url, log) = spawn_responder(vec![Reply::Json(200, body)]).await;
    gateway(&url, 0).apply_preset("my preset").await.unwrap();

    assert_eq!(
        log.lock().await[0].line,
        "POST /api/settings/preset/my%20preset HTTP/1.1"
    );
}

#[tokio::test]
async fn test_close_position_requires_token() {
    let gateway = gateway("http://127.0.0.1:9/api", 0);
    let err = gateway.close_position("  ").await.unwrap_err();
    assert!(matches!(err, GatewayError::Validation(_)));
}

#[tokio::test]
async fn test_scan_all_groups_by_strategy() {
    let body = r#"{"fullset": [{
        "id": "e1", "name": "Event", "strategy": "fullset",
        "edge": 0.01, "edge_pct": 1.0, "liquidity": 800.0
    }], "endgame": []}"#;
    let (url, log) = spawn_responder(vec![Reply::Json(200, body)]).await;
    let all = gateway(&url, 0).scan_all(Some(5)).await.unwrap();

    assert_eq!(all["fullset"].len(), 1);
    assert!(all["endgame"].is_empty());
    assert_eq!(log.lock().await[0].line, "GET /api/strategies/all?limit=5 HTTP/1.1");
}

#[tokio::test]
async fn test_health() {
    let (url, _log) = spawn_responder(vec![Reply::Json(200, r#"{"status": "healthy"}"#)]).await;
    assert_eq!(gateway(&url, 0).health().await.unwrap(), "healthy");
}

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let gateway = gateway("http://localhost:8000/api/", 0);
    assert_eq!(gateway.base_url(), "http://localhost:8000/api");
}

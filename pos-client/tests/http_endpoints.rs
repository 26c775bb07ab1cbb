// pos-client/tests/http_endpoints.rs
// HttpClient against a local axum stand-in for the POS server

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use pos_client::{ClientConfig, ClientError, HttpClient, OccupancySource, TableSession};
use pos_client::session::Navigator;
use shared::order::{LineRegistry, OrderLine, OrderSubmission};
use shared::Decimal;
use std::sync::{Arc, Mutex};

const TOKEN: &str = "secret";

struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn return_to_overview(&mut self, _table: &str) {}
}

async fn spawn_server(received: Arc<Mutex<Vec<OrderSubmission>>>) -> String {
    let app = Router::new()
        .route(
            "/fetch/service",
            get(|headers: HeaderMap| async move {
                let authorized = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    == Some("Bearer secret");
                if authorized {
                    Ok(Json(vec!["T3", "T1"]))
                } else {
                    Err(StatusCode::UNAUTHORIZED)
                }
            }),
        )
        .route(
            "/fetch/bar/{name}",
            get(|Path(name): Path<String>| async move {
                if name == "Staff" {
                    return (StatusCode::FORBIDDEN, "Staff bar is not public".to_string());
                }
                (StatusCode::OK, format!("<ul id=\"{name}\"></ul>"))
            }),
        )
        .route(
            "/service/{table}",
            post(move |Path(table): Path<String>, Json(body): Json<OrderSubmission>| {
                let received = Arc::clone(&received);
                async move {
                    if body.table != table || body.items.is_empty() {
                        return (StatusCode::BAD_REQUEST, "Error! Invalid order");
                    }
                    received.lock().unwrap().push(body);
                    (StatusCode::OK, "ok")
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_fetch_occupied_tables() {
    let base = spawn_server(Arc::default()).await;
    let client = HttpClient::new(&ClientConfig::new(&base).with_token(TOKEN)).unwrap();

    let snapshot = client.fetch_occupancy().await.unwrap();
    let tables: Vec<_> = snapshot.iter().cloned().collect();
    assert_eq!(tables, vec!["T1", "T3"]);
}

#[tokio::test]
async fn test_status_mapping() {
    let base = spawn_server(Arc::default()).await;
    let anonymous = HttpClient::new(&ClientConfig::new(&base)).unwrap();

    let err = anonymous.fetch_occupied_tables().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));

    let err = anonymous.get_text("fetch/nothing-here").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));

    let err = anonymous.fetch_bar_fragment("Staff").await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(ref body) if body == "Staff bar is not public"));
}

#[tokio::test]
async fn test_fetch_bar_fragment() {
    let base = spawn_server(Arc::default()).await;
    let client = HttpClient::new(&ClientConfig::new(&base)).unwrap();

    let fragment = client.fetch_bar_fragment("Drinks").await.unwrap();
    assert_eq!(fragment, "<ul id=\"Drinks\"></ul>");
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    let client = HttpClient::new(&ClientConfig::new("http://127.0.0.1:9").with_timeout(1)).unwrap();
    let err = client.fetch_occupied_tables().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}

#[tokio::test]
async fn test_session_submit() {
    let received = Arc::new(Mutex::new(Vec::new()));
    let base = spawn_server(Arc::clone(&received)).await;
    let client = HttpClient::new(&ClientConfig::new(&base)).unwrap();

    let registry = LineRegistry::from_lines([
        OrderLine::new(1, "Fries", Decimal::new(250, 2)),
        OrderLine::new(2, "Cola", Decimal::from(2)),
    ])
    .unwrap();
    let mut session = TableSession::new("T1", registry, NoopNavigator);

    // Nothing selected, nothing sent
    assert!(session.submit(&client).await.unwrap().is_none());

    session.adjust_quantity(2, 3);
    session.set_comment(2, "no ice");
    let sent = session.submit(&client).await.unwrap().unwrap();

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].nonce, sent.nonce);
    assert_eq!(received[0].items[0].product_id, 2);
    assert_eq!(received[0].items[0].amount, Decimal::from(3));
    assert_eq!(received[0].items[0].comment, "no ice");
}

#[tokio::test]
async fn test_rejected_submission_is_validation_error() {
    let base = spawn_server(Arc::default()).await;
    let client = HttpClient::new(&ClientConfig::new(&base)).unwrap();

    let submission = OrderSubmission {
        table: "T1".into(),
        nonce: 1,
        items: Vec::new(),
    };
    let err = client.submit_order(&submission).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(ref body) if body.contains("Invalid order")));
}

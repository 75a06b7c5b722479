//! Client tests against an in-process mock backend.

use std::convert::Infallible;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use chrono::NaiveDate;
use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use shiftboard_lib::ShiftboardClient;
use shiftboard_lib::api::ListParams;
use shiftboard_lib::auth::Session;
use shiftboard_lib::auth::StaticTokenProvider;
use shiftboard_lib::error::ApiError;
use shiftboard_lib::error::Error;
use shiftboard_lib::form::EmployeeDraft;
use shiftboard_lib::form::SolverConstraints;
use shiftboard_lib::model::RunStatus;
use shiftboard_lib::rate_limit::RetryConfig;
use tokio::net::TcpListener;

// =============================================================================
// Mock backend
// =============================================================================

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    authorization: Option<String>,
    body: String,
}

struct Reply {
    status: u16,
    body: String,
    retry_after: Option<&'static str>,
}

impl Reply {
    fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            retry_after: None,
        }
    }
}

type Handler = Arc<dyn Fn(&Recorded) -> Reply + Send + Sync>;

struct MockServer {
    url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockServer {
    async fn start(handler: impl Fn(&Recorded) -> Reply + Send + Sync + 'static) -> Self {
        let handler: Handler = Arc::new(handler);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let log = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let handler = handler.clone();
                let log = log.clone();
                let service = service_fn(move |req: Request<Incoming>| {
                    let handler = handler.clone();
                    let log = log.clone();
                    async move {
                        let recorded = record(req).await;
                        log.lock().unwrap().push(recorded.clone());
                        let reply = handler(&recorded);
                        let mut response = Response::builder()
                            .status(reply.status)
                            .header("Content-Type", "application/json");
                        if let Some(secs) = reply.retry_after {
                            response = response.header("Retry-After", secs);
                        }
                        Ok::<_, Infallible>(response.body(Full::new(Bytes::from(reply.body))).unwrap())
                    }
                });
                tokio::spawn(async move {
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self { url, requests }
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn client(&self, session: &Session) -> ShiftboardClient {
        ShiftboardClient::builder()
            .url(&self.url)
            .session(session.clone())
            .retry(
                RetryConfig::default()
                    .initial_delay(Duration::from_millis(5))
                    .max_delay(Duration::from_millis(20)),
            )
            .build()
            .unwrap()
    }
}

async fn record(req: Request<Incoming>) -> Recorded {
    let method = req.method().to_string();
    let path = req
        .uri()
        .path_and_query()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();
    let authorization = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = req.into_body().collect().await.unwrap().to_bytes();
    Recorded {
        method,
        path,
        authorization,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

fn employee_json(id: i64, name: &str, active: bool) -> String {
    format!(
        r#"{{"id": {id}, "name": "{name}", "email": "{name}@example.com", "phone": null,
            "position": null, "skills": [], "availability": {{}}, "preferences": {{}},
            "hourly_rate": 10.0, "is_active": {active}, "created_at": "2024-05-01T08:00:00",
            "updated_at": null}}"#
    )
}

fn run_json(run_id: &str, status: &str) -> String {
    format!(
        r#"{{"id": 1, "run_id": "{run_id}", "status": "{status}", "start_date": null,
            "end_date": null, "objective_value": null, "solve_time": null,
            "assignments_count": 0, "created_at": "2024-06-01T10:00:00"}}"#
    )
}

// =============================================================================
// Requests and authentication
// =============================================================================

#[tokio::test]
async fn test_list_sends_bearer_and_paging() {
    let server = MockServer::start(|_| {
        Reply::json(200, format!("[{},{}]", employee_json(1, "ana", true), employee_json(2, "bob", false)))
    })
    .await;
    let session = Session::with_token("secret");
    let client = server.client(&session);

    let employees = client
        .list_employees(ListParams::new().limit(50).active_only(false))
        .await
        .unwrap();

    assert_eq!(employees.len(), 2);
    assert!(!employees[1].is_active);
    let requests = server.requests();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/api/employees?skip=0&limit=50&active_only=false");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer secret"));
}

#[tokio::test]
async fn test_no_token_sends_no_authorization() {
    let server = MockServer::start(|_| Reply::json(200, r#"{"status":"healthy"}"#)).await;
    let client = server.client(&Session::new());

    let health = client.health().await.unwrap();

    assert!(health.is_healthy());
    assert!(server.requests()[0].authorization.is_none());
}

#[tokio::test]
async fn test_unauthorized_clears_session() {
    let server = MockServer::start(|_| Reply::json(401, r#"{"detail":"Token inválido"}"#)).await;
    let session = Session::with_token("stale");
    let client = server.client(&session);

    let err = client.current_user().await.unwrap_err();

    assert!(matches!(err, Error::Unauthorized));
    assert!(!session.is_authenticated().await);
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_static_token_survives_unauthorized() {
    let server = MockServer::start(|_| Reply::json(401, r#"{"detail":"Not authenticated"}"#)).await;
    let client = ShiftboardClient::builder()
        .url(&server.url)
        .token_provider(StaticTokenProvider::new("service"))
        .build()
        .unwrap();

    assert!(matches!(client.health().await, Err(Error::Unauthorized)));
    assert!(matches!(client.health().await, Err(Error::Unauthorized)));

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer service"));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = MockServer::start(|_| Reply::json(200, r#"{"message":"ok"}"#)).await;
    let session = Session::with_token("secret");
    let client = server.client(&session);

    client.logout().await.unwrap();

    assert!(!session.is_authenticated().await);
    assert_eq!(server.requests()[0].path, "/api/auth/logout");
}

// =============================================================================
// Errors and retries
// =============================================================================

#[tokio::test]
async fn test_missing_employee_is_not_found() {
    let server = MockServer::start(|_| Reply::json(404, r#"{"detail":"Empleado no encontrado"}"#)).await;
    let client = server.client(&Session::with_token("t"));

    let err = client.get_employee(42).await.unwrap_err();

    match err {
        Error::NotFound { resource, id } => {
            assert_eq!(resource, "employee");
            assert_eq!(id, "42");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_backend_detail_becomes_message() {
    let server = MockServer::start(|_| Reply::json(400, r#"{"detail":"Email ya registrado"}"#)).await;
    let client = server.client(&Session::with_token("t"));

    let err = client
        .create_employee(&EmployeeDraft::new("Ana", "ana@example.com"))
        .await
        .unwrap_err();

    match err {
        Error::Api(ApiError::Http { status, message, .. }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Email ya registrado");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_draft_is_never_sent() {
    let server = MockServer::start(|_| Reply::json(200, "{}")).await;
    let client = server.client(&Session::with_token("t"));

    let err = client
        .create_employee(&EmployeeDraft::new("", "nope"))
        .await
        .unwrap_err();

    match err {
        Error::Validation(errors) => {
            assert!(errors.has("name"));
            assert!(errors.has("email"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let server = MockServer::start(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Reply::json(503, r#"{"detail":"busy"}"#)
        } else {
            Reply::json(200, "[]")
        }
    })
    .await;
    let client = server.client(&Session::with_token("t"));

    let shifts = client.list_shifts(ListParams::default()).await.unwrap();

    assert!(shifts.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_rate_limit_honors_retry_after() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let server = MockServer::start(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Reply {
                status: 429,
                body: String::new(),
                retry_after: Some("0"),
            }
        } else {
            Reply::json(200, "[]")
        }
    })
    .await;
    let client = server.client(&Session::with_token("t"));

    client.list_runs(ListParams::default()).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_server_error_without_retry_surfaces() {
    let server = MockServer::start(|_| Reply::json(500, "boom")).await;
    let client = ShiftboardClient::builder()
        .url(&server.url)
        .session(Session::with_token("t"))
        .retry(RetryConfig::no_retry())
        .build()
        .unwrap();

    let err = client.health().await.unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert_eq!(server.requests().len(), 1);
}

// =============================================================================
// Solver
// =============================================================================

#[tokio::test]
async fn test_solve_wraps_constraints() {
    let server = MockServer::start(|_| Reply::json(200, run_json("abc", "pending"))).await;
    let client = server.client(&Session::with_token("t"));
    let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

    let run = client.solve(&SolverConstraints::for_week(start)).await.unwrap();

    assert_eq!(run.status, RunStatus::Pending);
    let request = &server.requests()[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/solver/solve");
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["constraints"]["start_date"], "2024-06-03T00:00:00");
    assert_eq!(body["constraints"]["end_date"], "2024-06-09T00:00:00");
}

#[tokio::test]
async fn test_run_id_is_percent_encoded() {
    let server = MockServer::start(|_| Reply::json(200, r#"{"errors": []}"#)).await;
    let client = server.client(&Session::with_token("t"));

    let log = client.run_errors("a b").await.unwrap();

    assert!(log.errors.is_empty());
    assert_eq!(server.requests()[0].path, "/api/solver/runs/a%20b/errors");
}

#[tokio::test]
async fn test_watcher_reports_status_changes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let server = MockServer::start(move |_| {
        let status = match counter.fetch_add(1, Ordering::SeqCst) {
            0 => "pending",
            1 | 2 => "running",
            _ => "completed",
        };
        Reply::json(200, run_json("abc", status))
    })
    .await;
    let client = server.client(&Session::with_token("t"));
    let mut seen = Vec::new();

    let run = client
        .watch_run("abc")
        .interval(Duration::from_millis(5))
        .timeout(Duration::from_secs(5))
        .on_status(|run| seen.push(run.status.clone()))
        .wait()
        .await
        .unwrap();

    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(seen, [RunStatus::Pending, RunStatus::Running, RunStatus::Completed]);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_watcher_times_out() {
    let server = MockServer::start(|_| Reply::json(200, run_json("abc", "running"))).await;
    let client = server.client(&Session::with_token("t"));

    let err = client
        .watch_run("abc")
        .interval(Duration::from_millis(10))
        .timeout(Duration::from_millis(50))
        .wait()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout(_)));
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn test_dashboard_combines_lists() {
    let server = MockServer::start(|req| {
        if req.path.starts_with("/api/employees") {
            Reply::json(200, format!("[{},{}]", employee_json(1, "ana", true), employee_json(2, "bob", false)))
        } else if req.path.starts_with("/api/shifts") {
            Reply::json(200, "[]")
        } else {
            Reply::json(200, format!("[{},{}]", run_json("a", "completed"), run_json("b", "failed")))
        }
    })
    .await;
    let client = server.client(&Session::with_token("t"));

    let stats = client.dashboard().await.unwrap();

    assert_eq!(stats.total_employees, 2);
    assert_eq!(stats.active_employees, 1);
    assert_eq!(stats.total_shifts, 0);
    assert_eq!(stats.total_runs, 2);
    assert_eq!(stats.success_rate, 50.0);
    let runs_request = server
        .requests()
        .into_iter()
        .find(|r| r.path.starts_with("/api/solver/runs"))
        .unwrap();
    assert!(!runs_request.path.contains("active_only"));
}

//! Integration test harness for Limited Edition Tees.
//!
//! Each test gets its own in-process drops backend and storefront, both
//! bound to ephemeral ports, plus a cookie-keeping client so one test is one
//! visitor.
//!
//! ```rust,ignore
//! let ctx = TestContext::start(FakeDrops::default().with_current(vec![...])).await;
//! let resp = ctx.client.get(ctx.url("/")).send().await.unwrap();
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use limited_tees_core::{MonthKey, Product, SubscribeRequest};
use limited_tees_storefront::{config::StorefrontConfig, state::AppState};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// How a fake endpoint answers.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with this JSON body.
    Json(Value),
    /// This status with a plain-text body.
    Status(u16),
    /// 200 with a body that is not JSON.
    Garbage,
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Self::Json(body) => Json(body).into_response(),
            Self::Status(code) => (
                StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                "unavailable",
            )
                .into_response(),
            Self::Garbage => "<html>not json</html>".into_response(),
        }
    }
}

/// Canned answers for the drops backend, plus what it was asked.
#[derive(Debug)]
pub struct FakeDrops {
    pub current: Reply,
    pub archive: Reply,
    pub subscribe: Reply,
    /// Delay before the current-drop endpoint answers.
    pub current_delay: Duration,
    /// Delay before the subscribe endpoint answers.
    pub subscribe_delay: Duration,
    pub requested_months: Mutex<Vec<String>>,
    pub subscribed: Mutex<Vec<String>>,
}

impl Default for FakeDrops {
    fn default() -> Self {
        Self {
            current: Reply::Json(json!([])),
            archive: Reply::Json(json!([])),
            subscribe: Reply::Json(json!({})),
            current_delay: Duration::ZERO,
            subscribe_delay: Duration::ZERO,
            requested_months: Mutex::new(Vec::new()),
            subscribed: Mutex::new(Vec::new()),
        }
    }
}

impl FakeDrops {
    #[must_use]
    pub fn with_current(mut self, products: &[Product]) -> Self {
        self.current = Reply::Json(json!(products));
        self
    }

    #[must_use]
    pub fn with_archive(mut self, products: &[Product]) -> Self {
        self.archive = Reply::Json(json!(products));
        self
    }

    /// Months requested from the current-drop endpoint.
    ///
    /// # Panics
    ///
    /// Panics if a handler panicked while holding the lock.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn months(&self) -> Vec<String> {
        self.requested_months.lock().unwrap().clone()
    }

    /// Addresses posted to the subscribe endpoint.
    ///
    /// # Panics
    ///
    /// Panics if a handler panicked while holding the lock.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn emails(&self) -> Vec<String> {
        self.subscribed.lock().unwrap().clone()
    }
}

#[derive(Deserialize)]
struct MonthQuery {
    month: String,
}

#[allow(clippy::unwrap_used)]
async fn current(State(drops): State<Arc<FakeDrops>>, Query(query): Query<MonthQuery>) -> Reply {
    drops.requested_months.lock().unwrap().push(query.month);
    tokio::time::sleep(drops.current_delay).await;
    drops.current.clone()
}

async fn archive(State(drops): State<Arc<FakeDrops>>) -> Reply {
    drops.archive.clone()
}

#[allow(clippy::unwrap_used)]
async fn subscribe(
    State(drops): State<Arc<FakeDrops>>,
    Json(request): Json<SubscribeRequest>,
) -> Reply {
    drops.subscribed.lock().unwrap().push(request.email);
    tokio::time::sleep(drops.subscribe_delay).await;
    drops.subscribe.clone()
}

/// Serve `router` on an ephemeral local port.
///
/// # Panics
///
/// Panics if the port cannot be bound.
#[allow(clippy::unwrap_used)]
pub async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    addr
}

/// A running backend + storefront pair and a visitor's client.
pub struct TestContext {
    pub client: reqwest::Client,
    pub storefront_url: String,
    pub drops: Arc<FakeDrops>,
}

impl TestContext {
    /// Start a fake backend answering from `drops` and a storefront
    /// pointed at it.
    ///
    /// # Panics
    ///
    /// Panics if either server or the client cannot be started.
    #[allow(clippy::unwrap_used)]
    pub async fn start(drops: FakeDrops) -> Self {
        let drops = Arc::new(drops);
        let backend = Router::new()
            .route("/api/tees/current", get(current))
            .route("/api/tees/archive", get(archive))
            .route("/api/subscribe", post(subscribe))
            .with_state(Arc::clone(&drops));
        let backend_addr = serve(backend).await;

        Self::with_backend_url(&format!("http://{backend_addr}"), drops).await
    }

    /// Start a storefront whose backend lives at `backend_url`.
    ///
    /// # Panics
    ///
    /// Panics if the server or the client cannot be started.
    #[allow(clippy::unwrap_used)]
    pub async fn with_backend_url(backend_url: &str, drops: Arc<FakeDrops>) -> Self {
        let backend_url = backend_url.to_string();
        let config = StorefrontConfig::from_lookup(|key| {
            (key == "BACKEND_URL").then(|| backend_url.clone())
        })
        .unwrap();
        let state = AppState::new(config).unwrap();
        let storefront_addr = serve(limited_tees_storefront::app(state)).await;

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .unwrap();

        Self {
            client,
            storefront_url: format!("http://{storefront_addr}"),
            drops,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.storefront_url)
    }

    /// GET a storefront path, returning status and body.
    ///
    /// # Panics
    ///
    /// Panics on transport failure.
    #[allow(clippy::unwrap_used)]
    pub async fn get(&self, path: &str) -> (u16, String) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        (resp.status().as_u16(), resp.text().await.unwrap())
    }

    /// POST a form to a storefront path, returning status and body.
    ///
    /// # Panics
    ///
    /// Panics on transport failure.
    #[allow(clippy::unwrap_used)]
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> (u16, String) {
        let resp = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .unwrap();
        (resp.status().as_u16(), resp.text().await.unwrap())
    }

    /// Mount the page and run the grid fetch for `month`.
    ///
    /// # Panics
    ///
    /// Panics on transport failure.
    pub async fn load(&self, month: MonthKey) -> String {
        let (status, _) = self.get("/").await;
        assert_eq!(status, 200);
        let (status, body) = self.get(&format!("/drops?month={month}")).await;
        assert_eq!(status, 200);
        body
    }
}

/// A product record as the backend would send it.
///
/// # Panics
///
/// Panics if `month` is not a `YYYY-MM` key.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn tee(slug: &str, name: &str, month: &str) -> Product {
    serde_json::from_value(json!({
        "slug": slug,
        "name": name,
        "price": "25.00",
        "image": format!("https://cdn.example.com/{slug}.png"),
        "release_month": month,
    }))
    .unwrap()
}

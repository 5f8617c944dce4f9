//! `reqwest` client for the drops backend.

use async_trait::async_trait;
use limited_tees_core::{MonthKey, Product, SubscribeRequest, SubscribeResponse};
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::{Backend, BackendError};
use crate::config::BackendConfig;

/// HTTP client for the drops backend.
#[derive(Clone, Debug)]
pub struct TeesClient {
    client: reqwest::Client,
    /// Backend origin without a trailing slash.
    base_url: String,
}

impl TeesClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl Backend for TeesClient {
    #[instrument(skip(self), fields(month = %month))]
    async fn current_tees(&self, month: MonthKey) -> Result<Vec<Product>, BackendError> {
        let response = self
            .client
            .get(self.endpoint("/api/tees/current"))
            .query(&[("month", month.to_string())])
            .send()
            .await?;

        decode(response).await
    }

    #[instrument(skip(self))]
    async fn archive_tees(&self) -> Result<Vec<Product>, BackendError> {
        let response = self
            .client
            .get(self.endpoint("/api/tees/archive"))
            .send()
            .await?;

        decode(response).await
    }

    #[instrument(skip(self, request))]
    async fn subscribe(
        &self,
        request: &SubscribeRequest,
    ) -> Result<SubscribeResponse, BackendError> {
        let response = self
            .client
            .post(self.endpoint("/api/subscribe"))
            .json(request)
            .send()
            .await?;

        decode(response).await
    }
}

/// Check the status and decode a JSON body.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(BackendError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| BackendError::Parse(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;
    use url::Url;

    use super::*;

    /// Serve `router` on an ephemeral port and return a client pointed at it.
    async fn client_for(router: Router) -> TeesClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let url = Url::parse(&format!("http://{addr}/")).unwrap();
        TeesClient::new(&BackendConfig::new(url)).unwrap()
    }

    fn tee(slug: &str, month: &str) -> Value {
        json!({
            "slug": slug,
            "name": format!("Tee {slug}"),
            "price": 25,
            "image": format!("{slug}.png"),
            "release_month": month,
        })
    }

    #[tokio::test]
    async fn test_current_sends_month_query() {
        let router = Router::new().route(
            "/api/tees/current",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let month = q.get("month").cloned().unwrap_or_default();
                Json(json!([tee("a", &month)]))
            }),
        );
        let client = client_for(router).await;

        let month: MonthKey = "2024-03".parse().unwrap();
        let tees = client.current_tees(month).await.unwrap();

        assert_eq!(tees.len(), 1);
        assert_eq!(tees[0].release_month, month);
    }

    #[tokio::test]
    async fn test_archive_decodes_list() {
        let router = Router::new().route(
            "/api/tees/archive",
            get(|| async { Json(json!([tee("old-1", "2023-01"), tee("old-2", "2023-02")])) }),
        );
        let client = client_for(router).await;

        let tees = client.archive_tees().await.unwrap();
        let slugs: Vec<_> = tees.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, ["old-1", "old-2"]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let router = Router::new().route(
            "/api/tees/archive",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        );
        let client = client_for(router).await;

        let err = client.archive_tees().await.unwrap_err();
        assert!(matches!(
            err,
            BackendError::Api { status: 503, ref message } if message == "maintenance"
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let router = Router::new().route(
            "/api/tees/archive",
            get(|| async { Json(json!({ "detail": "not a list" })) }),
        );
        let client = client_for(router).await;

        let err = client.archive_tees().await.unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)));
    }

    #[tokio::test]
    async fn test_subscribe_posts_email() {
        let router = Router::new().route(
            "/api/subscribe",
            post(|Json(body): Json<Value>| async move {
                let email = body["email"].as_str().unwrap_or_default().to_string();
                Json(json!({ "message": format!("Welcome, {email}!") }))
            }),
        );
        let client = client_for(router).await;

        let response = client
            .subscribe(&SubscribeRequest {
                email: "you@example.com".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.message.as_deref(), Some("Welcome, you@example.com!"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_http_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = BackendConfig {
            url: Url::parse(&format!("http://{addr}")).unwrap(),
            timeout: Duration::from_secs(2),
        };
        let client = TeesClient::new(&config).unwrap();

        let err = client.archive_tees().await.unwrap_err();
        assert!(matches!(err, BackendError::Http(_)));
    }
}

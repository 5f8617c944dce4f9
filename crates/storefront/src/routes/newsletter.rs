//! Subscribe form route handler.
//!
//! Posts the visitor's address to the drops backend through the coordinator
//! and swaps the form for a cleared one carrying the acknowledgement.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::coordinator::{Acknowledgement, ViewState};
use crate::error::{AppError, Result};
use crate::middleware::Page;

/// Subscribe form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Subscribe form fragment (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/subscribe_form.html")]
pub struct SubscribeFormTemplate<'a> {
    pub state: &'a ViewState,
    pub acknowledgement: Option<Acknowledgement>,
}

/// Subscribe to drop announcements (HTMX).
#[instrument(skip_all)]
pub async fn subscribe(mut page: Page, Form(form): Form<SubscribeForm>) -> Result<Response> {
    if form.email.trim().is_empty() {
        return Err(AppError::BadRequest("email is required".to_string()));
    }

    page.coordinator().update_email_input(form.email);
    let acknowledgement = page.coordinator().submit_subscription().await;
    page.save();

    tracing::info!(
        subscribed = acknowledgement.is_success(),
        "Subscription submitted"
    );

    Ok(SubscribeFormTemplate {
        state: page.state(),
        acknowledgement: Some(acknowledgement),
    }
    .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::coordinator::{DEFAULT_SUBSCRIBED_MESSAGE, SUBSCRIBE_FAILED_MESSAGE};

    #[test]
    fn test_form_keeps_input() {
        let state = ViewState {
            email_input: "fan@example.com".to_string(),
            ..ViewState::default()
        };

        let html = SubscribeFormTemplate {
            state: &state,
            acknowledgement: None,
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"value="fan@example.com""#));
        assert!(html.contains("required"));
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn test_acknowledgement_styles() {
        let state = ViewState::default();

        let ok = SubscribeFormTemplate {
            state: &state,
            acknowledgement: Some(Acknowledgement::Subscribed(
                DEFAULT_SUBSCRIBED_MESSAGE.to_string(),
            )),
        }
        .render()
        .unwrap();
        assert!(ok.contains("ack-ok"));
        assert!(ok.contains(DEFAULT_SUBSCRIBED_MESSAGE));

        let failed = SubscribeFormTemplate {
            state: &state,
            acknowledgement: Some(Acknowledgement::Failed),
        }
        .render()
        .unwrap();
        assert!(failed.contains("ack-failed"));
        assert!(failed.contains(SUBSCRIBE_FAILED_MESSAGE));
    }
}

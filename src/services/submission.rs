// src/services/submission.rs
// DOCUMENTATION: Public "submit an event" flow
// PURPOSE: Bot check, field validation, pending insert
//
// Checks run in a fixed order and the first failure wins:
// token present, token accepted, fields present, email shape, date.

use crate::db::ContentStore;
use crate::errors::SiteError;
use crate::models::{
    Event, ModerationStatus, NewEvent, SubmitEventRequest, DEFAULT_EVENT_CATEGORY,
};
use crate::services::turnstile::TurnstileClient;
use chrono::NaiveDate;

pub const MSG_TOKEN_REQUIRED: &str = "Security verification required";
pub const MSG_TOKEN_REJECTED: &str = "Security verification failed. Please try again.";
pub const MSG_FIELDS_REQUIRED: &str = "All fields are required";
pub const MSG_INVALID_EMAIL: &str = "Invalid email address";
pub const MSG_INVALID_DATE: &str = "Invalid date";

fn required(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// `local@domain.tld` with no whitespace
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let domain_has_dot = email
        .rsplit_once('@')
        .map(|(_, domain)| {
            let parts: Vec<&str> = domain.split('.').collect();
            parts.len() > 1 && parts.iter().all(|p| !p.is_empty())
        })
        .unwrap_or(false);
    domain_has_dot && validator::validate_email(email)
}

/// Field checks for a submission whose token has already been accepted
pub fn validate_submission(req: &SubmitEventRequest) -> Result<NewEvent, SiteError> {
    let fields = (
        required(&req.title),
        required(&req.date),
        required(&req.time),
        required(&req.location),
        required(&req.description),
        required(&req.submitter_name),
        required(&req.submitter_email),
    );

    let (title, date, time, location, description, name) = match fields {
        (Some(a), Some(b), Some(c), Some(d), Some(e), Some(f), Some(_)) => (a, b, c, d, e, f),
        _ => return Err(SiteError::ValidationError(MSG_FIELDS_REQUIRED.to_string())),
    };

    // Shape is checked on the address as sent, surrounding whitespace included
    let email = req.submitter_email.as_deref().unwrap_or_default();
    if !is_valid_email(email) {
        return Err(SiteError::ValidationError(MSG_INVALID_EMAIL.to_string()));
    }

    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| SiteError::ValidationError(MSG_INVALID_DATE.to_string()))?;

    Ok(NewEvent {
        title,
        date,
        time,
        location,
        description,
        image_url: None,
        website_url: None,
        status: ModerationStatus::Pending,
        recurring: None,
        category: DEFAULT_EVENT_CATEGORY.to_string(),
        lat: None,
        lng: None,
        owner_id: None,
        submitter_name: Some(name),
        submitter_email: Some(email.to_string()),
    })
}

pub struct SubmissionService;

impl SubmissionService {
    pub async fn submit(
        store: &dyn ContentStore,
        turnstile: &TurnstileClient,
        req: &SubmitEventRequest,
        remote_ip: Option<&str>,
    ) -> Result<Event, SiteError> {
        let token = required(&req.turnstile_token)
            .ok_or_else(|| SiteError::ValidationError(MSG_TOKEN_REQUIRED.to_string()))?;

        if !turnstile.verify(&token, remote_ip).await {
            return Err(SiteError::ValidationError(MSG_TOKEN_REJECTED.to_string()));
        }

        let event = validate_submission(req)?;

        let created = store.create_event(&event).await.map_err(|e| {
            log::error!("Failed to store submitted event: {}", e);
            SiteError::SubmissionFailed
        })?;

        log::info!("Public event submission stored as pending: {}", created.id);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::EventFilter;

    fn request() -> SubmitEventRequest {
        SubmitEventRequest {
            title: Some("Snowdrop Walk".to_string()),
            date: Some("2030-02-14".to_string()),
            time: Some("11:00".to_string()),
            location: Some("Park Walk".to_string()),
            description: Some("Guided walk".to_string()),
            submitter_name: Some("Jo".to_string()),
            submitter_email: Some("jo@example.com".to_string()),
            turnstile_token: Some("token".to_string()),
        }
    }

    fn message(result: Result<impl std::fmt::Debug, SiteError>) -> String {
        match result {
            Err(SiteError::ValidationError(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    fn turnstile() -> TurnstileClient {
        TurnstileClient::new(None, String::new())
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("jo@example.com"));
        assert!(is_valid_email("jo.smith+events@mail.example.co.uk"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("jo@localhost"));
        assert!(!is_valid_email("jo @example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jo@example."));
    }

    #[test]
    fn test_missing_email_is_required_field_error() {
        let mut req = request();
        req.submitter_email = None;
        assert_eq!(message(validate_submission(&req)), MSG_FIELDS_REQUIRED);

        let mut req = request();
        req.title = Some("   ".to_string());
        assert_eq!(message(validate_submission(&req)), MSG_FIELDS_REQUIRED);
    }

    #[test]
    fn test_bad_email_and_date() {
        let mut req = request();
        req.submitter_email = Some("not-an-email".to_string());
        assert_eq!(message(validate_submission(&req)), MSG_INVALID_EMAIL);

        let mut req = request();
        req.date = Some("2030-02-30".to_string());
        assert_eq!(message(validate_submission(&req)), MSG_INVALID_DATE);
    }

    #[test]
    fn test_email_with_surrounding_whitespace_rejected() {
        for padded in [" jo@example.com ", "jo@example.com\n", "\tjo@example.com"] {
            let mut req = request();
            req.submitter_email = Some(padded.to_string());
            assert_eq!(message(validate_submission(&req)), MSG_INVALID_EMAIL);
        }
    }

    #[test]
    fn test_email_checked_before_date() {
        let mut req = request();
        req.submitter_email = Some("nope".to_string());
        req.date = Some("tomorrow".to_string());
        assert_eq!(message(validate_submission(&req)), MSG_INVALID_EMAIL);
    }

    #[tokio::test]
    async fn test_token_checked_first() {
        let store = MemoryStore::new();
        let req = SubmitEventRequest {
            turnstile_token: Some(String::new()),
            ..Default::default()
        };
        let result = SubmissionService::submit(&store, &turnstile(), &req, None).await;
        assert_eq!(message(result), MSG_TOKEN_REQUIRED);
    }

    #[tokio::test]
    async fn test_rejected_token() {
        let store = MemoryStore::new();
        let strict = TurnstileClient::new(
            Some("secret".to_string()),
            "http://127.0.0.1:9/verify".to_string(),
        );
        let result = SubmissionService::submit(&store, &strict, &request(), None).await;
        assert_eq!(message(result), MSG_TOKEN_REJECTED);
    }

    #[tokio::test]
    async fn test_successful_submission_is_pending() {
        let store = MemoryStore::new();
        let event = SubmissionService::submit(&store, &turnstile(), &request(), Some("10.0.0.1"))
            .await
            .unwrap();
        assert_eq!(event.status, ModerationStatus::Pending);
        assert_eq!(event.category, DEFAULT_EVENT_CATEGORY);
        assert_eq!(event.submitter_email.as_deref(), Some("jo@example.com"));

        let published = store.list_events(&EventFilter::published()).await.unwrap();
        assert!(published.is_empty());
    }
}

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};

use crate::domain::RequestError;

use super::super::helpers::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum SubscribeError {
    // Also the response body; the signup frontend matches on this text.
    #[error("Config not properly set")]
    ConfigError(#[source] RequestError),
    #[error("Failed to validate the recipient address.")]
    AddressValidationFailed(#[source] reqwest::Error),
    #[error("Failed to send the confirmation message.")]
    SendFailed(#[source] reqwest::Error),
    #[error("Failed to add the recipient to the mailing list.")]
    UpsertFailed(#[source] reqwest::Error),
}

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscribeError::ConfigError(RequestError::MissingFields(_)) => StatusCode::BAD_REQUEST,
            SubscribeError::ConfigError(RequestError::MissingCredentials(_))
            | SubscribeError::AddressValidationFailed(_)
            | SubscribeError::SendFailed(_)
            | SubscribeError::UpsertFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            SubscribeError::ConfigError(_) => HttpResponse::build(self.status_code())
                .content_type(ContentType::plaintext())
                .body(self.to_string()),
            _ => HttpResponse::new(self.status_code()),
        }
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::FetchError;

const MAX_MESSAGE_LEN: usize = 100;

/// A failure phrased for the person using the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFacingError {
    NetworkUnavailable,
    ServerUnavailable,
    RequestTimeout,
    AuthenticationError,
    NotFound,
    RateLimitExceeded,
    Generic { original_message: Option<String> },
}

impl UserFacingError {
    pub fn title(&self) -> &'static str {
        match self {
            UserFacingError::NetworkUnavailable => "No Internet Connection",
            UserFacingError::ServerUnavailable => "Service Unavailable",
            UserFacingError::RequestTimeout => "Request Timeout",
            UserFacingError::AuthenticationError => "Authentication Failed",
            UserFacingError::NotFound => "Content Not Found",
            UserFacingError::RateLimitExceeded => "Too Many Requests",
            UserFacingError::Generic { .. } => "Something Went Wrong",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            UserFacingError::NetworkUnavailable => {
                "Please check your internet connection and try again."
            }
            UserFacingError::ServerUnavailable => {
                "Our servers are temporarily unavailable. Please try again later."
            }
            UserFacingError::RequestTimeout => {
                "The request is taking too long. Please check your connection and try again."
            }
            UserFacingError::AuthenticationError => "Please check your credentials and try again.",
            UserFacingError::NotFound => "The requested content could not be found.",
            UserFacingError::RateLimitExceeded => "Please wait a moment before trying again.",
            UserFacingError::Generic { original_message } => original_message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or("An unexpected error occurred. Please try again."),
        }
    }

    /// Label for the action button, if retrying makes sense
    pub fn action_text(&self) -> Option<&'static str> {
        match self {
            UserFacingError::NotFound => None,
            UserFacingError::RateLimitExceeded => Some("Wait and Retry"),
            UserFacingError::NetworkUnavailable
            | UserFacingError::ServerUnavailable
            | UserFacingError::RequestTimeout
            | UserFacingError::AuthenticationError
            | UserFacingError::Generic { .. } => Some("Retry"),
        }
    }
}

impl From<&FetchError> for UserFacingError {
    fn from(error: &FetchError) -> Self {
        match error {
            FetchError::Unreachable { .. } => UserFacingError::NetworkUnavailable,
            FetchError::Timeout { .. } => UserFacingError::RequestTimeout,
            _ => match error.status() {
                Some(401 | 403) => UserFacingError::AuthenticationError,
                Some(404) => UserFacingError::NotFound,
                Some(429) => UserFacingError::RateLimitExceeded,
                Some(500..=599) => UserFacingError::ServerUnavailable,
                _ => UserFacingError::Generic {
                    original_message: Some(error.to_string()),
                },
            },
        }
    }
}

/// Shorten or replace a raw error message for display in a transient notice
pub fn display_error_message(message: Option<&str>) -> String {
    let Some(message) = message.filter(|m| !m.trim().is_empty()) else {
        return "An unknown error occurred".to_string();
    };

    let lower = message.to_lowercase();
    if lower.contains("network") {
        "Network error. Please check your connection.".to_string()
    } else if lower.contains("timeout") || lower.contains("timed out") {
        "Request timed out. Please try again.".to_string()
    } else if lower.contains("server") {
        "Server error. Please try again later.".to_string()
    } else if lower.contains("authentication") {
        "Authentication failed. Please try again.".to_string()
    } else if lower.contains("not found") {
        "Content not found.".to_string()
    } else if message.chars().count() > MAX_MESSAGE_LEN {
        let head: String = message.chars().take(MAX_MESSAGE_LEN - 3).collect();
        format!("{head}...")
    } else {
        message.to_string()
    }
}

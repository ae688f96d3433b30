//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: String,
}

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Sign in response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub user_id: String,
    pub display_name: String,
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub user_id: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl SessionStatusResponse {
    /// Status body for an anonymous session
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user_id: None,
            display_name: None,
            email: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_camel_case() {
        let json = r#"{"name":"Ann","email":"ann@x.com","password":"hunter2"}"#;
        let req: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Ann");
        assert_eq!(req.email, "ann@x.com");
    }

    #[test]
    fn test_status_response_serializes_camel_case() {
        let body = SessionStatusResponse {
            authenticated: true,
            user_id: Some("id".into()),
            display_name: Some("Ann".into()),
            email: Some("ann@x.com".into()),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"displayName\""));
    }
}

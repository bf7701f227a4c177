//! Response envelope shared by every `/v1` endpoint.

use serde::{Deserialize, Serialize};

/// Message carried by every successful response.
pub const SUCCESS_MESSAGE: &str = "request successful";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    pub success: bool,
    pub messages: Vec<String>,
}

/// `{ "header": {...}, "user"?: {...} }`
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub header: ResponseHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(user: T) -> Self {
        Self {
            header: success_header(),
            user: Some(user),
        }
    }

    /// Success with only the header.
    pub fn success_empty() -> Self {
        Self {
            header: success_header(),
            user: None,
        }
    }
}

fn success_header() -> ResponseHeader {
    ResponseHeader {
        success: true,
        messages: vec![SUCCESS_MESSAGE.to_string()],
    }
}

impl Envelope<()> {
    pub fn failure(messages: Vec<String>) -> Self {
        Self {
            header: ResponseHeader {
                success: false,
                messages,
            },
            user: None,
        }
    }
}

/// User payload. Each endpoint fills only the fields it returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl UserBody {
    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }
}

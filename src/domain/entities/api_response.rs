use serde::{Deserialize, Serialize};

/// Success envelope shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn item(data: T) -> Self {
        ApiResponse {
            success: true,
            data,
            total: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn collection(data: Vec<T>) -> Self {
        let total = data.len();
        ApiResponse {
            success: true,
            data,
            total: Some(total),
            message: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LikesResponse {
    pub likes: i32,
}

use serde::Serialize;
use utoipa::ToSchema;

/// List counters for client-side filtered views ("showing X of Y").
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub shown: Option<i64>,
    pub total: Option<i64>,
}

impl Meta {
    pub fn counts(shown: usize, total: usize) -> Self {
        Self {
            shown: Some(shown as i64),
            total: Some(total as i64),
        }
    }

    pub fn empty() -> Self {
        Self {
            shown: None,
            total: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}

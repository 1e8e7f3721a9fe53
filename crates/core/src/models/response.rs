use serde::{Deserialize, Serialize};

/// Envelope wrapped around every API response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_pages: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn success(status_code: u16, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status_code,
            success: true,
            message: message.into(),
            data,
            number_of_records: None,
            number_of_pages: None,
        }
    }

    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            success: false,
            message: message.into(),
            data: None,
            number_of_records: None,
            number_of_pages: None,
        }
    }

    pub fn with_records(mut self, number_of_records: usize) -> Self {
        self.number_of_records = Some(number_of_records);
        self
    }
}

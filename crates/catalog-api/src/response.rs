//! Response bodies shared by handlers

use serde::Serialize;

/// Body of every successful DELETE.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub status: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted(kind: &str) -> Self {
        Self {
            status: true,
            message: format!("The {} has been deleted", kind),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::errors::WorkshopError;

/// A workshop client, keyed by national id.
///
/// Two clients are equal when their national ids match, ignoring ASCII
/// case. Name and phone are mutable through the client store's `update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub national_id: String,
    pub name: String,
    pub phone: String,
}

impl Client {
    pub fn new(national_id: &str, name: &str, phone: &str) -> Result<Self, WorkshopError> {
        if national_id.trim().is_empty() {
            return Err(WorkshopError::Validation(
                "Client national id cannot be blank".to_string(),
            ));
        }
        if name.trim().is_empty() {
            return Err(WorkshopError::Validation(
                "Client name cannot be blank".to_string(),
            ));
        }
        if phone.trim().is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(WorkshopError::Validation(
                "Client phone must be a non-empty string of digits".to_string(),
            ));
        }
        Ok(Self {
            national_id: national_id.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
        })
    }
}

impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        self.national_id.eq_ignore_ascii_case(&other.national_id)
        // name and phone are mutable attributes, not identity
    }
}

impl Eq for Client {}

use serde::{Deserialize, Serialize};
use crate::{CoreError, CoreResult};

/// A train trip the operator wants watched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripConfig {
    pub name: String,
    pub trip_id: String,
    pub province_start_id: String,
    pub province_end_id: String,
    /// Opaque token the booking page embeds per trip; sent back verbatim.
    #[serde(default)]
    pub view_state_holder: Option<String>,
}

impl TripConfig {
    pub fn new(name: &str, trip_id: &str, province_start_id: &str, province_end_id: &str) -> Self {
        Self {
            name: name.to_string(),
            trip_id: trip_id.to_string(),
            province_start_id: province_start_id.to_string(),
            province_end_id: province_end_id.to_string(),
            view_state_holder: None,
        }
    }

    pub fn with_view_state(mut self, token: &str) -> Self {
        self.view_state_holder = Some(token.to_string());
        self
    }

    /// Form fields for the coach lookup, in the order the booking page posts them
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("tripId", self.trip_id.as_str()),
            ("provinceStartId", self.province_start_id.as_str()),
            ("provinceEndId", self.province_end_id.as_str()),
        ];
        if let Some(token) = self.view_state_holder.as_deref() {
            fields.push(("viewStateHolder", token));
        }
        fields
    }

    pub fn validate(&self) -> CoreResult<()> {
        let required = [
            ("name", &self.name),
            ("trip_id", &self.trip_id),
            ("province_start_id", &self.province_start_id),
            ("province_end_id", &self.province_end_id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::ValidationError(format!(
                    "trip '{}' has an empty {}",
                    self.name, field
                )));
            }
        }
        Ok(())
    }
}

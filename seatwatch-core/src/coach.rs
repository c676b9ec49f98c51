use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Seat type the monitor never reports: only sleeper berths are watched.
pub const EXCLUDED_SEAT_TYPE: &str = "Seating Coach";

/// Body returned by the `getTrainCoach` endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoachResponse {
    #[serde(default)]
    pub result: Option<bool>,
    #[serde(default)]
    pub data: Option<CoachData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoachData {
    #[serde(default)]
    pub results: Option<Vec<CoachRecord>>,
}

/// One coach as the site lists it. Every field may be missing or `null`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachRecord {
    #[serde(default)]
    pub available_seat_count: Option<i64>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub coach_no: Option<String>,
    #[serde(default)]
    pub coach_class_desc_en: Option<String>,
    #[serde(default)]
    pub coach_seat_type_en: Option<String>,
    #[serde(default)]
    pub coach_air_type_en: Option<String>,
}

// The site has sent coach numbers both as "5" and 5.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    })
}

/// One coach with free seats, as reported to the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatRecord {
    pub coach_type: String,
    pub coach_no: String,
    pub available_count: u32,
}

impl CoachRecord {
    pub fn seat_type(&self) -> &str {
        self.coach_seat_type_en.as_deref().unwrap_or("Unknown")
    }

    /// Free seats; zero for a missing or negative count
    pub fn free_seats(&self) -> u32 {
        self.available_seat_count
            .map(|n| n.clamp(0, u32::MAX as i64) as u32)
            .unwrap_or(0)
    }

    /// "First - Sleeping Coach (AC)"; the air qualifier is omitted when blank
    pub fn describe(&self) -> String {
        let class = self.coach_class_desc_en.as_deref().unwrap_or("Unknown");
        let mut desc = format!("{} - {}", class, self.seat_type());
        if let Some(air) = self.coach_air_type_en.as_deref().filter(|a| !a.is_empty()) {
            desc.push_str(&format!(" ({})", air));
        }
        desc
    }
}

impl CoachResponse {
    /// Extract the coaches that still have berths.
    ///
    /// A response with `result: false` or without `data.results` yields an
    /// empty list rather than an error.
    pub fn seat_records(&self) -> Vec<SeatRecord> {
        if self.result != Some(true) {
            return Vec::new();
        }
        let coaches = match self.data.as_ref().and_then(|d| d.results.as_ref()) {
            Some(coaches) => coaches,
            None => return Vec::new(),
        };

        coaches
            .iter()
            .filter(|c| c.seat_type() != EXCLUDED_SEAT_TYPE)
            .filter(|c| c.free_seats() > 0)
            .map(|c| SeatRecord {
                coach_type: c.describe(),
                coach_no: c.coach_no.clone().unwrap_or_else(|| "?".to_string()),
                available_count: c.free_seats(),
            })
            .collect()
    }
}

pub fn total_available(seats: &[SeatRecord]) -> u32 {
    seats.iter().map(|s| s.available_count).sum()
}

use chrono::{DateTime, TimeZone};
use crate::coach::SeatRecord;
use crate::trip::TripConfig;

// Telegram's HTML parse mode only needs these three escaped.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

pub fn availability_message(search_name: &str, trip_name: &str, seats: &[SeatRecord]) -> String {
    let mut message = String::from("🚂 <b>TICKETS AVAILABLE!</b>\n\n");
    message.push_str(&format!("<b>{}</b>\n", escape(search_name)));
    message.push_str(&format!("Train: <b>{}</b>\n\n", escape(trip_name)));

    for seat in seats {
        message.push_str(&format!("🎫 {} (Coach #{})\n", escape(&seat.coach_type), escape(&seat.coach_no)));
        message.push_str(&format!("   Available: <b>{}</b> seats\n\n", seat.available_count));
    }

    message
}

pub fn startup_message<Tz>(
    search_name: &str,
    trips: &[TripConfig],
    interval_minutes: u64,
    started: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let trip_list = trips
        .iter()
        .map(|t| format!("  • {}", escape(&t.name)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "🤖 <b>Train Monitor Started</b>\n\n<b>{}</b>\n\nMonitoring {} trips:\n{}\n\nCheck interval: {} min\nStarted: {}",
        escape(search_name),
        trips.len(),
        trip_list,
        interval_minutes,
        started.format("%Y-%m-%d %H:%M:%S"),
    )
}

pub fn shutdown_message() -> String {
    "🛑 <b>Train Monitor Stopped</b>".to_string()
}

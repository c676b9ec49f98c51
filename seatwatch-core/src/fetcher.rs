use tracing::{error, warn};
use crate::coach::SeatRecord;
use crate::session::SessionManager;
use crate::site::TicketingSite;
use crate::trip::TripConfig;

/// Fetch the sleeper availability of one trip.
///
/// `None` means "no data this cycle": no session could be obtained, the
/// request failed, or the body was not JSON. An HTTP 500 additionally drops
/// the session so the next call starts from a fresh one.
pub async fn fetch_availability<S>(
    site: &S,
    sessions: &mut SessionManager<S::Session>,
    trip: &TripConfig,
) -> Option<Vec<SeatRecord>>
where
    S: TicketingSite,
{
    if !sessions.ensure_valid(site).await {
        return None;
    }
    let session = sessions.current()?;

    let result = site.fetch_coaches(session, trip).await;
    match result {
        Ok(response) => Some(response.seat_records()),
        Err(e) if e.invalidates_session() => {
            warn!("{}: server error, will refresh session", trip.name);
            sessions.invalidate();
            None
        }
        Err(e) => {
            error!("{}: {}", trip.name, e);
            None
        }
    }
}

//! Service-territory filter. The organization serves all of Maine, Rhode
//! Island, and Vermont, but only nine Massachusetts counties; county is
//! authoritative when the generator supplies it, city is a fallback
//! heuristic when it does not.

use crate::constants::{EXCLUDED_MA_CITIES, SERVED_MA_COUNTIES};
use crate::types::Event;

/// Decides whether an event falls inside the service territory. Only events
/// whose `state` denotes Massachusetts are ever excluded.
pub fn in_service_territory(event: &Event) -> bool {
    let state = event
        .state
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();
    if state != "ma" && state != "massachusetts" {
        return true;
    }

    if let Some(county) = event.county.as_deref().filter(|c| !c.trim().is_empty()) {
        let county = county.trim().to_lowercase();
        return SERVED_MA_COUNTIES
            .iter()
            .any(|served| county.contains(served));
    }

    if let Some(city) = event.city.as_deref() {
        let city = city.trim().to_lowercase();
        if EXCLUDED_MA_CITIES.iter().any(|excluded| city == *excluded) {
            return false;
        }
    }

    // Neither field disqualifies: benefit of the doubt.
    true
}

//! Record builders, one shape per response code

use super::codes::{
    CLOSED_STOP_MESSAGE, NO_ROUTES_MESSAGE, NOT_AVAILABLE_MESSAGE, ResponseCode,
};
use super::models::{ServiceEntry, Slot};

/// Arrival record before the response-wide fields are stamped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub bus_distance: Option<String>,
    pub arrival_estimation: Option<String>,
    pub bus_plate_number: Option<String>,
    pub route_id: Option<String>,
    pub code: String,
    pub message: Option<String>,
}

/// Expands a classified service entry into its record drafts.
///
/// Produces exactly [`ResponseCode::record_count`] drafts. Absent upstream
/// fields come through as `None`.
pub fn build_records(code: ResponseCode, entry: &ServiceEntry) -> Vec<RecordDraft> {
    match code {
        ResponseCode::MultipleRoute => vec![
            route_info(code, entry, Slot::First),
            route_info(code, entry, Slot::Second),
        ],
        ResponseCode::SingleRoute => vec![route_info(code, entry, Slot::First)],
        ResponseCode::RouteFrequency => vec![frequency_info(code, entry)],
        ResponseCode::NoRoutes => vec![without_info(code, entry, NO_ROUTES_MESSAGE)],
        ResponseCode::ClosedStop => vec![without_info(code, entry, CLOSED_STOP_MESSAGE)],
        ResponseCode::NotAvailableService => {
            vec![without_info(code, entry, NOT_AVAILABLE_MESSAGE)]
        }
    }
}

fn route_info(code: ResponseCode, entry: &ServiceEntry, slot: Slot) -> RecordDraft {
    let position = entry.position(slot);

    RecordDraft {
        bus_distance: position.distance,
        arrival_estimation: position.arrival,
        bus_plate_number: position.plate,
        route_id: entry.route_id.clone(),
        code: code.as_str().to_owned(),
        message: entry.response_message.clone(),
    }
}

fn frequency_info(code: ResponseCode, entry: &ServiceEntry) -> RecordDraft {
    RecordDraft {
        bus_distance: None,
        arrival_estimation: entry.response_message.clone(),
        bus_plate_number: None,
        route_id: entry.route_id.clone(),
        code: code.as_str().to_owned(),
        message: entry.response_message.clone(),
    }
}

fn without_info(code: ResponseCode, entry: &ServiceEntry, message: &str) -> RecordDraft {
    RecordDraft {
        bus_distance: None,
        arrival_estimation: None,
        bus_plate_number: None,
        route_id: entry.route_id.clone(),
        code: code.as_str().to_owned(),
        message: Some(message.to_owned()),
    }
}

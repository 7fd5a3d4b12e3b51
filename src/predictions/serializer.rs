use std::collections::HashMap;

use tracing::debug;

use super::codes::{ResponseCode, is_live};
use super::models::{ArrivalRecord, SerializedResponse, UpstreamDocument};
use super::records::{RecordDraft, build_records};

/// Normalizes an upstream prediction document into the public response.
///
/// Entries are bucketed by response code in upstream order, buckets are
/// emitted in [`ResponseCode::PRIORITY`] order, and every record is stamped
/// with the shared `calculated_at`. Entries with an unrecognized or missing
/// code contribute nothing. Total over its input.
pub fn serialize(document: &UpstreamDocument) -> SerializedResponse {
    let calculated_at = document.calculated_at();

    let mut buckets: HashMap<ResponseCode, Vec<RecordDraft>> = HashMap::new();
    for entry in document.entries() {
        let raw_code = entry.response_code.as_deref().unwrap_or_default();

        match ResponseCode::classify(raw_code) {
            Some(code) => buckets
                .entry(code)
                .or_default()
                .extend(build_records(code, entry)),
            None => debug!(
                code = raw_code,
                route_id = entry.route_id.as_deref().unwrap_or_default(),
                "Dropping service entry with unrecognized response code"
            ),
        }
    }

    let mut results = Vec::new();
    for code in ResponseCode::PRIORITY {
        let Some(drafts) = buckets.remove(&code) else {
            continue;
        };

        results.extend(
            drafts
                .into_iter()
                .map(|draft| stamp(draft, &calculated_at))
                .filter(|record| record.is_live),
        );
    }

    SerializedResponse { results }
}

fn stamp(draft: RecordDraft, calculated_at: &str) -> ArrivalRecord {
    let arrival_estimation = draft
        .arrival_estimation
        .filter(|estimation| !estimation.is_empty())
        .or_else(|| draft.message.clone());
    let is_live = is_live(&draft.code);

    ArrivalRecord {
        bus_distance: draft.bus_distance,
        arrival_estimation,
        bus_plate_number: draft.bus_plate_number,
        route_id: draft.route_id,
        code: draft.code,
        message: draft.message,
        calculated_at: calculated_at.to_owned(),
        is_live,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictions::NO_ROUTES_MESSAGE;
    use serde_json::{Value, json};

    fn document(items: Value) -> UpstreamDocument {
        serde_json::from_value(json!({
            "fechaprediccion": "2024-01-01",
            "horaprediccion": "10:00",
            "servicios": { "item": items }
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_document() {
        let response = serialize(&UpstreamDocument::default());
        assert!(response.results.is_empty());

        let response = serialize(&document(json!([])));
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_missing_code_is_dropped() {
        let response = serialize(&document(json!([{ "servicio": "506" }])));
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_empty_estimation_falls_back_to_message() {
        let response = serialize(&document(json!([{
            "codigorespuesta": "01",
            "servicio": "506",
            "horaprediccionbus1": "",
            "respuestaServicio": "En menos de 5 min."
        }])));

        assert_eq!(
            response.results[0].arrival_estimation.as_deref(),
            Some("En menos de 5 min.")
        );
    }

    #[test]
    fn test_synthetic_estimation_is_backfilled() {
        let response = serialize(&document(json!([{ "codigorespuesta": "10" }])));
        let record = &response.results[0];

        assert_eq!(record.message.as_deref(), Some(NO_ROUTES_MESSAGE));
        assert_eq!(record.arrival_estimation.as_deref(), Some(NO_ROUTES_MESSAGE));
        assert!(record.is_live);
    }

    #[test]
    fn test_priority_order_ignores_input_order() {
        let response = serialize(&document(json!([
            { "codigorespuesta": "12", "servicio": "a" },
            { "codigorespuesta": "9", "servicio": "b" },
            { "codigorespuesta": "11", "servicio": "c" },
            { "codigorespuesta": "01", "servicio": "d" },
            { "codigorespuesta": "10", "servicio": "e" },
            { "codigorespuesta": "00", "servicio": "f" }
        ])));

        let codes: Vec<&str> = response.results.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["00", "00", "01", "9", "10", "11", "12"]);
    }

    #[test]
    fn test_stamp_keeps_non_empty_estimation() {
        let draft = RecordDraft {
            bus_distance: None,
            arrival_estimation: Some("5 min".to_string()),
            bus_plate_number: None,
            route_id: None,
            code: "01".to_string(),
            message: Some("ok".to_string()),
        };

        let record = stamp(draft, "2024-01-01 10:00");
        assert_eq!(record.arrival_estimation.as_deref(), Some("5 min"));
        assert_eq!(record.calculated_at, "2024-01-01 10:00");
        assert!(record.is_live);
    }

    #[test]
    fn test_stamp_marks_unknown_code_not_live() {
        let draft = RecordDraft {
            bus_distance: None,
            arrival_estimation: None,
            bus_plate_number: None,
            route_id: None,
            code: "99".to_string(),
            message: None,
        };

        let record = stamp(draft, "");
        assert!(!record.is_live);
        assert_eq!(record.arrival_estimation, None);
    }
}

//! Upstream prediction document and the public arrival records.
//!
//! Upstream field names are Spanish and terse (`codigorespuesta`,
//! `distanciabus1`, ...); they are mapped onto English field names here.
//! Deserialization of the upstream side is lenient: a field holding an
//! unexpected type is treated as absent, and a missing or malformed service
//! list becomes an empty one. Nothing in a well-formed JSON object makes
//! [`UpstreamDocument`] fail to parse.
//!
//! The public side ([`ArrivalRecord`], [`SerializedResponse`]) serializes with
//! the snake_case keys clients depend on:
//!
//! ```json
//! {
//!   "results": [
//!     {
//!       "bus_distance": "300m",
//!       "arrival_estimation": "5 min",
//!       "bus_plate_number": "ABCD12",
//!       "route_id": "506",
//!       "code": "01",
//!       "message": "ok",
//!       "calculated_at": "2024-01-01 10:00",
//!       "is_live": true
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Prediction payload returned by the upstream predictor for one stop
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpstreamDocument {
    #[serde(rename = "fechaprediccion", default, deserialize_with = "lenient_string")]
    pub prediction_date: Option<String>,
    #[serde(rename = "horaprediccion", default, deserialize_with = "lenient_string")]
    pub prediction_time: Option<String>,
    #[serde(rename = "servicios", default, deserialize_with = "lenient_services")]
    pub services: Services,
}

impl UpstreamDocument {
    /// `"{fechaprediccion} {horaprediccion}"`, absent parts render empty
    pub fn calculated_at(&self) -> String {
        format!(
            "{} {}",
            self.prediction_date.as_deref().unwrap_or_default(),
            self.prediction_time.as_deref().unwrap_or_default()
        )
    }

    pub fn entries(&self) -> &[ServiceEntry] {
        &self.services.items
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Services {
    #[serde(rename = "item", default, deserialize_with = "lenient_items")]
    pub items: Vec<ServiceEntry>,
}

/// One route serving the requested stop
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceEntry {
    #[serde(rename = "codigorespuesta", default, deserialize_with = "code_string")]
    pub response_code: Option<String>,
    #[serde(rename = "servicio", default, deserialize_with = "lenient_string")]
    pub route_id: Option<String>,
    #[serde(rename = "respuestaServicio", default, deserialize_with = "lenient_string")]
    pub response_message: Option<String>,

    #[serde(rename = "distanciabus1", default, deserialize_with = "lenient_string")]
    pub distance_1: Option<String>,
    #[serde(rename = "horaprediccionbus1", default, deserialize_with = "lenient_string")]
    pub arrival_1: Option<String>,
    #[serde(rename = "ppubus1", default, deserialize_with = "lenient_string")]
    pub plate_1: Option<String>,

    #[serde(rename = "distanciabus2", default, deserialize_with = "lenient_string")]
    pub distance_2: Option<String>,
    #[serde(rename = "horaprediccionbus2", default, deserialize_with = "lenient_string")]
    pub arrival_2: Option<String>,
    #[serde(rename = "ppubus2", default, deserialize_with = "lenient_string")]
    pub plate_2: Option<String>,
}

/// Positional suffix of the per-bus upstream fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

/// Per-bus fields of a service entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusPosition {
    pub distance: Option<String>,
    pub arrival: Option<String>,
    pub plate: Option<String>,
}

impl ServiceEntry {
    pub fn position(&self, slot: Slot) -> BusPosition {
        match slot {
            Slot::First => BusPosition {
                distance: self.distance_1.clone(),
                arrival: self.arrival_1.clone(),
                plate: self.plate_1.clone(),
            },
            Slot::Second => BusPosition {
                distance: self.distance_2.clone(),
                arrival: self.arrival_2.clone(),
                plate: self.plate_2.clone(),
            },
        }
    }
}

/// Normalized arrival returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalRecord {
    pub bus_distance: Option<String>,
    pub arrival_estimation: Option<String>,
    pub bus_plate_number: Option<String>,
    pub route_id: Option<String>,
    pub code: String,
    pub message: Option<String>,
    pub calculated_at: String,
    pub is_live: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedResponse {
    pub results: Vec<ArrivalRecord>,
}

/// Strings pass through, numbers are stringified, anything else is absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Response codes are only recognized as strings; `10` is not `"10"`.
fn code_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_services<'de, D>(deserializer: D) -> Result<Services, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Accepts an array of entries or a single entry object. Elements that are
/// not objects are skipped.
fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<ServiceEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = match Value::deserialize(deserializer)? {
        Value::Array(values) => values,
        object @ Value::Object(_) => vec![object],
        _ => Vec::new(),
    };

    Ok(values
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}

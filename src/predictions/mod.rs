//! Arrival prediction normalization
//!
//! Turns the upstream prediction document into the public `next_arrivals`
//! contract. The pipeline is pure and synchronous:
//!
//! - [`codes`] classifies each service entry by its response code
//! - [`records`] builds record drafts with a fixed field shape per code
//! - [`serialize`] buckets drafts by code, orders them by priority,
//!   stamps shared metadata and drops non-live records
//!
//! ## Example
//!
//! ```rust
//! use arrivals_proxy::predictions::{UpstreamDocument, serialize};
//!
//! let document: UpstreamDocument = serde_json::from_str(r#"{
//!     "fechaprediccion": "2024-01-01",
//!     "horaprediccion": "10:00",
//!     "servicios": { "item": [
//!         { "codigorespuesta": "10", "servicio": "506" }
//!     ] }
//! }"#).unwrap();
//!
//! let response = serialize(&document);
//! assert_eq!(response.results.len(), 1);
//! assert_eq!(response.results[0].calculated_at, "2024-01-01 10:00");
//! ```

pub mod codes;
mod models;
pub mod records;
mod serializer;

pub use codes::{
    CLOSED_STOP_MESSAGE, LIVE_CODES, NO_ROUTES_MESSAGE, NOT_AVAILABLE_MESSAGE, ResponseCode,
    is_live,
};
pub use models::{
    ArrivalRecord, BusPosition, SerializedResponse, ServiceEntry, Services, Slot,
    UpstreamDocument,
};
pub use records::{RecordDraft, build_records};
pub use serializer::serialize;

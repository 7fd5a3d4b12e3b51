//! Upstream response codes and the live-code set

use std::fmt;

pub const NO_ROUTES_MESSAGE: &str = "No hay buses que se dirijan al paradero";
pub const CLOSED_STOP_MESSAGE: &str = "Servicio fuera de horario de operacion para ese paradero";
pub const NOT_AVAILABLE_MESSAGE: &str = "Servicio no disponible";

/// Codes a record may carry and still be returned to clients.
///
/// `"09"` is never produced by [`ResponseCode::classify`] but upstream has
/// been seen to list it, so it stays in the set.
pub const LIVE_CODES: [&str; 7] = ["00", "01", "9", "09", "10", "11", "12"];

/// Stop/service state reported by the upstream predictor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    /// `"00"`: two buses inbound
    MultipleRoute,
    /// `"01"`: one bus inbound
    SingleRoute,
    /// `"9"`: frequency estimate only, no live bus position
    RouteFrequency,
    /// `"10"`: no buses routed to the stop
    NoRoutes,
    /// `"11"`: stop outside operating hours
    ClosedStop,
    /// `"12"`: service not available
    NotAvailableService,
}

impl ResponseCode {
    /// Output order of record groups
    pub const PRIORITY: [ResponseCode; 6] = [
        ResponseCode::MultipleRoute,
        ResponseCode::SingleRoute,
        ResponseCode::RouteFrequency,
        ResponseCode::NoRoutes,
        ResponseCode::ClosedStop,
        ResponseCode::NotAvailableService,
    ];

    /// Maps a raw upstream code to its variant. Matching is exact: `"1"`,
    /// `"09"` or `" 00"` are unrecognized.
    pub fn classify(code: &str) -> Option<Self> {
        match code {
            "00" => Some(ResponseCode::MultipleRoute),
            "01" => Some(ResponseCode::SingleRoute),
            "9" => Some(ResponseCode::RouteFrequency),
            "10" => Some(ResponseCode::NoRoutes),
            "11" => Some(ResponseCode::ClosedStop),
            "12" => Some(ResponseCode::NotAvailableService),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResponseCode::MultipleRoute => "00",
            ResponseCode::SingleRoute => "01",
            ResponseCode::RouteFrequency => "9",
            ResponseCode::NoRoutes => "10",
            ResponseCode::ClosedStop => "11",
            ResponseCode::NotAvailableService => "12",
        }
    }

    /// Number of records one service entry with this code expands into
    pub fn record_count(self) -> usize {
        match self {
            ResponseCode::MultipleRoute => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership test against [`LIVE_CODES`]
pub fn is_live(code: &str) -> bool {
    LIVE_CODES.contains(&code)
}

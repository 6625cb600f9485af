//! Shared primitive types and named constants.

/// Stable identifier for an agency.
pub type AgencyId = String;

/// Stable identifier for a client.
pub type ClientId = String;

/// Trailing aggregation window, in calendar days.
pub const WINDOW_DAYS: i64 = 30;

/// Monthly labor capacity: one person × 8h × 20 workdays.
pub const CAPACITY_HOURS: f64 = 160.0;

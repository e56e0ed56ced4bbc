//! Data models for the residencial access-control API.
//!
//! This module contains the data structures exchanged with the backend:
//!
//! - `VisitHistoryItem`, `NewVisit`, `VisitReceipt`: visit lifecycle
//! - `ScanRecord`, `DailyScans`: guard QR scan activity
//! - `StatsReport` and its breakdowns: admin dashboard aggregates
//! - `Post`: social publications and announcements (comunicados)

pub mod scan;
pub mod social;
pub mod stats;
pub mod visit;

pub use scan::{DailyScans, ScanRecord};
pub use social::{Post, PostKind};
pub use stats::{
    GuardActivity, HourlyActivity, ResidentActivity, StatsReport, StatsTotals, StatusBreakdown,
    VehicleBreakdown,
};
pub use visit::{NewVisit, VisitHistory, VisitHistoryItem, VisitReceipt, VisitorDetails};

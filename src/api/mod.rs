//! REST API client module for the residencial access-control backend.
//!
//! This module provides the `ApiClient` for communicating with the backend
//! to fetch visit, scan, statistics and social data, and to submit guard
//! and resident writes.
//!
//! The API uses JWT bearer token authentication.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;

/// Backend endpoint paths, grouped by the role that calls them.
pub mod endpoints {
    pub const ADMIN_VISIT_HISTORY: &str = "/visitas/admin/historial";
    pub const ADMIN_STATS: &str = "/admin/estadisticas";
    pub const ADMIN_DAILY_SCANS: &str = "/visitas/admin/escaneos-dia";
    pub const SOCIAL_POSTS: &str = "/social/publicaciones";

    pub const GUARD_REGISTER_ENTRY: &str = "/visitas/guardia/registrar-entrada";
    pub const GUARD_REGISTER_EXIT: &str = "/visitas/guardia/registrar-salida";
    pub const GUARD_DAILY_SCANS: &str = "/visitas/guardia/escaneos-dia";

    pub const RESIDENT_CREATE_VISIT: &str = "/visitas/residente/crear";
    pub const RESIDENT_VISITS: &str = "/visitas/residente/mis-visitas";
    pub const ANNOUNCEMENTS: &str = "/comunicados";
}

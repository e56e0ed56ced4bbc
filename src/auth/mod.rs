//! Bearer-token session persistence.
//!
//! Login and credential handling are out of scope; this module only keeps
//! the token, user id and role the backend issued, with an expiry check.

pub mod session;

pub use session::{Role, Session, SessionData};

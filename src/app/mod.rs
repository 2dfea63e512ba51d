//! Application layer for the attendance engine.
//!
//! This module wires the record store, configuration and calculations into
//! the operations a front end calls: roster management, day sheet editing,
//! salary runs and exports, plus the placeholder login gate.

mod auth;
mod context;
mod day_sheet;
mod roster;

pub use auth::LoginGate;
pub use context::AppContext;
pub use day_sheet::{AttendanceEdit, DaySheet};

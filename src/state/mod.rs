//! State management module
//!
//! Holds the handles shared by every request.

pub mod app_state;

pub use app_state::AppState;

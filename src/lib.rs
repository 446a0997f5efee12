//! FleetTrack Device Management System
//!
//! A Rust implementation of the FleetTrack server, providing a REST JSON API
//! for managing GPS tracking devices, SIM cards, vehicles, clients, and the
//! installation/replacement/removal/renewal lifecycle that ties them together.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod inventory;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

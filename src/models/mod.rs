//! Domain models and request/response types

pub mod activity;
pub mod assignment;
pub mod client;
pub mod device;
pub mod enums;
pub mod masterdata;
pub mod renewal;
pub mod sim;
pub mod task;
pub mod user;
pub mod vehicle;

//! Inventory state transitions for devices and SIM cards
//!
//! Devices move `AVAILABLE → ASSIGNED → {AVAILABLE | TRANSFER_AVAILABLE}`
//! depending on ownership; SIMs only move `AVAILABLE ⇄ ASSIGNED`. Every path
//! that returns a device to stock (removal, replacement of the old device,
//! assignment deletion) goes through [`release_device`] so the rules cannot
//! drift apart between call sites.

use crate::{
    error::{AppError, AppResult},
    models::enums::{DeviceOwnership, DeviceStatus, SimStatus},
};

/// Result of releasing a device back into inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceRelease {
    pub status: DeviceStatus,
    /// Whether the owning client reference is cleared. OWNED devices keep
    /// their client on release (matches long-standing production behavior;
    /// intentionally not "fixed").
    pub clear_client: bool,
}

/// Compute the release transition for a device.
///
/// The ownership flag must be read fresh from the store at release time, not
/// from the assignment that placed the device: ownership can change while a
/// device is in service.
pub fn release_device(ownership: DeviceOwnership) -> DeviceRelease {
    match ownership {
        DeviceOwnership::Leasing => DeviceRelease {
            status: DeviceStatus::Available,
            clear_client: true,
        },
        DeviceOwnership::Owned => DeviceRelease {
            status: DeviceStatus::TransferAvailable,
            clear_client: false,
        },
    }
}

/// SIMs always return to the public pool.
pub fn release_sim() -> SimStatus {
    SimStatus::Available
}

/// Acquisition precondition: a device can only be acquired from AVAILABLE.
///
/// Checked by the lifecycle handlers against a pre-transaction read; the
/// repository re-asserts it with a conditional UPDATE inside the transaction.
pub fn ensure_device_available(status: DeviceStatus) -> AppResult<()> {
    match status {
        DeviceStatus::Available => Ok(()),
        DeviceStatus::Assigned | DeviceStatus::TransferAvailable => {
            Err(AppError::Conflict("Device is not available".to_string()))
        }
    }
}

/// Acquisition precondition for SIM cards.
pub fn ensure_sim_available(status: SimStatus) -> AppResult<()> {
    match status {
        SimStatus::Available => Ok(()),
        SimStatus::Assigned => Err(AppError::Conflict("SIM is not available".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leasing_device_releases_to_available_and_clears_client() {
        let r = release_device(DeviceOwnership::Leasing);
        assert_eq!(r.status, DeviceStatus::Available);
        assert!(r.clear_client);
    }

    #[test]
    fn owned_device_releases_to_transfer_pool_keeping_client() {
        let r = release_device(DeviceOwnership::Owned);
        assert_eq!(r.status, DeviceStatus::TransferAvailable);
        assert!(!r.clear_client);
    }

    #[test]
    fn sim_always_releases_to_available() {
        assert_eq!(release_sim(), SimStatus::Available);
    }

    #[test]
    fn only_available_devices_can_be_acquired() {
        assert!(ensure_device_available(DeviceStatus::Available).is_ok());
        assert!(matches!(
            ensure_device_available(DeviceStatus::Assigned),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            ensure_device_available(DeviceStatus::TransferAvailable),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn only_available_sims_can_be_acquired() {
        assert!(ensure_sim_available(SimStatus::Available).is_ok());
        assert!(matches!(
            ensure_sim_available(SimStatus::Assigned),
            Err(AppError::Conflict(_))
        ));
    }
}

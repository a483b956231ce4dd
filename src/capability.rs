//! Host capabilities the core consumes but does not own.
//!
//! Permission-gated calls return a [`Permission`] tag instead of failing, so
//! both outcomes have to be handled at the call site.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    Granted,
    Denied,
}

impl Permission {
    pub fn is_granted(self) -> bool {
        self == Permission::Granted
    }
}

/// Device appearance preference reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

/// Reports the host's ambient appearance, if it has one.
pub trait AppearanceSource: Send + Sync {
    fn color_scheme(&self) -> Option<ColorScheme>;
}

/// Asks the user for permission to post notifications.
pub trait NotificationPermissionService: Send + Sync {
    fn request_permission(&self) -> Permission;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DevicePosition {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("position unavailable: {0}")]
pub struct PositionError(pub String);

/// Device location hardware.
pub trait GeolocationProvider: Send + Sync {
    fn request_permission(&self) -> Permission;
    fn current_position(&self) -> Result<DevicePosition, PositionError>;
}

/// One-shot permission-then-read. A denial or a failed read yields None and
/// is not retried.
pub fn locate_device(provider: &dyn GeolocationProvider) -> Option<DevicePosition> {
    if !provider.request_permission().is_granted() {
        tracing::warn!("location permission denied, device marker disabled");
        return None;
    }
    match provider.current_position() {
        Ok(position) => Some(position),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read device position");
            None
        }
    }
}

/// Appearance source with a fixed answer, for hosts without an appearance API.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAppearance(pub Option<ColorScheme>);

impl AppearanceSource for FixedAppearance {
    fn color_scheme(&self) -> Option<ColorScheme> {
        self.0
    }
}

/// Permission service that always answers the same way.
#[derive(Debug, Clone, Copy)]
pub struct FixedPermission(pub Permission);

impl NotificationPermissionService for FixedPermission {
    fn request_permission(&self) -> Permission {
        self.0
    }
}

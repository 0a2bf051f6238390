//! Sync health as seen by the presentation layer.

/// Observable state of a sync coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Local collection matches the last successful remote exchange.
    Synced,
    /// A push is in flight.
    Syncing,
    /// The last remote call failed; local data is kept as-is.
    Error,
    /// No authenticated owner; the cache operates standalone.
    Offline,
}

/// Icon the indicator should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Check,
    Spinner,
    Alert,
    CloudOff,
}

/// Display tuple for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusIndicator {
    pub icon: IconKind,
    pub label: &'static str,
    pub color_class: &'static str,
}

/// Pure projection from coordinator state to a display tuple. No side
/// effects, no state of its own.
pub fn indicator(status: SyncStatus) -> StatusIndicator {
    match status {
        SyncStatus::Synced => StatusIndicator {
            icon: IconKind::Check,
            label: "Synced",
            color_class: "text-green-500",
        },
        SyncStatus::Syncing => StatusIndicator {
            icon: IconKind::Spinner,
            label: "Syncing...",
            color_class: "text-blue-500",
        },
        SyncStatus::Error => StatusIndicator {
            icon: IconKind::Alert,
            label: "Sync error",
            color_class: "text-red-500",
        },
        SyncStatus::Offline => StatusIndicator {
            icon: IconKind::CloudOff,
            label: "Offline",
            color_class: "text-gray-500",
        },
    }
}

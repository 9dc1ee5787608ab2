use crate::domain::PermitTier;

/// Largest footprint (m²) that needs no permit at all.
pub const NO_PERMIT_MAX_AREA: f64 = 15.0;

/// Largest footprint (m²) that only needs a building notification.
pub const NOTIFICATION_MAX_AREA: f64 = 30.0;

/// Classifies the permit requirement for a footprint area in m².
pub fn classify(area: f64) -> PermitTier {
    if area > NOTIFICATION_MAX_AREA {
        PermitTier::FullPermit
    } else if area > NO_PERMIT_MAX_AREA {
        PermitTier::Notification
    } else {
        PermitTier::NoPermit
    }
}

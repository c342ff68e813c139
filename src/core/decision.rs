use crate::core::geofence::is_within_any_fence;
use crate::domain::model::{
    AttendanceRecord, GeoFence, PunchDecision, PunchRequest, RejectionReason,
};
use crate::domain::ports::{Clock, SystemClock};
use uuid::Uuid;

/// Decides whether a single online punch is accepted.
///
/// Pure apart from reading the clock: no I/O, no shared state, safe to call
/// from any number of tasks at once.
#[derive(Debug, Clone, Default)]
pub struct PunchDecisionService<C: Clock = SystemClock> {
    clock: C,
}

impl PunchDecisionService<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> PunchDecisionService<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn decide(&self, request: &PunchRequest, fences: &[GeoFence]) -> PunchDecision {
        if !request.point.is_finite() {
            return PunchDecision::Rejected(RejectionReason::InvalidCoordinates);
        }

        // an empty fence list lands here too
        if !is_within_any_fence(&request.point, fences) {
            return PunchDecision::Rejected(RejectionReason::OutsideGeoFence);
        }

        PunchDecision::Accepted(AttendanceRecord {
            id: Uuid::new_v4(),
            user_id: request.user_id.clone(),
            punch_type: request.direction,
            timestamp: self.clock.now(),
            latitude: request.point.latitude,
            longitude: request.point.longitude,
            photo_url: request.photo_url.clone(),
            battery_status: request.device.battery_status.clone(),
            network_status: request.device.network_status.clone(),
            is_offline_punch: false,
            synced_at: None,
        })
    }
}

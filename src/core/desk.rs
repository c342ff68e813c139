use crate::core::decision::PunchDecisionService;
use crate::domain::model::{
    DeviceMetadata, Point, PunchDecision, PunchDirection, PunchRequest, RejectionReason,
};
use crate::domain::ports::{AttendanceStore, Clock, FenceSource, PhotoStore, SystemClock};
use crate::utils::error::{PunchError, Result};
use serde::{Deserialize, Serialize};

/// Punch fields as a transport delivers them: everything is text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchForm {
    pub user_id: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub punch_type: String,
    pub battery_status: Option<String>,
    pub network_status: Option<String>,
    pub photo_url: Option<String>,
}

impl PunchForm {
    pub fn point(&self) -> Option<Point> {
        let longitude = parse_coordinate(self.longitude.as_deref()?)?;
        let latitude = parse_coordinate(self.latitude.as_deref()?)?;
        Some(Point::new(longitude, latitude))
    }

    pub fn direction(&self) -> Result<PunchDirection> {
        self.punch_type
            .parse::<PunchDirection>()
            .map_err(|message| PunchError::ValidationError { message })
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Runs one punch end to end: fences in, decision out, side effects applied.
pub struct PunchDesk<F, A, P, C = SystemClock>
where
    F: FenceSource,
    A: AttendanceStore,
    P: PhotoStore,
    C: Clock,
{
    fences: F,
    attendance: A,
    photos: P,
    service: PunchDecisionService<C>,
}

impl<F, A, P> PunchDesk<F, A, P, SystemClock>
where
    F: FenceSource,
    A: AttendanceStore,
    P: PhotoStore,
{
    pub fn new(fences: F, attendance: A, photos: P) -> Self {
        Self::with_service(fences, attendance, photos, PunchDecisionService::new())
    }
}

impl<F, A, P, C> PunchDesk<F, A, P, C>
where
    F: FenceSource,
    A: AttendanceStore,
    P: PhotoStore,
    C: Clock,
{
    pub fn with_service(
        fences: F,
        attendance: A,
        photos: P,
        service: PunchDecisionService<C>,
    ) -> Self {
        Self {
            fences,
            attendance,
            photos,
            service,
        }
    }

    pub fn attendance(&self) -> &A {
        &self.attendance
    }

    pub async fn submit(&self, form: PunchForm) -> Result<PunchDecision> {
        let photo_url = form.photo_url.clone();

        let direction = match form.direction() {
            Ok(direction) => direction,
            Err(e) => {
                self.discard_photo(photo_url.as_deref()).await;
                return Err(e);
            }
        };

        let point = match form.point() {
            Some(point) => point,
            None => {
                tracing::info!(user_id = %form.user_id, "Punch rejected: unreadable coordinates");
                self.discard_photo(photo_url.as_deref()).await;
                return Ok(PunchDecision::Rejected(RejectionReason::InvalidCoordinates));
            }
        };

        let fences = match self.fences.load_fences().await {
            Ok(fences) => fences,
            Err(e) => {
                tracing::error!("Failed to load geo-fences: {}", e);
                self.discard_photo(photo_url.as_deref()).await;
                return Err(e);
            }
        };

        if fences.is_empty() {
            tracing::warn!("No geo-fences configured, every punch will be rejected");
        }

        let request = PunchRequest {
            user_id: form.user_id,
            point,
            direction,
            device: DeviceMetadata {
                battery_status: form.battery_status,
                network_status: form.network_status,
            },
            photo_url: form.photo_url,
        };

        let decision = self.service.decide(&request, &fences);

        match &decision {
            PunchDecision::Accepted(record) => {
                if let Err(e) = self.attendance.append(record).await {
                    tracing::error!("Failed to store punch {}: {}", record.id, e);
                    self.discard_photo(photo_url.as_deref()).await;
                    return Err(e);
                }
                tracing::info!(
                    user_id = %record.user_id,
                    punch_type = %record.punch_type,
                    "✅ Punch recorded"
                );
            }
            PunchDecision::Rejected(reason) => {
                tracing::info!(
                    user_id = %request.user_id,
                    longitude = request.point.longitude,
                    latitude = request.point.latitude,
                    "Punch rejected: {:?}",
                    reason
                );
                self.discard_photo(photo_url.as_deref()).await;
            }
        }

        Ok(decision)
    }

    async fn discard_photo(&self, photo_url: Option<&str>) {
        let Some(url) = photo_url else {
            return;
        };
        match self.photos.discard(url).await {
            Ok(()) => tracing::debug!("Discarded photo {}", url),
            Err(e) => tracing::warn!("Could not discard photo {}: {}", url, e),
        }
    }
}

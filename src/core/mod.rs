pub mod decision;
pub mod desk;
pub mod fence_format;
pub mod geofence;
pub mod report;

pub use crate::domain::model::{
    AttendanceRecord, GeoFence, Point, Polygon, PunchDecision, PunchDirection, PunchRequest,
    RejectionReason,
};
pub use crate::domain::ports::{AttendanceStore, Clock, FenceSource, PhotoStore, SystemClock};
pub use crate::utils::error::Result;

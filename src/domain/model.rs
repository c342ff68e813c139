use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A planar `(longitude, latitude)` pair in degrees. No wrapping or range checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub longitude: f64,
    pub latitude: f64,
}

impl Point {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite()
    }
}

/// Implicitly closed ring of vertices. Rings with fewer than 3 vertices contain nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        Self::new(pairs.iter().map(|&(lon, lat)| Point::new(lon, lat)).collect())
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoFence {
    pub id: String,
    pub name: String,
    pub polygons: Vec<Polygon>,
}

impl GeoFence {
    pub fn new(id: impl Into<String>, name: impl Into<String>, polygons: Vec<Polygon>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            polygons,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PunchDirection {
    CheckIn,
    CheckOut,
}

impl PunchDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PunchDirection::CheckIn => "check-in",
            PunchDirection::CheckOut => "check-out",
        }
    }
}

impl fmt::Display for PunchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PunchDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "check-in" => Ok(PunchDirection::CheckIn),
            "check-out" => Ok(PunchDirection::CheckOut),
            other => Err(format!(
                "Unknown punch type '{}', expected 'check-in' or 'check-out'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMetadata {
    pub battery_status: Option<String>,
    pub network_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PunchRequest {
    pub user_id: String,
    pub point: Point,
    pub direction: PunchDirection,
    pub device: DeviceMetadata,
    pub photo_url: Option<String>,
}

/// A persisted punch. Field names match the stored attendance log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub user_id: String,
    pub punch_type: PunchDirection,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub photo_url: Option<String>,
    pub battery_status: Option<String>,
    pub network_status: Option<String>,
    pub is_offline_punch: bool,
    pub synced_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    InvalidCoordinates,
    OutsideGeoFence,
}

impl RejectionReason {
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::InvalidCoordinates => "Punch coordinates are missing or not numeric.",
            RejectionReason::OutsideGeoFence => {
                "Punch location is outside designated office areas."
            }
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PunchDecision {
    Accepted(AttendanceRecord),
    Rejected(RejectionReason),
}

impl PunchDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, PunchDecision::Accepted(_))
    }

    pub fn record(&self) -> Option<&AttendanceRecord> {
        match self {
            PunchDecision::Accepted(record) => Some(record),
            PunchDecision::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            PunchDecision::Accepted(_) => None,
            PunchDecision::Rejected(reason) => Some(*reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Employee,
    Admin,
    #[serde(rename = "HR")]
    Hr,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "Employee" | "employee" => Ok(Role::Employee),
            "Admin" | "admin" => Ok(Role::Admin),
            "HR" | "hr" => Ok(Role::Hr),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

/// The authenticated caller, as supplied by the auth layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: String,
    pub role: Role,
}

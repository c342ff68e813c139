use crate::domain::model::{AttendanceRecord, GeoFence};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub trait FenceSource: Send + Sync {
    fn load_fences(&self) -> impl std::future::Future<Output = Result<Vec<GeoFence>>> + Send;
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn append(&self, record: &AttendanceRecord) -> Result<()>;
    async fn list(&self) -> Result<Vec<AttendanceRecord>>;
}

pub trait PhotoStore: Send + Sync {
    fn discard(&self, photo_url: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

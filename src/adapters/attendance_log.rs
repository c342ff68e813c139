use crate::domain::model::AttendanceRecord;
use crate::domain::ports::AttendanceStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Append-only JSON-lines attendance log.
#[derive(Debug)]
pub struct JsonlAttendanceLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlAttendanceLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl AttendanceStore for JsonlAttendanceLog {
    async fn append(&self, record: &AttendanceRecord) -> Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<AttendanceRecord>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| -> Result<AttendanceRecord> { Ok(serde_json::from_str(line)?) })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PunchDirection;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;
    use uuid::Uuid;

    fn record(user_id: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            punch_type: PunchDirection::CheckOut,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 6, 17, 30, 0).unwrap(),
            latitude: 12.9716,
            longitude: 77.5946,
            photo_url: Some("/uploads/selfies/selfie-9.jpg".to_string()),
            battery_status: None,
            network_status: Some("wifi".to_string()),
            is_offline_punch: false,
            synced_at: None,
        }
    }

    #[tokio::test]
    async fn test_missing_log_lists_empty() {
        let dir = TempDir::new().unwrap();
        let log = JsonlAttendanceLog::new(dir.path().join("attendance.jsonl"));
        assert!(log.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_appends_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("attendance.jsonl");

        let first = record("alice");
        let second = record("bob");
        {
            let log = JsonlAttendanceLog::new(&path);
            log.append(&first).await.unwrap();
            log.append(&second).await.unwrap();
        }

        let records = JsonlAttendanceLog::new(&path).list().await.unwrap();
        assert_eq!(records, vec![first, second]);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.lines().count(), 2);
        assert!(raw.contains("\"punchType\":\"check-out\""));
    }

    #[tokio::test]
    async fn test_concurrent_appends_keep_lines_whole() {
        let dir = TempDir::new().unwrap();
        let log = std::sync::Arc::new(JsonlAttendanceLog::new(dir.path().join("a.jsonl")));

        let mut handles = Vec::new();
        for i in 0..16 {
            let log = log.clone();
            handles.push(tokio::spawn(async move {
                log.append(&record(&format!("user-{}", i))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(log.list().await.unwrap().len(), 16);
    }
}

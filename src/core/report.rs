use crate::domain::model::{AttendanceRecord, PunchDirection, Role, Viewer};
use crate::utils::error::{PunchError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Only a fully specified range filters anything.
    pub fn from_bounds(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Some(Self { start, end }),
            _ => None,
        }
    }

    pub fn includes(&self, timestamp: &DateTime<Utc>) -> bool {
        *timestamp >= self.start && *timestamp <= self.end
    }
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` read as midnight UTC.
pub fn parse_date_bound(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| PunchError::ValidationError {
            message: format!("Invalid date '{}', expected YYYY-MM-DD or RFC 3339", raw),
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub total_punches: usize,
    pub check_ins: usize,
    pub check_outs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub summary: AttendanceSummary,
    pub logs: Vec<AttendanceRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub employee_id: Option<String>,
    pub range: Option<DateRange>,
}

fn in_range(record: &AttendanceRecord, range: Option<&DateRange>) -> bool {
    range.map_or(true, |range| range.includes(&record.timestamp))
}

pub fn can_view_summary(viewer: &Viewer, user_id: &str) -> bool {
    viewer.user_id == user_id || matches!(viewer.role, Role::Admin | Role::Hr)
}

/// The cross-employee log listing is for admins and HR only.
pub fn can_view_logs(viewer: &Viewer) -> bool {
    matches!(viewer.role, Role::Admin | Role::Hr)
}

/// One user's punches in ascending time order, with direction counts.
pub fn summarize(
    user_id: &str,
    records: &[AttendanceRecord],
    range: Option<&DateRange>,
) -> SummaryReport {
    let mut logs: Vec<AttendanceRecord> = records
        .iter()
        .filter(|record| record.user_id == user_id && in_range(record, range))
        .cloned()
        .collect();
    logs.sort_by_key(|record| record.timestamp);

    let check_ins = logs
        .iter()
        .filter(|record| record.punch_type == PunchDirection::CheckIn)
        .count();
    let check_outs = logs
        .iter()
        .filter(|record| record.punch_type == PunchDirection::CheckOut)
        .count();

    SummaryReport {
        summary: AttendanceSummary {
            total_punches: logs.len(),
            check_ins,
            check_outs,
        },
        logs,
    }
}

/// Admin listing, newest first.
pub fn filter_logs(records: &[AttendanceRecord], filter: &LogFilter) -> Vec<AttendanceRecord> {
    let mut logs: Vec<AttendanceRecord> = records
        .iter()
        .filter(|record| {
            filter
                .employee_id
                .as_deref()
                .map_or(true, |employee| record.user_id == employee)
        })
        .filter(|record| in_range(record, filter.range.as_ref()))
        .cloned()
        .collect();
    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    logs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn record(user_id: &str, punch_type: PunchDirection, timestamp: DateTime<Utc>) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            punch_type,
            timestamp,
            latitude: 12.97,
            longitude: 77.59,
            photo_url: None,
            battery_status: None,
            network_status: None,
            is_offline_punch: false,
            synced_at: None,
        }
    }

    fn sample() -> Vec<AttendanceRecord> {
        vec![
            record("alice", PunchDirection::CheckOut, at(1, 18)),
            record("alice", PunchDirection::CheckIn, at(1, 9)),
            record("bob", PunchDirection::CheckIn, at(1, 10)),
            record("alice", PunchDirection::CheckIn, at(2, 9)),
            record("alice", PunchDirection::CheckOut, at(3, 17)),
        ]
    }

    #[test]
    fn test_summary_counts_and_orders_one_user() {
        let report = summarize("alice", &sample(), None);

        assert_eq!(
            report.summary,
            AttendanceSummary {
                total_punches: 4,
                check_ins: 2,
                check_outs: 2
            }
        );
        let times: Vec<_> = report.logs.iter().map(|r| r.timestamp).collect();
        assert_eq!(times, vec![at(1, 9), at(1, 18), at(2, 9), at(3, 17)]);
    }

    #[test]
    fn test_summary_range_is_inclusive() {
        let range = DateRange::from_bounds(Some(at(1, 18)), Some(at(2, 9))).unwrap();
        let report = summarize("alice", &sample(), Some(&range));

        assert_eq!(report.summary.total_punches, 2);
        assert_eq!(report.summary.check_ins, 1);
        assert_eq!(report.summary.check_outs, 1);
    }

    #[test]
    fn test_half_open_bounds_do_not_filter() {
        assert!(DateRange::from_bounds(Some(at(1, 0)), None).is_none());
        assert!(DateRange::from_bounds(None, Some(at(1, 0))).is_none());
    }

    #[test]
    fn test_summary_for_unknown_user_is_empty() {
        let report = summarize("carol", &sample(), None);
        assert_eq!(report.summary, AttendanceSummary::default());
        assert!(report.logs.is_empty());
    }

    #[test]
    fn test_filter_logs_newest_first() {
        let logs = filter_logs(&sample(), &LogFilter::default());
        assert_eq!(logs.len(), 5);
        assert_eq!(logs[0].timestamp, at(3, 17));
        assert_eq!(logs[4].timestamp, at(1, 9));
    }

    #[test]
    fn test_filter_logs_by_employee_and_range() {
        let filter = LogFilter {
            employee_id: Some("alice".to_string()),
            range: DateRange::from_bounds(Some(at(1, 0)), Some(at(1, 23))),
        };
        let logs = filter_logs(&sample(), &filter);

        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|r| r.user_id == "alice"));
        assert_eq!(logs[0].timestamp, at(1, 18));
    }

    #[test]
    fn test_parse_date_bound() {
        assert_eq!(parse_date_bound("2024-03-02").unwrap(), at(2, 0));
        assert_eq!(parse_date_bound("2024-03-02T09:00:00Z").unwrap(), at(2, 9));
        assert_eq!(parse_date_bound("2024-03-02T14:30:00+05:30").unwrap(), at(2, 9));
        assert!(parse_date_bound("02/03/2024").is_err());
    }

    #[test]
    fn test_summary_visibility() {
        let employee = Viewer {
            user_id: "alice".to_string(),
            role: Role::Employee,
        };
        let hr = Viewer {
            user_id: "henry".to_string(),
            role: Role::Hr,
        };
        let admin = Viewer {
            user_id: "root".to_string(),
            role: Role::Admin,
        };

        assert!(can_view_summary(&employee, "alice"));
        assert!(!can_view_summary(&employee, "bob"));
        assert!(can_view_summary(&hr, "bob"));
        assert!(can_view_summary(&admin, "bob"));
    }

    #[test]
    fn test_log_listing_visibility() {
        let viewer = |role| Viewer {
            user_id: "alice".to_string(),
            role,
        };

        assert!(!can_view_logs(&viewer(Role::Employee)));
        assert!(can_view_logs(&viewer(Role::Hr)));
        assert!(can_view_logs(&viewer(Role::Admin)));
    }
}

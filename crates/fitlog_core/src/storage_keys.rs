use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::contract::WorkoutEntry;

pub const WORKOUT_CONTENT_TYPE: &str = "application/json";

/// One record ready to hand to the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutObject {
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
    pub metadata: BTreeMap<String, String>,
}

/// `{user_id}/{YYYY}/{MM}/{YYYY-MM-DD}_{HH-MM-SS}.json`
///
/// Second resolution: two records for the same user in the same second share
/// a key and the later write replaces the earlier one.
pub fn workout_object_key(user_id: &str, recorded_at: &DateTime<Utc>) -> String {
    format!(
        "{user_id}/{}/{}.json",
        recorded_at.format("%Y/%m"),
        recorded_at.format("%Y-%m-%d_%H-%M-%S"),
    )
}

pub fn workout_object_metadata(entry: &WorkoutEntry) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("user-id".to_string(), entry.user_id.clone()),
        ("exercise".to_string(), entry.exercise.clone()),
        ("date".to_string(), entry.date.clone()),
    ])
}

pub fn workout_object(
    entry: &WorkoutEntry,
    recorded_at: &DateTime<Utc>,
) -> Result<WorkoutObject, serde_json::Error> {
    Ok(WorkoutObject {
        key: workout_object_key(&entry.user_id, recorded_at),
        body: serde_json::to_vec_pretty(entry)?,
        content_type: WORKOUT_CONTENT_TYPE.to_string(),
        metadata: workout_object_metadata(entry),
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn instant(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 14, hour, minute, second)
            .single()
            .expect("valid instant")
    }

    fn sample_entry() -> WorkoutEntry {
        WorkoutEntry {
            user_id: "u1".to_string(),
            exercise: "Bench Press".to_string(),
            sets: Some(3),
            reps: Some(10),
            weight: Some(135.0),
            notes: "felt strong".to_string(),
            timestamp: "2026-02-14T07:08:09".to_string(),
            date: "2026-02-14".to_string(),
            time: "07:08:09".to_string(),
        }
    }

    #[test]
    fn builds_key_with_month_partitions() {
        let key = workout_object_key("u1", &instant(7, 8, 9));
        assert_eq!(key, "u1/2026/02/2026-02-14_07-08-09.json");
    }

    #[test]
    fn same_second_submissions_share_a_key() {
        let first = workout_object_key("u1", &instant(7, 8, 9));
        let second = workout_object_key(
            "u1",
            &(instant(7, 8, 9) + chrono::Duration::milliseconds(750)),
        );
        let later = workout_object_key("u1", &instant(7, 8, 10));

        assert_eq!(first, second);
        assert_ne!(first, later);
    }

    #[test]
    fn object_carries_metadata_and_pretty_body() {
        let object = workout_object(&sample_entry(), &instant(7, 8, 9)).expect("object builds");

        assert_eq!(object.content_type, "application/json");
        assert_eq!(object.metadata.get("user-id").map(String::as_str), Some("u1"));
        assert_eq!(
            object.metadata.get("exercise").map(String::as_str),
            Some("Bench Press")
        );
        assert_eq!(
            object.metadata.get("date").map(String::as_str),
            Some("2026-02-14")
        );

        let body = String::from_utf8(object.body).expect("utf-8 body");
        assert!(body.starts_with("{\n  \"userId\": \"u1\""));
        let decoded: WorkoutEntry = serde_json::from_str(&body).expect("body decodes");
        assert_eq!(decoded, sample_entry());
    }
}

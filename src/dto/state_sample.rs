use crate::common::*;

use crate::utils_modules::traits::*;

#[doc = "특정 엔티티의 상태 이력 한 건. 상태값은 숫자 여부와 무관하게 원문 그대로 보관한다."]
#[derive(Debug, Clone, Serialize, Deserialize, Getters, new)]
#[getset(get = "pub")]
pub struct StateSample {
    pub last_changed: DateTime<Utc>,
    pub state: String,
}

impl FromHistoryEntry for StateSample {
    fn from_history_entry(entry: &Value) -> anyhow::Result<Self> {
        let last_changed: DateTime<Utc> = entry
            .get("last_changed")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                anyhow!("[StateSample->from_history_entry] entry.last_changed is missing or not a string")
            })?
            .parse::<DateTime<Utc>>()
            .map_err(|e| {
                anyhow!("[StateSample->from_history_entry] entry.last_changed is not a valid timestamp: {}", e)
            })?;

        let state: String = entry
            .get("state")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                anyhow!("[StateSample->from_history_entry] entry.state is missing or not a string")
            })?
            .to_string();

        Ok(StateSample {
            last_changed,
            state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_entry() {
        let entry = serde_json::json!({
            "entity_id": "sensor.temp",
            "state": "20.5",
            "last_changed": "2026-01-02T03:04:05+00:00",
            "attributes": { "friendly_name": "Temperature" }
        });

        let sample = StateSample::from_history_entry(&entry).unwrap();
        assert_eq!(sample.state(), "20.5");
        assert_eq!(
            *sample.last_changed(),
            "2026-01-02T03:04:05Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn missing_timestamp_is_an_error() {
        let entry = serde_json::json!({ "state": "20.5" });
        assert!(StateSample::from_history_entry(&entry).is_err());
    }
}

use crate::common::*;

use std::collections::HashMap;

use crate::traits::{repository_traits::ha_repository::*, service_traits::query_service::*};

use crate::repository::ha_repository_impl::*;

use crate::utils_modules::traits::*;

use crate::dto::{entity_history::*, state_sample::*};

#[derive(Debug, new)]
pub struct QueryServiceImpl {
    ha_conn: Arc<HaRepositoryImpl>,
}

impl QueryServiceImpl {
    #[doc = r#"
        Home Assistant history 응답을 엔티티별 샘플 목록으로 변환하는 함수.

        응답 본문은 엔티티 하나당 배열 하나를 담은 2차원 배열이다. 각 내부 배열의
        첫 항목에서 entity_id를 얻고, 나머지 항목들을 `StateSample` 로 변환한다.
        개별 항목 변환 실패는 경고만 남기고 건너뛴다. 반환 순서는 요청 엔티티
        순서를 따르며, 응답에 없는 엔티티는 결과에서 제외된다.

        # Arguments
        * `response_body` - history period API 응답 JSON
        * `entities` - 요청에 포함된 엔티티 id 목록

        # Returns
        * `Vec<(String, Vec<StateSample>)>` - 엔티티 id 와 샘플 목록의 쌍
        * `anyhow::Error` - 응답 구조가 기대 형태가 아닌 경우
    "#]
    fn parse_history_response(
        &self,
        response_body: &Value,
        entities: &[String],
    ) -> Result<Vec<(String, Vec<StateSample>)>, anyhow::Error> {
        let entity_lists: &Vec<Value> = response_body.as_array().ok_or_else(|| {
            anyhow!("[QueryServiceImpl->parse_history_response] history response is not an array")
        })?;

        let mut samples_by_entity: HashMap<String, Vec<StateSample>> = HashMap::new();

        for entity_states in entity_lists {
            let states: &Vec<Value> = entity_states.as_array().ok_or_else(|| {
                anyhow!(
                    "[QueryServiceImpl->parse_history_response] entity history is not an array"
                )
            })?;

            let first_state: &Value = match states.first() {
                Some(first_state) => first_state,
                None => continue,
            };

            let entity_id: String = first_state
                .get("entity_id")
                .and_then(|v| v.as_str())
                .ok_or_else(|| {
                    anyhow!(
                        "[QueryServiceImpl->parse_history_response] entity_id is missing or not a string"
                    )
                })?
                .to_string();

            /* 개별 항목의 변환 실패는 치명적이지 않다 */
            let samples: Vec<StateSample> = states
                .iter()
                .filter_map(|entry| match StateSample::from_history_entry(entry) {
                    Ok(sample) => Some(sample),
                    Err(e) => {
                        warn!("{:?}", e);
                        None
                    }
                })
                .collect();

            samples_by_entity.insert(entity_id, samples);
        }

        /* 요청 순서를 유지한다. 응답에 없는 엔티티는 데이터가 없는 것이므로 제외 */
        let ordered: Vec<(String, Vec<StateSample>)> = entities
            .iter()
            .filter_map(|entity_id| {
                samples_by_entity
                    .remove(entity_id)
                    .map(|samples| (entity_id.clone(), samples))
            })
            .collect();

        Ok(ordered)
    }

    #[doc = r#"
        엔티티의 표시명을 조회해주는 함수.

        현재 상태의 `friendly_name` 속성을 사용하며, 조회 실패나 속성 부재 시에는
        엔티티 id 자체를 표시명으로 사용한다. 표시명 조회 실패는 차트 생성을
        중단시키지 않는다.
    "#]
    async fn resolve_display_name(&self, entity_id: &str) -> String {
        match self.ha_conn.get_entity_state(entity_id).await {
            Ok(state) => state
                .get("attributes")
                .and_then(|attrs| attrs.get("friendly_name"))
                .and_then(|v| v.as_str())
                .map(|name| name.to_string())
                .unwrap_or_else(|| entity_id.to_string()),
            Err(e) => {
                warn!(
                    "[QueryServiceImpl->resolve_display_name] Failed to fetch state of '{}', falling back to the entity id: {:?}",
                    entity_id, e
                );
                entity_id.to_string()
            }
        }
    }
}

#[async_trait]
impl QueryService for QueryServiceImpl {
    #[doc = "조회 구간 내 엔티티 이력과 표시명을 가져오는 함수"]
    async fn get_entity_history(
        &self,
        entities: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<EntityHistory> {
        let response_body: Value = self
            .ha_conn
            .get_history_period(entities, start, end)
            .await?;

        let samples_by_entity: Vec<(String, Vec<StateSample>)> =
            self.parse_history_response(&response_body, entities)?;

        let mut entries: Vec<EntityHistoryEntry> = Vec::new();

        for (entity_id, samples) in samples_by_entity {
            if samples.is_empty() {
                continue;
            }

            let display_name: String = self.resolve_display_name(&entity_id).await;
            entries.push(EntityHistoryEntry::new(entity_id, display_name, samples));
        }

        Ok(EntityHistory::new(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::configs::ha_server_config::*;

    fn query_service() -> QueryServiceImpl {
        let ha_config = HaServerConfig {
            ha_host: vec![String::from("localhost:8123")],
            ha_token: String::from("test-token"),
        };
        QueryServiceImpl::new(Arc::new(HaRepositoryImpl::new(&ha_config).unwrap()))
    }

    fn entities(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn parses_samples_in_request_order() {
        let service = query_service();
        let body = serde_json::json!([
            [
                { "entity_id": "sensor.b", "state": "1.0", "last_changed": "2026-01-01T00:00:00+00:00" }
            ],
            [
                { "entity_id": "sensor.a", "state": "2.0", "last_changed": "2026-01-01T00:00:00+00:00" },
                { "entity_id": "sensor.a", "state": "3.0", "last_changed": "2026-01-01T00:10:00+00:00" }
            ]
        ]);

        let parsed = service
            .parse_history_response(&body, &entities(&["sensor.a", "sensor.b"]))
            .unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].0, "sensor.a");
        assert_eq!(parsed[0].1.len(), 2);
        assert_eq!(parsed[1].0, "sensor.b");
        assert_eq!(parsed[1].1.len(), 1);
    }

    #[test]
    fn absent_entity_is_omitted() {
        let service = query_service();
        let body = serde_json::json!([
            [
                { "entity_id": "sensor.a", "state": "2.0", "last_changed": "2026-01-01T00:00:00+00:00" }
            ]
        ]);

        let parsed = service
            .parse_history_response(&body, &entities(&["sensor.a", "sensor.missing"]))
            .unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].0, "sensor.a");
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let service = query_service();
        let body = serde_json::json!([
            [
                { "entity_id": "sensor.a", "state": "2.0", "last_changed": "2026-01-01T00:00:00+00:00" },
                { "entity_id": "sensor.a", "state": "3.0" },
                { "entity_id": "sensor.a", "state": "4.0", "last_changed": "not-a-timestamp" }
            ]
        ]);

        let parsed = service
            .parse_history_response(&body, &entities(&["sensor.a"]))
            .unwrap();

        assert_eq!(parsed[0].1.len(), 1);
        assert_eq!(parsed[0].1[0].state(), "2.0");
    }

    #[test]
    fn non_array_response_is_an_error() {
        let service = query_service();
        let body = serde_json::json!({ "message": "unauthorized" });
        assert!(service
            .parse_history_response(&body, &entities(&["sensor.a"]))
            .is_err());
    }
}

use crate::common::*;

use crate::dto::state_sample::*;

#[doc = "조회 구간 안에서 이력이 존재한 엔티티 하나의 샘플 목록과 표시명"]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct EntityHistoryEntry {
    pub entity_id: String,
    pub display_name: String,
    pub samples: Vec<StateSample>,
}

#[doc = r#"
    이력 조회 결과 전체.

    요청에 포함된 엔티티 순서를 유지하며, 구간 안에 샘플이 하나도 없는 엔티티는
    목록에 포함되지 않는다.
"#]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct EntityHistory {
    pub entries: Vec<EntityHistoryEntry>,
}

impl EntityHistory {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

use crate::common::*;

use crate::dto::entity_history::*;

#[doc = r#"
    숫자 값으로 정제된 엔티티 하나의 시계열.

    이력 샘플 가운데 유한한 실수로 파싱되는 값만 남기며, 샘플의 도착 순서를
    그대로 유지한다. 이력이 이미 시간순이므로 점들의 타임스탬프는 단조
    비감소한다.
"#]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct EntitySeries {
    pub entity_id: String,
    pub display_name: String,
    pub points: Vec<(DateTime<Utc>, f64)>,
}

impl EntitySeries {
    #[doc = r#"
        이력 조회 결과를 렌더링 가능한 시계열 목록으로 변환해주는 함수.

        숫자가 아니거나 파싱 불가능한 샘플은 조용히 버려지며, 숫자 샘플이 하나도
        없는 엔티티는 결과 목록에서 제외된다. 입력이 정상이라면 실패하지 않는
        순수 변환이다.
    "#]
    pub fn build_all(history: &EntityHistory) -> Vec<EntitySeries> {
        history
            .entries()
            .iter()
            .filter_map(|entry| {
                let points: Vec<(DateTime<Utc>, f64)> = entry
                    .samples()
                    .iter()
                    .filter_map(|sample| {
                        sample
                            .state()
                            .parse::<f64>()
                            .ok()
                            .filter(|value| value.is_finite())
                            .map(|value| (*sample.last_changed(), value))
                    })
                    .collect();

                if points.is_empty() {
                    None
                } else {
                    Some(EntitySeries::new(
                        entry.entity_id().clone(),
                        entry.display_name().clone(),
                        points,
                    ))
                }
            })
            .collect()
    }

    #[doc = "시계열의 마지막 값. bar/pie 차트는 이 값을 사용한다."]
    pub fn last_value(&self) -> Option<f64> {
        self.points.last().map(|(_, value)| *value)
    }
}

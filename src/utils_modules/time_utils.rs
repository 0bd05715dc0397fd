use crate::common::*;

#[doc = "특정 시각에서 특정 시간(hour)을 빼준 시각을 반환하는 함수"]
pub fn minus_h(dt: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    dt - chrono::Duration::hours(hours)
}

#[doc = "기본 파일명 생성에 사용하는 타임스탬프 문자열을 반환하는 함수"]
pub fn timestamp_for_filename(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%d_%H%M%S").to_string()
}

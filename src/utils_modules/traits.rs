use crate::common::*;

/* Home Assistant history 응답 항목 → 도메인 타입 변환을 위한 공통 트레이트 */
pub trait FromHistoryEntry
where
    Self: Sized,
{
    fn from_history_entry(entry: &Value) -> Result<Self, anyhow::Error>;
}

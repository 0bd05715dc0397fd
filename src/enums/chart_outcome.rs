use crate::common::*;

/* 차트 생성 요청 한 건의 최종 결과. 데이터가 없는 경우는 오류가 아닌 정상 결과다. */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutcome {
    Generated(PathBuf),
    NoData,
}

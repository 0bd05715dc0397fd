use crate::common::*;

use crate::model::chart::chart_job_config::*;

#[doc = "주기적으로 렌더링할 차트 목록"]
#[derive(Debug, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct ChartListConfig {
    pub chart: Vec<ChartJobConfig>,
}

use crate::common::*;

use crate::enums::chart_outcome::*;
use crate::model::chart::chart_request::*;

#[async_trait]
pub trait ChartService: Send + Sync {
    #[doc = "
        Run the full chart pipeline for one request: fetch history, build the
        numeric series, render the image and write it to the resolved output
        path. Returns `ChartOutcome::NoData` when no entity produced a numeric
        sample in the window.
    "]
    async fn generate_chart(&self, request: ChartRequest) -> anyhow::Result<ChartOutcome>;
}

use crate::common::*;

use crate::dto::entity_series::*;
use crate::model::chart::chart_request::*;

/* 렌더링은 CPU 바운드 동기 작업이다. 호출측이 blocking 경계를 책임진다. */
pub trait RenderService: Send + Sync {
    #[doc = "
        Render the given series into an encoded PNG image
        # Arguments
        * `series` - Cleaned numeric series, in request order
        * `request` - Chart kind, dimensions, labels and styling options
    "]
    fn render(
        &self,
        series: &[EntitySeries],
        request: &ChartRequest,
    ) -> anyhow::Result<Vec<u8>>;
}

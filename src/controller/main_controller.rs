use crate::common::*;

use crate::utils_modules::io_utils::*;

use crate::model::{chart::chart_list_config::*, chart::chart_request::*, configs::total_config::*};

use crate::enums::chart_outcome::*;

use crate::env_configuration::env_config::*;

use crate::traits::service_traits::chart_service::*;

#[derive(Debug, new)]
pub struct MainController<C: ChartService> {
    chart_service: C,
}

impl<C: ChartService> MainController<C> {
    #[doc = r#"
        메인 루프를 실행하는 핵심 함수로, 설정된 주기마다 차트 렌더링 작업을 반복 수행한다.

        1. 차트 목록 파일(`CHART_LIST_PATH`)을 읽어와 렌더링 대상 차트 목록을 가져온다
        2. `ticker_sec` 주기마다 목록의 모든 차트를 순차적으로 생성
        3. 무한루프로 동작하며, 개별 차트 생성 실패 시 해당 차트만 건너뛰고 다음으로 진행

        # Returns
        * `anyhow::Result<()>` - 정상 종료 시 Ok(()), 치명적 오류 시 Err
    "#]
    pub async fn main_task(&self) -> anyhow::Result<()> {
        let chart_list: ChartListConfig = read_toml_from_file::<ChartListConfig>(&CHART_LIST_PATH)?;
        let ticker_sec: u64 = *get_system_config_info().ticker_sec();

        let mut ticker: Interval = interval(Duration::from_secs(ticker_sec));

        loop {
            ticker.tick().await;

            self.generate_configured_charts(&chart_list).await;
        }
    }

    #[doc = "차트 목록의 모든 항목을 렌더링해주는 함수"]
    async fn generate_configured_charts(&self, chart_list: &ChartListConfig) {
        for job in chart_list.chart() {
            /* 스키마 검증을 통과하지 못한 항목은 건너뛴다 */
            if let Err(e) = job.validate() {
                error!("{:?}", e);
                continue;
            }

            let request: ChartRequest = ChartRequest::from_config(job, Utc::now());
            let filename: String = request.filename().clone();

            match self.chart_service.generate_chart(request).await {
                Ok(ChartOutcome::Generated(path)) => {
                    info!("Chart generated successfully: {:?}", path);
                }
                Ok(ChartOutcome::NoData) => {
                    info!("No chart produced for '{}': no data in the window", filename);
                }
                Err(e) => {
                    error!("{:?}", e);
                    continue;
                }
            }
        }
    }
}

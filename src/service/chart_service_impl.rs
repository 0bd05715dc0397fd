use crate::common::*;

use crate::traits::service_traits::{chart_service::*, query_service::*, render_service::*};

use crate::dto::{entity_history::*, entity_series::*};

use crate::enums::chart_outcome::*;

use crate::model::chart::chart_request::*;
use crate::model::configs::output_config::*;

use crate::utils_modules::{io_utils::*, time_utils::*};

#[derive(Debug, new)]
pub struct ChartServiceImpl<Q: QueryService, R: RenderService> {
    query_service: Q,
    render_service: Arc<R>,
    output_config: OutputConfig,
}

#[async_trait]
impl<Q, R> ChartService for ChartServiceImpl<Q, R>
where
    Q: QueryService + Send + Sync,
    R: RenderService + Send + Sync + 'static,
{
    #[doc = r#"
        차트 생성 요청 한 건의 전체 파이프라인을 수행하는 함수.

        1. 요청 시점 기준 [now - hours_to_show, now) 구간의 이력을 조회
        2. 조회 결과가 비어 있으면 파일을 만들지 않고 `NoData` 반환
        3. 숫자 시리즈를 구성하고, 전부 비었으면 역시 `NoData` 반환
        4. 블로킹 렌더링을 전용 스레드에서 수행
        5. 출력 경로를 결정하고 인코딩된 이미지를 저장

        어떤 단계에서든 실패하면 해당 요청은 그대로 종료되며 재시도하지 않는다.
    "#]
    async fn generate_chart(&self, request: ChartRequest) -> anyhow::Result<ChartOutcome> {
        let end_time: DateTime<Utc> = Utc::now();
        let start_time: DateTime<Utc> = minus_h(end_time, i64::from(*request.hours_to_show()));

        let history: EntityHistory = self
            .query_service
            .get_entity_history(request.entities(), start_time, end_time)
            .await
            .with_context(|| {
                format!(
                    "[ChartServiceImpl->generate_chart] History store unavailable for entities {:?}",
                    request.entities()
                )
            })?;

        if history.is_empty() {
            info!("No data found for entities: {:?}", request.entities());
            return Ok(ChartOutcome::NoData);
        }

        let series: Vec<EntitySeries> = EntitySeries::build_all(&history);

        if series.is_empty() {
            info!(
                "No numeric data found for entities: {:?}",
                request.entities()
            );
            return Ok(ChartOutcome::NoData);
        }

        /* 렌더링은 블로킹 작업이므로 워커 스레드로 넘긴다 */
        let render_service: Arc<R> = Arc::clone(&self.render_service);
        let render_request: ChartRequest = request.clone();

        let handle: tokio::task::JoinHandle<anyhow::Result<Vec<u8>>> =
            tokio::task::spawn_blocking(move || render_service.render(&series, &render_request));

        let png_bytes: Vec<u8> = handle
            .await
            .context(
                "[ChartServiceImpl->generate_chart] blocking task join failed (panic/cancelled)",
            )?
            .with_context(|| {
                format!(
                    "[ChartServiceImpl->generate_chart] Rendering failed for '{}'",
                    request.filename()
                )
            })?;

        let output_path: PathBuf = resolve_output_path(&self.output_config, request.filename());

        tokio::fs::write(&output_path, &png_bytes)
            .await
            .with_context(|| {
                format!(
                    "[ChartServiceImpl->generate_chart] Failed to write chart to {:?}",
                    output_path
                )
            })?;

        info!("Chart saved to: {:?}", output_path);

        Ok(ChartOutcome::Generated(output_path))
    }
}

/*
Author      : Seunghwan Shin
Create date : 2025-11-00
Description :

History     : 2025-11-00 Seunghwan Shin       # [v.1.0.0] first create
*/

mod common;
mod external_deps;
mod prelude;
use common::*;

mod repository;
use repository::ha_repository_impl::*;

mod env_configuration;

mod traits;

mod model;
use model::configs::total_config::*;

mod dto;
mod enums;

mod utils_modules;
use utils_modules::logger_utils::*;

mod service;
use service::{chart_service_impl::*, query_service_impl::*, render_service_impl::*};

mod controller;
use controller::main_controller::*;

#[tokio::main]
async fn main() {
    /* 전역로거 설정 및 초기 설정 */
    dotenv().ok();
    set_global_logger();

    info!("Chart generator start!");

    /* Home Assistant connection */
    let ha_conn: HaRepositoryImpl =
        HaRepositoryImpl::new(get_ha_config_info()).unwrap_or_else(|e| {
            let err_msg: &str = "[main] An issue occurred while initializing ha_conn.";
            error!("{} {:?}", err_msg, e);
            panic!("{} {:?}", err_msg, e)
        });

    /* 의존 주입 */
    let query_service: QueryServiceImpl = QueryServiceImpl::new(Arc::new(ha_conn));
    let render_service: RenderServiceImpl = RenderServiceImpl::new();

    let chart_service: ChartServiceImpl<QueryServiceImpl, RenderServiceImpl> =
        ChartServiceImpl::new(
            query_service,
            Arc::new(render_service),
            get_output_config_info().clone(),
        );

    let main_controller: MainController<ChartServiceImpl<QueryServiceImpl, RenderServiceImpl>> =
        MainController::new(chart_service);

    main_controller.main_task().await.unwrap_or_else(|e| {
        error!("{:?}", e);
        panic!("{:?}", e)
    });
}

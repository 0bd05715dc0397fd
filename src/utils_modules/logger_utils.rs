use crate::common::*;

use std::io::Write;

#[doc = "로그 출력 포맷을 정의해주는 함수"]
fn custom_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] [{}] T[{:?}] {}",
        now.format("%Y-%m-%d %H:%M:%S"),
        record.level(),
        std::thread::current().id(),
        &record.args()
    )
}

#[doc = r#"
    전역 로거를 설정해주는 함수.

    `logs/` 디렉토리 아래에 일 단위로 로테이션되는 로그 파일을 생성하고,
    동일한 내용을 stdout으로도 출력한다. 로그 파일은 최근 30개까지만 유지한다.

    # Panics
    로거 초기화에 실패한 경우 애플리케이션 종료
"#]
pub fn set_global_logger() {
    Logger::try_with_str("info")
        .expect("Failed to initialize logger")
        .log_to_file(
            FileSpec::default()
                .directory("logs")
                .basename("chart_generator"),
        )
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(30),
        )
        .duplicate_to_stdout(flexi_logger::Duplicate::All)
        .format(custom_format)
        .start()
        .expect("Failed to start logger");
}

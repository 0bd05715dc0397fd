use crate::common::*;

use crate::enums::chart_type::*;
use crate::model::chart::chart_job_config::*;
use crate::utils_modules::time_utils::*;

#[doc = r#"
    검증이 끝난 차트 생성 요청 한 건.

    `ChartJobConfig` 와 요청 시각으로부터 만들어지는 불변 값으로, 중복 엔티티는
    첫 등장 순서를 유지하며 제거되고, 파일명이 없으면 타임스탬프 기반 기본
    파일명이 채워진다. 생성 이후에는 파이프라인 한 번의 실행 동안만 소유된다.
"#]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct ChartRequest {
    pub entities: Vec<String>,
    pub chart_type: ChartType,
    pub hours_to_show: u32,
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
    pub title: String,
    pub y_label: String,
    pub show_legend: bool,
    pub filename: String,
}

impl ChartRequest {
    #[doc = "차트 설정과 요청 시각으로부터 요청 객체를 만들어주는 함수"]
    pub fn from_config(job: &ChartJobConfig, requested_at: DateTime<Utc>) -> Self {
        /* 중복 엔티티는 중복 선언일 뿐이므로 첫 등장만 남긴다 */
        let mut entities: Vec<String> = Vec::with_capacity(job.entities().len());
        for entity_id in job.entities() {
            if !entities.contains(entity_id) {
                entities.push(entity_id.clone());
            }
        }

        let filename: String = match job.filename() {
            Some(name) => name.clone(),
            None => format!("chart_{}.png", timestamp_for_filename(requested_at)),
        };

        ChartRequest {
            entities,
            chart_type: *job.chart_type(),
            hours_to_show: *job.hours_to_show(),
            width: *job.width(),
            height: *job.height(),
            dpi: *job.dpi(),
            title: job.title().clone(),
            y_label: job.y_label().clone(),
            show_legend: *job.show_legend(),
            filename,
        }
    }

    #[doc = "출력 이미지의 픽셀 단위 크기를 반환하는 함수"]
    pub fn pixel_dimensions(&self) -> (u32, u32) {
        (self.width * self.dpi, self.height * self.dpi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(toml_src: &str) -> ChartJobConfig {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn duplicate_entities_are_deduplicated_in_order() {
        let job = job("entities = [\"sensor.a\", \"sensor.b\", \"sensor.a\"]");
        let request = ChartRequest::from_config(&job, Utc::now());
        assert_eq!(request.entities(), &["sensor.a", "sensor.b"]);
    }

    #[test]
    fn missing_filename_defaults_to_timestamp_name() {
        let job = job("entities = [\"sensor.a\"]");
        let requested_at: DateTime<Utc> = "2026-01-02T03:04:05Z".parse().unwrap();
        let request = ChartRequest::from_config(&job, requested_at);
        assert_eq!(request.filename(), "chart_20260102_030405.png");
    }

    #[test]
    fn explicit_filename_is_kept() {
        let job = job("entities = [\"sensor.a\"]\nfilename = \"kitchen.png\"");
        let request = ChartRequest::from_config(&job, Utc::now());
        assert_eq!(request.filename(), "kitchen.png");
    }

    #[test]
    fn pixel_dimensions_scale_with_dpi() {
        let job = job("entities = [\"sensor.a\"]");
        let request = ChartRequest::from_config(&job, Utc::now());
        assert_eq!(request.pixel_dimensions(), (1200, 800));
    }
}

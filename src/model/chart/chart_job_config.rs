use crate::common::*;

use crate::enums::chart_type::*;

fn default_title() -> String {
    String::from("Home Assistant Chart")
}

fn default_hours_to_show() -> u32 {
    24
}

fn default_width() -> u32 {
    12
}

fn default_height() -> u32 {
    8
}

fn default_dpi() -> u32 {
    100
}

fn default_y_label() -> String {
    String::from("Value")
}

fn default_show_legend() -> bool {
    true
}

#[doc = r#"
    차트 한 건의 렌더링 설정.

    차트 목록 TOML 파일의 `[[chart]]` 항목 하나에 해당하며, `entities` 를 제외한
    모든 필드는 생략 시 기본값이 적용된다. `filename` 을 생략하면 요청 시점의
    타임스탬프로 파일명이 생성된다.
"#]
#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct ChartJobConfig {
    pub entities: Vec<String>,
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_hours_to_show")]
    pub hours_to_show: u32,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default = "default_y_label")]
    pub y_label: String,
    #[serde(default = "default_show_legend")]
    pub show_legend: bool,
}

impl ChartJobConfig {
    #[doc = "설정값이 렌더링 가능한 범위인지 검증해주는 함수"]
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.entities.is_empty() {
            return Err(anyhow!(
                "[ChartJobConfig->validate] 'entities' must contain at least one entity id"
            ));
        }

        if self.hours_to_show == 0 || self.width == 0 || self.height == 0 || self.dpi == 0 {
            return Err(anyhow!(
                "[ChartJobConfig->validate] 'hours_to_show', 'width', 'height' and 'dpi' must be positive: {}h {}x{} @{}dpi",
                self.hours_to_show,
                self.width,
                self.height,
                self.dpi
            ));
        }

        Ok(())
    }
}

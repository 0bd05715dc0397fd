use crate::common::*;

/* 지원하는 차트 종류. 새 종류 추가 시 렌더러의 match 분기도 함께 추가해야 한다. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Scatter,
    Histogram,
    Pie,
}

impl Default for ChartType {
    fn default() -> Self {
        ChartType::Line
    }
}

impl Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &str = match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Scatter => "scatter",
            ChartType::Histogram => "histogram",
            ChartType::Pie => "pie",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        chart_type: ChartType,
    }

    #[test]
    fn decodes_lowercase_names() {
        let w: Wrapper = toml::from_str("chart_type = \"histogram\"").unwrap();
        assert_eq!(w.chart_type, ChartType::Histogram);
    }

    #[test]
    fn default_is_line() {
        assert_eq!(ChartType::default(), ChartType::Line);
    }
}

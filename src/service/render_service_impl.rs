use crate::common::*;

use crate::dto::entity_series::*;
use crate::enums::chart_type::*;
use crate::model::chart::chart_request::*;
use crate::traits::service_traits::render_service::*;

use image::{ExtendedColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::*;

/* plotters의 전역 폰트 캐시는 동시 접근이 안전하지 않으므로 렌더링을 직렬화한다 */
static RENDER_LOCK: once_lazy<Mutex<()>> = once_lazy::new(|| Mutex::new(()));

/* 시리즈 순서에 따라 결정적으로 배정되는 고정 팔레트 (matplotlib tab10 순서) */
const SERIES_PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

const HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Clone, new)]
pub struct RenderServiceImpl;

impl RenderServiceImpl {
    fn series_color(index: usize) -> RGBColor {
        SERIES_PALETTE[index % SERIES_PALETTE.len()]
    }

    #[doc = "Helper function to determine a padded value-axis range"]
    fn padded_value_range(values: &[f64]) -> (f64, f64) {
        if values.is_empty() {
            return (0.0, 1.0);
        }

        let min_val: f64 = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_val: f64 = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let span: f64 = max_val - min_val;
        let padding: f64 = if span > 0.0 { span * 0.05 } else { 1.0 };

        (min_val - padding, max_val + padding)
    }

    #[doc = "Helper function to determine the time-axis range across every series"]
    fn time_range(series: &[EntitySeries]) -> (DateTime<Utc>, DateTime<Utc>) {
        let mut t_min: Option<DateTime<Utc>> = None;
        let mut t_max: Option<DateTime<Utc>> = None;

        for s in series {
            for (t, _) in s.points() {
                t_min = Some(t_min.map_or(*t, |cur: DateTime<Utc>| cur.min(*t)));
                t_max = Some(t_max.map_or(*t, |cur: DateTime<Utc>| cur.max(*t)));
            }
        }

        let t_min: DateTime<Utc> = t_min.unwrap_or_else(Utc::now);
        let t_max: DateTime<Utc> = t_max.unwrap_or(t_min);

        /* 단일 시점 데이터로는 빈 구간이 되므로 앞뒤로 벌려준다 */
        if t_min == t_max {
            (
                t_min - chrono::Duration::minutes(30),
                t_max + chrono::Duration::minutes(30),
            )
        } else {
            (t_min, t_max)
        }
    }

    #[doc = "line/scatter 공통의 시간축 차트를 그려주는 함수"]
    fn draw_time_series<B: DrawingBackend>(
        &self,
        root: &DrawingArea<B, Shift>,
        series: &[EntitySeries],
        request: &ChartRequest,
        scatter: bool,
    ) -> anyhow::Result<()>
    where
        B::ErrorType: 'static,
    {
        let (t_min, t_max) = Self::time_range(series);

        let all_values: Vec<f64> = series
            .iter()
            .flat_map(|s| s.points().iter().map(|(_, value)| *value))
            .collect();
        let (y_min, y_max) = Self::padded_value_range(&all_values);

        /* 2시간 간격에 해당하는 눈금 개수 */
        let x_label_count: usize = (*request.hours_to_show() as usize / 2).clamp(4, 13);

        let mut chart = ChartBuilder::on(root)
            .caption(request.title(), ("sans-serif", 32).into_font())
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(t_min..t_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_labels(x_label_count)
            .y_labels(10)
            .y_desc(request.y_label())
            .x_label_style(("sans-serif", 16).into_font())
            .y_label_style(("sans-serif", 16).into_font())
            .x_label_formatter(&|t: &DateTime<Utc>| {
                t.with_timezone(&Local).format("%H:%M").to_string()
            })
            .draw()?;

        for (i, s) in series.iter().enumerate() {
            let color: RGBColor = Self::series_color(i);

            if scatter {
                let anno = chart.draw_series(
                    s.points()
                        .iter()
                        .map(|(t, value)| Circle::new((*t, *value), 4, color.mix(0.7).filled())),
                )?;

                if *request.show_legend() {
                    anno.label(s.display_name().clone())
                        .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
                }
            } else {
                let anno = chart.draw_series(LineSeries::new(
                    s.points().iter().map(|(t, value)| (*t, *value)),
                    color.stroke_width(2),
                ))?;

                if *request.show_legend() {
                    anno.label(s.display_name().clone()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                }
            }
        }

        if *request.show_legend() {
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }

        Ok(())
    }

    #[doc = "엔티티별 마지막 값을 막대로 그려주는 함수"]
    fn draw_bar<B: DrawingBackend>(
        &self,
        root: &DrawingArea<B, Shift>,
        series: &[EntitySeries],
        request: &ChartRequest,
    ) -> anyhow::Result<()>
    where
        B::ErrorType: 'static,
    {
        /* 마지막 값 기준. 점이 없는 시리즈는 0으로 취급한다 */
        let last_values: Vec<f64> = series
            .iter()
            .map(|s| s.last_value().unwrap_or(0.0))
            .collect();
        let display_names: Vec<String> =
            series.iter().map(|s| s.display_name().clone()).collect();

        let (mut y_min, mut y_max) = Self::padded_value_range(&last_values);
        y_min = y_min.min(0.0);
        y_max = y_max.max(0.0);

        let mut chart = ChartBuilder::on(root)
            .caption(request.title(), ("sans-serif", 32).into_font())
            .margin(20)
            .x_label_area_size(120)
            .y_label_area_size(70)
            .build_cartesian_2d((0..last_values.len()).into_segmented(), y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(last_values.len())
            .y_labels(10)
            .y_desc(request.y_label())
            .x_label_style(
                ("sans-serif", 14)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_label_style(("sans-serif", 16).into_font())
            .x_label_formatter(&|seg| match seg {
                SegmentValue::CenterOf(i) if *i < display_names.len() => {
                    display_names[*i].clone()
                }
                SegmentValue::Exact(i) if *i < display_names.len() => display_names[*i].clone(),
                _ => String::new(),
            })
            .draw()?;

        chart.draw_series(last_values.iter().enumerate().map(|(i, &value)| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), value),
                ],
                Self::series_color(i).filled(),
            );
            bar.set_margin(0, 0, 8, 8);
            bar
        }))?;

        Ok(())
    }

    #[doc = "모든 시리즈의 값을 하나의 분포로 모아 히스토그램을 그려주는 함수"]
    fn draw_histogram<B: DrawingBackend>(
        &self,
        root: &DrawingArea<B, Shift>,
        series: &[EntitySeries],
        request: &ChartRequest,
    ) -> anyhow::Result<()>
    where
        B::ErrorType: 'static,
    {
        let all_values: Vec<f64> = series
            .iter()
            .flat_map(|s| s.points().iter().map(|(_, value)| *value))
            .collect();

        let (min_val, max_val) = if all_values.is_empty() {
            (0.0, 1.0)
        } else {
            (
                all_values.iter().cloned().fold(f64::INFINITY, f64::min),
                all_values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            )
        };

        let span: f64 = max_val - min_val;
        let bin_width: f64 = if span > 0.0 {
            span / HISTOGRAM_BINS as f64
        } else {
            1.0
        };

        let mut bin_counts: Vec<usize> = vec![0; HISTOGRAM_BINS];
        for &value in &all_values {
            let bin_idx: usize =
                (((value - min_val) / bin_width).floor() as usize).min(HISTOGRAM_BINS - 1);
            bin_counts[bin_idx] += 1;
        }

        let max_freq: usize = bin_counts.iter().max().copied().unwrap_or(0).max(1);

        let mut chart = ChartBuilder::on(root)
            .caption(request.title(), ("sans-serif", 32).into_font())
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(
                min_val..(min_val + bin_width * HISTOGRAM_BINS as f64),
                0.0..(max_freq as f64 * 1.1),
            )?;

        chart
            .configure_mesh()
            .x_labels(10)
            .y_labels(10)
            .x_desc(request.y_label())
            .y_desc("Frequency")
            .x_label_style(("sans-serif", 16).into_font())
            .y_label_style(("sans-serif", 16).into_font())
            .draw()?;

        chart.draw_series(bin_counts.iter().enumerate().map(|(i, &count)| {
            let x0: f64 = min_val + i as f64 * bin_width;
            let x1: f64 = x0 + bin_width;
            Rectangle::new(
                [(x0, 0.0), (x1, count as f64)],
                Self::series_color(0).mix(0.7).filled(),
            )
        }))?;

        Ok(())
    }

    #[doc = r#"
        엔티티별 마지막 값을 파이 차트로 그려주는 함수.

        0 이하의 값은 조각으로 표현할 수 없으므로 제외하며, 남는 엔티티가 하나도
        없으면 제목만 있는 빈 차트를 남긴다.
    "#]
    fn draw_pie<B: DrawingBackend>(
        &self,
        root: &DrawingArea<B, Shift>,
        series: &[EntitySeries],
        request: &ChartRequest,
    ) -> anyhow::Result<()>
    where
        B::ErrorType: 'static,
    {
        let positive: Vec<(String, f64)> = series
            .iter()
            .filter_map(|s| {
                s.last_value()
                    .filter(|value| *value > 0.0)
                    .map(|value| (s.display_name().clone(), value))
            })
            .collect();

        let root = root.titled(request.title(), ("sans-serif", 32).into_font())?;

        if positive.is_empty() {
            return Ok(());
        }

        let (area_w, area_h) = root.dim_in_pixel();
        let center: (i32, i32) = ((area_w / 2) as i32, (area_h / 2) as i32);
        let radius: f64 = f64::from(area_w.min(area_h)) * 0.35;

        let sizes: Vec<f64> = positive.iter().map(|(_, value)| *value).collect();
        let labels: Vec<String> = positive.iter().map(|(name, _)| name.clone()).collect();
        let colors: Vec<RGBColor> = (0..sizes.len()).map(Self::series_color).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 18).into_font());
        pie.percentages(("sans-serif", 16).into_font());

        root.draw(&pie)?;

        Ok(())
    }

    #[doc = "RGB 버퍼를 PNG 바이트로 인코딩해주는 함수"]
    fn encode_png(buffer: &[u8], width: u32, height: u32) -> anyhow::Result<Vec<u8>> {
        let mut png_bytes: Vec<u8> = Vec::new();

        image::codecs::png::PngEncoder::new(&mut png_bytes)
            .write_image(buffer, width, height, ExtendedColorType::Rgb8)
            .map_err(|e| {
                anyhow!("[RenderServiceImpl->encode_png] PNG encoding failed: {}", e)
            })?;

        Ok(png_bytes)
    }
}

impl RenderService for RenderServiceImpl {
    #[doc = "요청된 차트 종류에 따라 시리즈를 PNG 이미지로 렌더링하는 함수"]
    fn render(
        &self,
        series: &[EntitySeries],
        request: &ChartRequest,
    ) -> anyhow::Result<Vec<u8>> {
        let (width, height) = request.pixel_dimensions();
        let mut buffer: Vec<u8> = vec![0u8; width as usize * height as usize * 3];

        {
            let _guard = match RENDER_LOCK.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };

            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;

            match request.chart_type() {
                ChartType::Line => self.draw_time_series(&root, series, request, false)?,
                ChartType::Scatter => self.draw_time_series(&root, series, request, true)?,
                ChartType::Bar => self.draw_bar(&root, series, request)?,
                ChartType::Histogram => self.draw_histogram(&root, series, request)?,
                ChartType::Pie => self.draw_pie(&root, series, request)?,
            }

            root.present()?;
        }

        Self::encode_png(&buffer, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::chart::chart_job_config::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    fn request(toml_src: &str) -> ChartRequest {
        let job: ChartJobConfig = toml::from_str(toml_src).unwrap();
        ChartRequest::from_config(&job, Utc::now())
    }

    fn series(id: &str, values: &[f64]) -> EntitySeries {
        let base: DateTime<Utc> = "2026-01-01T00:00:00Z".parse().unwrap();
        EntitySeries::new(
            id.to_string(),
            id.to_string(),
            values
                .iter()
                .enumerate()
                .map(|(i, &value)| (base + chrono::Duration::minutes(i as i64 * 10), value))
                .collect(),
        )
    }

    #[test]
    fn renders_line_chart_as_png() {
        let request = request("entities = [\"sensor.temp\"]\nchart_type = \"line\"");
        let png = RenderServiceImpl::new()
            .render(&[series("sensor.temp", &[20.5, 21.0])], &request)
            .unwrap();

        assert!(png.starts_with(&PNG_MAGIC));
    }

    #[test]
    fn renders_scatter_chart_as_png() {
        let request = request("entities = [\"sensor.temp\"]\nchart_type = \"scatter\"");
        let png = RenderServiceImpl::new()
            .render(&[series("sensor.temp", &[1.0, 2.0, 3.0])], &request)
            .unwrap();

        assert!(png.starts_with(&PNG_MAGIC));
    }

    #[test]
    fn renders_bar_chart_with_empty_series_as_zero() {
        let request = request("entities = [\"sensor.a\", \"sensor.b\"]\nchart_type = \"bar\"");
        let empty = EntitySeries::new(
            String::from("sensor.b"),
            String::from("sensor.b"),
            Vec::new(),
        );

        let png = RenderServiceImpl::new()
            .render(&[series("sensor.a", &[5.0, 7.0]), empty], &request)
            .unwrap();

        assert!(png.starts_with(&PNG_MAGIC));
    }

    #[test]
    fn renders_pooled_histogram_as_png() {
        let request =
            request("entities = [\"sensor.a\", \"sensor.b\"]\nchart_type = \"histogram\"");
        let png = RenderServiceImpl::new()
            .render(
                &[series("sensor.a", &[1.0, 2.0]), series("sensor.b", &[3.0, 4.0])],
                &request,
            )
            .unwrap();

        assert!(png.starts_with(&PNG_MAGIC));
    }

    #[test]
    fn renders_constant_series_without_panicking() {
        let request = request("entities = [\"sensor.temp\"]");
        let png = RenderServiceImpl::new()
            .render(&[series("sensor.temp", &[42.0, 42.0, 42.0])], &request)
            .unwrap();

        assert!(png.starts_with(&PNG_MAGIC));
    }

    #[test]
    fn renders_pie_chart_as_png() {
        let request = request("entities = [\"sensor.a\", \"sensor.b\"]\nchart_type = \"pie\"");
        let png = RenderServiceImpl::new()
            .render(
                &[series("sensor.a", &[3.0]), series("sensor.b", &[1.0])],
                &request,
            )
            .unwrap();

        assert!(png.starts_with(&PNG_MAGIC));
    }

    #[test]
    fn pie_with_no_positive_values_still_renders() {
        let request = request("entities = [\"sensor.a\", \"sensor.b\"]\nchart_type = \"pie\"");
        let png = RenderServiceImpl::new()
            .render(
                &[series("sensor.a", &[0.0]), series("sensor.b", &[-2.0])],
                &request,
            )
            .unwrap();

        assert!(png.starts_with(&PNG_MAGIC));
    }
}

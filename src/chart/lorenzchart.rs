use serde::Serialize;

use crate::chart::displayconfig::{
    DisplayConfig,
    LineStyle
};
use crate::lorenz::inequalityanalyzer::InequalityReport;
use crate::lorenz::lorenzcurve::LorenzCurve;
use crate::math::integration::linspace;
use crate::math::round::format_percent;

/// 對角線至少取樣的點數
pub const MIN_DIAGONAL_POINTS: usize = 100;

const PERCENT_DIGITS: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
    color: String,
    style: LineStyle
}

impl Polyline {
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn style(&self) -> LineStyle {
        self.style
    }
}

/// 等號線 y = x 與 Lorenz curve 之間的填色區域
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilledArea {
    x: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    x: f64,
    y: f64,
    text: String
}

impl Label {
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossingMarker {
    x: f64,
    y: f64,
    label: Label
}

impl CrossingMarker {
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn label(&self) -> &Label {
        &self.label
    }
}

/// 交給外部繪圖端的完整圖表描述。核心只產生描述，不負責繪製或寫檔。
///
/// 只能由成功建立的 `LorenzCurve` 與 `InequalityReport` 組成；
/// P 不存在時不畫交點，caption 會註明 P 無法取得。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LorenzChart {
    title: String,
    x_label: String,
    y_label: String,
    figure_size: (f64, f64),
    lorenz: Polyline,
    equality_line: Option<Polyline>,
    anti_diagonal: Option<Polyline>,
    filled_area: Option<FilledArea>,
    gini_label: Label,
    crossing: Option<CrossingMarker>,
    caption: Option<String>,
    output_file: Option<String>
}

fn diagonal(grid: &[f64], anti: bool, color: &str) -> Polyline {
    Polyline {
        points: grid.iter().map(|&x| (x, if anti { 1.0 - x } else { x })).collect(),
        color: color.to_owned(),
        style: LineStyle::Dotted
    }
}

impl LorenzChart {
    pub fn new(curve: &LorenzCurve,
               report: &InequalityReport,
               display: &DisplayConfig) -> LorenzChart {
        let grid = linspace(0.0, 1.0, MIN_DIAGONAL_POINTS.max(curve.len()));
        let population_phrase = display.population_phrase();

        let lorenz = Polyline {
            points: curve
                .population_share()
                .iter()
                .copied()
                .zip(curve.measure_share().iter().copied())
                .collect(),
            color: display.curve_color().to_owned(),
            style: display.curve_style()
        };

        let filled_area = display.fill_area().then(|| FilledArea {
            x: curve.population_share().to_vec(),
            lower: curve.measure_share().to_vec(),
            upper: curve.population_share().to_vec()
        });

        let gini_label = Label {
            x: 0.4,
            y: 0.15,
            text: format!("Gini: {}", format_percent(report.gini().coefficient(), PERCENT_DIGITS))
        };

        let crossing = report
            .balanced_ratio()
            .filter(|_| display.annotate_crossing())
            .map(|ratio| {
                let (px, py) = (ratio.value(), ratio.measure_share());
                let x_offset = if px > 0.9 { -0.25 } else { 0.0 };
                CrossingMarker {
                    x: px,
                    y: py,
                    label: Label {
                        x: px + x_offset,
                        y: py + 0.05,
                        text: format!(
                            "P ({},{})",
                            format_percent(px, PERCENT_DIGITS),
                            format_percent(py, PERCENT_DIGITS)
                        )
                    }
                }
            });

        let caption = display.show_caption().then(|| match report.balanced_ratio() {
            Some(ratio) => format!(
                "{} of {} accounts for {} of the {}.",
                format_percent(ratio.measure_share(), PERCENT_DIGITS),
                population_phrase,
                format_percent(ratio.value(), PERCENT_DIGITS),
                display.y_measure()
            ),
            None => format!(
                "Balanced inequality ratio P unavailable for {} and the {}.",
                population_phrase,
                display.y_measure()
            ),
        });

        let width = display.figure_width();
        LorenzChart {
            title: display.title(curve.population_size()),
            x_label: display.x_label(),
            y_label: display.y_label(),
            figure_size: (width + 1.0, width),
            lorenz,
            equality_line: display.show_equality_line().then(|| diagonal(&grid, false, "green")),
            anti_diagonal: display.show_anti_diagonal().then(|| diagonal(&grid, true, "grey")),
            filled_area,
            gini_label,
            crossing,
            caption,
            output_file: display.output_file_name()
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn figure_size(&self) -> (f64, f64) {
        self.figure_size
    }

    pub fn lorenz(&self) -> &Polyline {
        &self.lorenz
    }

    pub fn equality_line(&self) -> Option<&Polyline> {
        self.equality_line.as_ref()
    }

    pub fn anti_diagonal(&self) -> Option<&Polyline> {
        self.anti_diagonal.as_ref()
    }

    pub fn filled_area(&self) -> Option<&FilledArea> {
        self.filled_area.as_ref()
    }

    pub fn gini_label(&self) -> &Label {
        &self.gini_label
    }

    pub fn crossing(&self) -> Option<&CrossingMarker> {
        self.crossing.as_ref()
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn output_file(&self) -> Option<&str> {
        self.output_file.as_deref()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lorenz::curvebuilder::CurveBuilder;
    use crate::lorenz::inequalityanalyzer::{
        GiniResult,
        InequalityAnalyzer
    };

    fn chart_for(values: Vec<f64>, display: &DisplayConfig) -> LorenzChart {
        let curve = CurveBuilder::new().build(values).unwrap();
        let report = InequalityAnalyzer::default().analyze(&curve).unwrap();
        LorenzChart::new(&curve, &report, display)
    }

    #[test]
    fn test_chart_for_concentrated_series() {
        let chart = chart_for(vec![0.0, 0.0, 0.0, 10.0], &DisplayConfig::default());
        assert_eq!(chart.title(), "Lorenz-Gini-P curve (4)");
        assert_eq!(chart.gini_label().text(), "Gini: 75.0%");
        assert_eq!(chart.lorenz().points().len(), 5);

        let crossing = chart.crossing().unwrap();
        let (px, py) = crossing.position();
        assert!((px - 0.8).abs() < 1e-12);
        assert!((py - 0.2).abs() < 1e-12);
        assert_eq!(crossing.label().text(), "P (80.0%,20.0%)");
        assert_eq!(
            chart.caption(),
            Some("20.0% of the population accounts for 80.0% of the income.")
        );
    }

    #[test]
    fn test_diagonals_have_at_least_100_points() {
        let chart = chart_for(vec![1.0, 2.0, 3.0], &DisplayConfig::default());
        let equality = chart.equality_line().unwrap();
        let anti = chart.anti_diagonal().unwrap();
        assert_eq!(equality.points().len(), MIN_DIAGONAL_POINTS);
        assert_eq!(anti.points()[0], (0.0, 1.0));
        assert_eq!(anti.points()[MIN_DIAGONAL_POINTS - 1], (1.0, 0.0));
    }

    #[test]
    fn test_label_shifts_near_right_edge() {
        let mut values = vec![0.0; 19];
        values.push(1.0);
        let chart = chart_for(values, &DisplayConfig::default());
        let crossing = chart.crossing().unwrap();
        assert!(crossing.position().0 > 0.9);
        assert!((crossing.label().position().0 - (crossing.position().0 - 0.25)).abs() < 1e-12);
    }

    #[test]
    fn test_missing_crossing_is_not_fabricated() {
        let curve = CurveBuilder::new().build(vec![1.0, 3.0]).unwrap();
        let report = InequalityReport::new(GiniResult::from_area(0.375), None);
        let chart = LorenzChart::new(&curve, &report, &DisplayConfig::default());
        assert!(chart.crossing().is_none());
        assert!(chart.caption().unwrap().contains("unavailable"));
    }

    #[test]
    fn test_display_toggles() {
        let display: DisplayConfig = serde_json::from_str(
            r#"{ "show_equality_line": false, "show_anti_diagonal": false, "fill_area": false,
                 "annotate_crossing": false, "show_caption": false, "save_as": "fig.png", "format": "svg" }"#
        ).unwrap();
        let chart = chart_for(vec![1.0, 2.0], &display);
        assert!(chart.equality_line().is_none());
        assert!(chart.anti_diagonal().is_none());
        assert!(chart.filled_area().is_none());
        assert!(chart.crossing().is_none());
        assert!(chart.caption().is_none());
        assert_eq!(chart.output_file(), Some("fig.svg"));
        assert_eq!(chart.figure_size(), (6.0, 5.0));
    }

    #[test]
    fn test_chart_serializes() {
        let chart = chart_for(vec![1.0, 1.0], &DisplayConfig::default());
        let json = chart.to_json().unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Lorenz-Gini-P curve (2)"));
    }
}

use std::path::Path;

use serde::{
    Deserialize,
    Serialize
};

pub const DEFAULT_Y_MEASURE: &str = "income";
pub const DEFAULT_FIGURE_WIDTH: f64 = 5.0;
pub const DEFAULT_FORMAT: &str = "png";

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// 外部繪圖端使用的顯示設定。核心計算不讀取這些欄位。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    title: Option<String>,
    /// 母體名稱，例如 "crop patches"；空字串代表任意母體
    x_measure: String,
    /// 測度名稱，空字串時使用 "income"
    y_measure: String,
    x_label: Option<String>,
    y_label: Option<String>,
    curve_color: String,
    curve_style: LineStyle,
    show_equality_line: bool,
    show_anti_diagonal: bool,
    fill_area: bool,
    annotate_crossing: bool,
    show_caption: bool,
    figure_width: f64,
    save_as: Option<String>,
    format: String
}

impl Default for DisplayConfig {
    fn default() -> DisplayConfig {
        DisplayConfig {
            title: None,
            x_measure: String::new(),
            y_measure: DEFAULT_Y_MEASURE.to_owned(),
            x_label: None,
            y_label: None,
            curve_color: "#1f77b4".to_owned(),
            curve_style: LineStyle::Solid,
            show_equality_line: true,
            show_anti_diagonal: true,
            fill_area: true,
            annotate_crossing: true,
            show_caption: true,
            figure_width: DEFAULT_FIGURE_WIDTH,
            save_as: None,
            format: DEFAULT_FORMAT.to_owned()
        }
    }
}

impl DisplayConfig {
    pub fn with_measures(x_measure: &str, y_measure: &str) -> DisplayConfig {
        DisplayConfig {
            x_measure: x_measure.to_owned(),
            y_measure: y_measure.to_owned(),
            ..DisplayConfig::default()
        }
    }

    pub fn with_save_as(mut self, save_as: &str, format: &str) -> DisplayConfig {
        self.save_as = Some(save_as.to_owned());
        self.format = format.to_owned();
        self
    }

    pub fn x_measure(&self) -> &str {
        &self.x_measure
    }

    pub fn y_measure(&self) -> &str {
        if self.y_measure.is_empty() {
            DEFAULT_Y_MEASURE
        } else {
            &self.y_measure
        }
    }

    /// "the population" 或 "the crop patches population"
    pub fn population_phrase(&self) -> String {
        let x_measure = self.x_measure.trim();
        if x_measure.is_empty() {
            "the population".to_owned()
        } else {
            format!("the {} population", x_measure)
        }
    }

    pub fn title(&self, population_size: usize) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Lorenz-Gini-P curve ({})", population_size))
    }

    pub fn x_label(&self) -> String {
        self.x_label
            .clone()
            .unwrap_or_else(|| format!("Cumulative share of {}", self.population_phrase()))
    }

    pub fn y_label(&self) -> String {
        self.y_label
            .clone()
            .unwrap_or_else(|| format!("Cumulative share of {}", self.y_measure()))
    }

    pub fn curve_color(&self) -> &str {
        &self.curve_color
    }

    pub fn curve_style(&self) -> LineStyle {
        self.curve_style
    }

    pub fn show_equality_line(&self) -> bool {
        self.show_equality_line
    }

    pub fn show_anti_diagonal(&self) -> bool {
        self.show_anti_diagonal
    }

    pub fn fill_area(&self) -> bool {
        self.fill_area
    }

    pub fn annotate_crossing(&self) -> bool {
        self.annotate_crossing
    }

    pub fn show_caption(&self) -> bool {
        self.show_caption
    }

    /// 正方形圖的邊長；非正值時退回預設
    pub fn figure_width(&self) -> f64 {
        if self.figure_width > 0.0 {
            self.figure_width
        } else {
            DEFAULT_FIGURE_WIDTH
        }
    }

    pub fn format(&self) -> &str {
        if self.format.is_empty() {
            DEFAULT_FORMAT
        } else {
            &self.format
        }
    }

    /// `save_as` 的檔名主幹加上 `format` 副檔名，例如 "out/yields.svg" + "png" → "yields.png"。
    pub fn output_file_name(&self) -> Option<String> {
        let save_as = self.save_as.as_deref().filter(|s| !s.is_empty())?;
        let file_name = Path::new(save_as).file_name()?.to_str()?;
        let stem = file_name.split('.').next().unwrap_or(file_name);
        Some(format!("{}.{}", stem, self.format()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        let display = DisplayConfig::default();
        assert_eq!(display.title(100), "Lorenz-Gini-P curve (100)");
        assert_eq!(display.x_label(), "Cumulative share of the population");
        assert_eq!(display.y_label(), "Cumulative share of income");
    }

    #[test]
    fn test_named_measures() {
        let display = DisplayConfig::with_measures("crop patches", "grain yields");
        assert_eq!(display.population_phrase(), "the crop patches population");
        assert_eq!(display.y_label(), "Cumulative share of grain yields");
    }

    #[test]
    fn test_empty_y_measure_falls_back() {
        let display = DisplayConfig::with_measures("", "");
        assert_eq!(display.y_measure(), "income");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(DisplayConfig::default().output_file_name(), None);
        let display = DisplayConfig::default().with_save_as("out/yields.svg", "png");
        assert_eq!(display.output_file_name(), Some("yields.png".to_owned()));
        let display = DisplayConfig::default().with_save_as("lorenz", "");
        assert_eq!(display.output_file_name(), Some("lorenz.png".to_owned()));
    }

    #[test]
    fn test_figure_width_fallback() {
        let display: DisplayConfig = serde_json::from_str(r#"{ "figure_width": -1.0 }"#).unwrap();
        assert_eq!(display.figure_width(), DEFAULT_FIGURE_WIDTH);
    }
}

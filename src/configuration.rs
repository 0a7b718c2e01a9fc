use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

use crate::chart::displayconfig::DisplayConfig;
use crate::math::curve::nonparametriccurve::piecewisepolynomial::PolynomialType;
use crate::math::integration::IntegrationMethod;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

// ─────────────────────────────────────────────
// AnalyzerConfig
// ─────────────────────────────────────────────

/// `InequalityAnalyzer` 的數值設定。
///
/// 預設即參考行為：分段線性插值、於樣本點上做 trapezoid 積分。
/// `root_tolerance` 與 `max_iterations` 只在非線性插值時由 Brent 法使用。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    interpolation: PolynomialType,
    integration: IntegrationMethod,
    root_tolerance: f64,
    max_iterations: u64
}

impl Default for AnalyzerConfig {
    fn default() -> AnalyzerConfig {
        AnalyzerConfig {
            interpolation: PolynomialType::Linear,
            integration: IntegrationMethod::SamplePoints,
            root_tolerance: 1e-12,
            max_iterations: 100
        }
    }
}

impl AnalyzerConfig {
    pub fn new(interpolation: PolynomialType,
               integration: IntegrationMethod,
               root_tolerance: f64,
               max_iterations: u64) -> Result<AnalyzerConfig, ConfigurationError> {
        let config = AnalyzerConfig {
            interpolation,
            integration,
            root_tolerance,
            max_iterations
        };
        config.validate()?;
        Ok(config)
    }

    pub fn interpolation(&self) -> PolynomialType {
        self.interpolation
    }

    pub fn integration(&self) -> IntegrationMethod {
        self.integration
    }

    pub fn root_tolerance(&self) -> f64 {
        self.root_tolerance
    }

    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let IntegrationMethod::Resampled { grid_size } = self.integration {
            if grid_size < 2 {
                return Err(ConfigurationError::InvalidValue {
                    field: "integration.grid_size",
                    reason: format!("needs at least 2 grid points, got {}", grid_size)
                });
            }
        }
        if !(self.root_tolerance.is_finite() && self.root_tolerance > 0.0) {
            return Err(ConfigurationError::InvalidValue {
                field: "root_tolerance",
                reason: format!("must be a positive number, got {}", self.root_tolerance)
            });
        }
        if self.max_iterations == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "max_iterations",
                reason: "must be at least 1".to_owned()
            });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    analyzer: AnalyzerConfig,
    display: DisplayConfig
}

impl Configuration {
    pub fn new(analyzer: AnalyzerConfig, display: DisplayConfig) -> Configuration {
        Configuration { analyzer, display }
    }

    pub fn analyzer(&self) -> &AnalyzerConfig {
        &self.analyzer
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration: Configuration = serde_json::from_reader(reader)?;
        configuration.analyzer.validate()?;
        Ok(configuration)
    }

    pub fn from_json_str(json: &str) -> Result<Configuration, ConfigurationError> {
        let configuration: Configuration = serde_json::from_str(json)?;
        configuration.analyzer.validate()?;
        Ok(configuration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_behaviour() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.interpolation(), PolynomialType::Linear);
        assert_eq!(config.integration(), IntegrationMethod::SamplePoints);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let configuration = Configuration::from_json_str("{}").unwrap();
        assert_eq!(configuration, Configuration::default());
    }

    #[test]
    fn test_parse_full_json() {
        let json = r#"{
            "analyzer": {
                "interpolation": "piecewise_cubic_hermite",
                "integration": { "method": "resampled", "grid_size": 500 },
                "root_tolerance": 1e-10,
                "max_iterations": 50
            },
            "display": {
                "y_measure": "grain yields",
                "save_as": "out/yields.svg",
                "format": "svg"
            }
        }"#;
        let configuration = Configuration::from_json_str(json).unwrap();
        let analyzer = configuration.analyzer();
        assert_eq!(analyzer.interpolation(), PolynomialType::PiecewiseCubicHermite);
        assert_eq!(analyzer.integration(), IntegrationMethod::Resampled { grid_size: 500 });
        assert_eq!(analyzer.root_tolerance(), 1e-10);
        assert_eq!(analyzer.max_iterations(), 50);
        assert_eq!(configuration.display().y_measure(), "grain yields");
    }

    #[test]
    fn test_rejects_small_grid() {
        let json = r#"{ "analyzer": { "integration": { "method": "resampled", "grid_size": 1 } } }"#;
        assert!(matches!(
            Configuration::from_json_str(json),
            Err(ConfigurationError::InvalidValue { field: "integration.grid_size", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        assert!(AnalyzerConfig::new(PolynomialType::Linear, IntegrationMethod::SamplePoints, 0.0, 10).is_err());
        assert!(AnalyzerConfig::new(PolynomialType::Linear, IntegrationMethod::SamplePoints, 1e-8, 0).is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Configuration::from_json_str("{ not json"),
            Err(ConfigurationError::JsonParseError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Configuration::from_reader("/nonexistent/lorenzgini/config.json"),
            Err(ConfigurationError::IOError(_))
        ));
    }
}

use serde::Serialize;
use tracing::{
    debug,
    warn
};

use crate::configuration::{
    AnalyzerConfig,
    ConfigurationError
};
use crate::lorenz::inequalityerror::InequalityError;
use crate::lorenz::lorenzcurve::LorenzCurve;
use crate::math::curve::nonparametriccurve::piecewisepolynomial::{
    PiecewisePolynomial,
    PolynomialType
};
use crate::math::integration::{
    trapezoid,
    trapezoid_resampled,
    IntegrationMethod
};
use crate::math::rootfinding::{
    refine_anti_diagonal_root,
    scan_anti_diagonal,
    AntiDiagonalBracket
};

/// Gini 係數 G = 1 - 2B，B 為 Lorenz curve 下的面積。
///
/// 不做 [0, 1] 截斷：離散化與插值誤差可能讓結果略微超出範圍，原樣回報。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GiniResult {
    coefficient: f64,
    area_under_curve: f64
}

impl GiniResult {
    pub fn from_area(area_under_curve: f64) -> GiniResult {
        GiniResult {
            coefficient: 1.0 - 2.0 * area_under_curve,
            area_under_curve
        }
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// B
    pub fn area_under_curve(&self) -> f64 {
        self.area_under_curve
    }

    /// A = 0.5 - B，等號線與 Lorenz curve 之間的面積
    pub fn area_between(&self) -> f64 {
        0.5 - self.area_under_curve
    }
}

/// Balanced inequality ratio P：Lorenz curve 與 y = 1 - x 的交點。
///
/// 「最後 (1 - P) 的母體擁有 P 的測度」。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalancedRatio {
    population_share: f64
}

impl BalancedRatio {
    pub fn new(population_share: f64) -> BalancedRatio {
        BalancedRatio { population_share }
    }

    /// P 本身（交點的 x 座標）
    pub fn value(&self) -> f64 {
        self.population_share
    }

    /// 交點的 y 座標，位於反對角線上故為 1 - P
    pub fn measure_share(&self) -> f64 {
        1.0 - self.population_share
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InequalityReport {
    gini: GiniResult,
    balanced_ratio: Option<BalancedRatio>
}

impl InequalityReport {
    pub fn new(gini: GiniResult, balanced_ratio: Option<BalancedRatio>) -> InequalityReport {
        InequalityReport { gini, balanced_ratio }
    }

    pub fn gini(&self) -> &GiniResult {
        &self.gini
    }

    /// 找不到交點時為 None，不以任何數值代替。
    pub fn balanced_ratio(&self) -> Option<&BalancedRatio> {
        self.balanced_ratio.as_ref()
    }
}

// ─────────────────────────────────────────────
// InequalityAnalyzer
// ─────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct InequalityAnalyzer {
    config: AnalyzerConfig
}

impl Default for InequalityAnalyzer {
    /// 參考設定：分段線性、樣本點 trapezoid
    fn default() -> InequalityAnalyzer {
        let config = AnalyzerConfig::default();
        debug_assert!(config.validate().is_ok());
        InequalityAnalyzer { config }
    }
}

impl InequalityAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<InequalityAnalyzer, ConfigurationError> {
        config.validate()?;
        Ok(InequalityAnalyzer { config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn interpolant(&self, curve: &LorenzCurve) -> Result<PiecewisePolynomial, InequalityError> {
        let polynomial_type = self.config.interpolation();
        PiecewisePolynomial::new(polynomial_type, curve.interpolation_nodes())
            .ok_or(InequalityError::Interpolation(polynomial_type))
    }

    /// Lorenz curve 下的面積 B。
    pub fn area_under_curve(&self, curve: &LorenzCurve) -> Result<f64, InequalityError> {
        match self.config.integration() {
            IntegrationMethod::SamplePoints => {
                Ok(trapezoid(curve.population_share(), curve.measure_share()))
            }
            IntegrationMethod::Resampled { grid_size } => {
                let interpolant = self.interpolant(curve)?;
                Ok(trapezoid_resampled(&interpolant, 0.0, 1.0, grid_size))
            }
        }
    }

    pub fn gini(&self, curve: &LorenzCurve) -> Result<GiniResult, InequalityError> {
        let gini = GiniResult::from_area(self.area_under_curve(curve)?);
        debug!(gini = gini.coefficient(), area = gini.area_under_curve(), "computed Gini coefficient");
        Ok(gini)
    }

    /// 先在樣本點上找變號區間，再求區間內的根。
    ///
    /// 線性插值直接取兩點連線的交點；其他插值以 Brent 法在插值曲線上求根。
    pub fn balanced_ratio(&self, curve: &LorenzCurve) -> Result<BalancedRatio, InequalityError> {
        let bracket = scan_anti_diagonal(curve.population_share(), curve.measure_share())
            .ok_or(InequalityError::NoCrossing)?;

        let root = match bracket {
            AntiDiagonalBracket::Exact(x) => x,
            AntiDiagonalBracket::Interval(lhs_pt, rhs_pt) => {
                if self.config.interpolation() == PolynomialType::Linear || lhs_pt.x() == rhs_pt.x() {
                    bracket.linear_root()
                } else {
                    let interpolant = self.interpolant(curve)?;
                    refine_anti_diagonal_root(
                        &interpolant,
                        lhs_pt.x(),
                        rhs_pt.x(),
                        self.config.root_tolerance(),
                        self.config.max_iterations()
                    ).map_err(|error| InequalityError::RootFinding(error.to_string()))?
                }
            }
        };

        debug!(p = root, "located anti-diagonal crossing");
        Ok(BalancedRatio::new(root))
    }

    pub fn analyze(&self, curve: &LorenzCurve) -> Result<InequalityReport, InequalityError> {
        let gini = self.gini(curve)?;
        let balanced_ratio = match self.balanced_ratio(curve) {
            Ok(ratio) => Some(ratio),
            Err(InequalityError::NoCrossing) => {
                warn!("Lorenz curve does not cross the anti-diagonal; P is unavailable");
                None
            }
            Err(error) => return Err(error),
        };
        Ok(InequalityReport::new(gini, balanced_ratio))
    }
}

use tracing::debug;

use crate::lorenz::inequalityerror::InequalityError;
use crate::lorenz::lorenzcurve::LorenzCurve;
use crate::lorenz::series::Series;

/// CurveBuilder 的兩種輸入模式，由呼叫端明確指定，不自動判斷。
#[derive(Debug, Clone, PartialEq)]
pub enum CurveInput {
    /// 未排序的原始測度序列
    Raw(Vec<f64>),
    /// 已計算好的累積比例，僅驗證不轉換
    Cumulative {
        population_share: Vec<f64>,
        measure_share: Vec<f64>
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CurveBuilder;

impl CurveBuilder {
    pub fn new() -> CurveBuilder {
        CurveBuilder
    }

    pub fn build_from(&self, input: CurveInput) -> Result<LorenzCurve, InequalityError> {
        match input {
            CurveInput::Raw(values) => self.build(values),
            CurveInput::Cumulative { population_share, measure_share } => {
                self.from_cumulative(population_share, measure_share)
            }
        }
    }

    /// 原始序列 → Lorenz curve。
    ///
    /// 穩定遞增排序後取累積和，母體索引除以 n、累積測度除以總和，並於開頭補上 (0, 0)。
    /// 累加前先除以最大值，總和不超過 n，不會溢位成 inf。
    pub fn build(&self, values: Vec<f64>) -> Result<LorenzCurve, InequalityError> {
        let ranked = Series::new(values)?.rank();
        let n = ranked.len();
        let cumulative = ranked.scaled_cumulative_sums()
            .ok_or(InequalityError::DegenerateInput)?;
        let total = cumulative[n - 1];

        let mut population_share = Vec::with_capacity(n + 1);
        let mut measure_share = Vec::with_capacity(n + 1);
        population_share.push(0.0);
        measure_share.push(0.0);
        for (i, partial) in cumulative.iter().enumerate() {
            population_share.push((i + 1) as f64 / n as f64);
            measure_share.push(partial / total);
        }

        debug!(population = n, total, "built Lorenz curve from raw series");
        Ok(LorenzCurve::from_shares(population_share, measure_share)?)
    }

    /// 已累積的比例序列：只檢查單調性與端點。
    pub fn from_cumulative(&self,
                           population_share: Vec<f64>,
                           measure_share: Vec<f64>) -> Result<LorenzCurve, InequalityError> {
        let curve = LorenzCurve::from_shares(population_share, measure_share)?;
        debug!(points = curve.len(), "accepted cumulative-proportion curve");
        Ok(curve)
    }
}

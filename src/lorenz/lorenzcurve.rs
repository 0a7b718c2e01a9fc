use serde::Serialize;

use crate::lorenz::inequalityerror::InvalidCurveReason;
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;

/// 端點檢查容許誤差
pub const ENDPOINT_TOLERANCE: f64 = 1e-6;

/// Lorenz curve：累積母體比例 (x) 對累積測度比例 (y)。
///
/// 只能經由 `CurveBuilder` 或 `LorenzCurve::from_shares` 建立，
/// 建立後不可變，保證兩序列等長、非遞減、自 0 起且於 1 止（容許 `ENDPOINT_TOLERANCE`）。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LorenzCurve {
    population_share: Vec<f64>,
    measure_share: Vec<f64>
}

fn validate_share(series: &'static str, share: &[f64]) -> Result<(), InvalidCurveReason> {
    if let Some(index) = share.iter().position(|v| !v.is_finite()) {
        return Err(InvalidCurveReason::NonFinite { series, index });
    }
    if let Some(index) = share.windows(2).position(|w| w[1] < w[0]) {
        return Err(InvalidCurveReason::NotMonotone { series, index: index + 1 });
    }
    let first = share[0];
    if first.abs() > ENDPOINT_TOLERANCE {
        return Err(InvalidCurveReason::BadStart { series, value: first });
    }
    let last = share[share.len() - 1];
    if (last - 1.0).abs() > ENDPOINT_TOLERANCE {
        return Err(InvalidCurveReason::BadEnd { series, value: last });
    }
    Ok(())
}

impl LorenzCurve {
    /// 驗證後直接採用給定的累積比例，不做任何正規化。
    pub fn from_shares(population_share: Vec<f64>,
                       measure_share: Vec<f64>) -> Result<LorenzCurve, InvalidCurveReason> {
        if population_share.len() != measure_share.len() {
            return Err(InvalidCurveReason::LengthMismatch {
                population: population_share.len(),
                measure: measure_share.len()
            });
        }
        if population_share.len() < 2 {
            return Err(InvalidCurveReason::TooFewPoints(population_share.len()));
        }
        validate_share("population", &population_share)?;
        validate_share("measure", &measure_share)?;
        Ok(LorenzCurve { population_share, measure_share })
    }

    pub fn population_share(&self) -> &[f64] {
        &self.population_share
    }

    pub fn measure_share(&self) -> &[f64] {
        &self.measure_share
    }

    /// 點數（含原點），即 n + 1
    pub fn len(&self) -> usize {
        self.population_share.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population_share.is_empty()
    }

    /// 母體單位數 n
    pub fn population_size(&self) -> usize {
        self.len() - 1
    }

    pub fn points(&self) -> Vec<Point2D> {
        self.population_share
            .iter()
            .zip(self.measure_share.iter())
            .map(|(&x, &y)| Point2D::new(x, y))
            .collect()
    }

    /// 供插值使用的節點：x 相同的點只保留最後一個。
    pub fn interpolation_nodes(&self) -> Vec<Point2D> {
        let mut nodes: Vec<Point2D> = Vec::with_capacity(self.len());
        for pt in self.points() {
            if let Some(last) = nodes.last_mut() {
                if last.x() == pt.x() {
                    *last = pt;
                    continue;
                }
            }
            nodes.push(pt);
        }
        nodes
    }

    pub fn into_shares(self) -> (Vec<f64>, Vec<f64>) {
        (self.population_share, self.measure_share)
    }
}

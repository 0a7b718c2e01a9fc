use argmin::core::{
    CostFunction,
    Error as ArgminError,
    Executor,
    State
};
use argmin::solver::brent::BrentRoot;

use crate::math::curve::curve::{
    anti_diagonal_gap,
    Curve
};
use crate::math::curve::nonparametriccurve::nonparametriccurve::Point2D;

/// 樣本點上 gap = y - (1 - x) 的變號位置。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AntiDiagonalBracket {
    /// 樣本點恰好落在反對角線上
    Exact(f64),
    /// 相鄰兩點 gap 異號
    Interval(Point2D, Point2D),
}

impl AntiDiagonalBracket {
    /// 線性內插的交點估計。對分段線性曲線即為精確解。
    pub fn linear_root(&self) -> f64 {
        match self {
            AntiDiagonalBracket::Exact(x) => *x,
            AntiDiagonalBracket::Interval(lhs_pt, rhs_pt) => Point2D::anti_diagonal_root(lhs_pt, rhs_pt),
        }
    }
}

/// 依序掃描相鄰點對，回傳第一個變號區間。
///
/// gap 為 NaN 的點不會形成區間；找不到時回傳 None。
pub fn scan_anti_diagonal(xs: &[f64], ys: &[f64]) -> Option<AntiDiagonalBracket> {
    let mut previous: Option<(Point2D, f64)> = None;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let gap = y - (1.0 - x);
        if gap == 0.0 {
            return Some(AntiDiagonalBracket::Exact(x));
        }
        let current = Point2D::new(x, y);
        if let Some((lhs_pt, lhs_gap)) = previous {
            if (lhs_gap < 0.0 && gap > 0.0) || (lhs_gap > 0.0 && gap < 0.0) {
                return Some(AntiDiagonalBracket::Interval(lhs_pt, current));
            }
        }
        previous = Some((current, gap));
    }
    None
}

// ─────────────────────────────────────────────
// Brent refinement
// ─────────────────────────────────────────────

struct AntiDiagonalGap<'a, C: Curve + ?Sized> {
    curve: &'a C,
}

impl<'a, C: Curve + ?Sized> CostFunction for AntiDiagonalGap<'a, C> {
    type Param = f64;
    type Output = f64;

    fn cost(&self, x: &Self::Param) -> Result<Self::Output, ArgminError> {
        Ok(anti_diagonal_gap(self.curve, *x))
    }
}

/// 在 [lhs_x, rhs_x] 內以 Brent 法求 curve(x) = 1 - x 的根。
///
/// 區間兩端的 gap 必須異號，否則 BrentRoot 會回傳錯誤。
pub fn refine_anti_diagonal_root<C: Curve + ?Sized>(
    curve: &C,
    lhs_x: f64,
    rhs_x: f64,
    tolerance: f64,
    max_iterations: u64,
) -> Result<f64, ArgminError> {
    let problem = AntiDiagonalGap { curve };
    let solver = BrentRoot::new(lhs_x, rhs_x, tolerance);
    let result = Executor::new(problem, solver)
        .configure(|state| state.max_iters(max_iterations))
        .run()?;

    let state = result.state();
    [state.get_param(), state.get_best_param()]
        .into_iter()
        .flatten()
        .copied()
        .filter(|x| x.is_finite())
        .min_by(|a, b| {
            anti_diagonal_gap(curve, *a).abs().total_cmp(&anti_diagonal_gap(curve, *b).abs())
        })
        .ok_or_else(|| ArgminError::msg("BrentRoot finished without a parameter"))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Parabola;

    impl Curve for Parabola {
        fn value(&self, x: f64) -> f64 {
            x * x
        }

        fn derivative(&self, x: f64) -> f64 {
            2.0 * x
        }
    }

    #[test]
    fn test_scan_exact_hit() {
        let xs = [0.0, 0.25, 0.5, 0.75, 1.0];
        let bracket = scan_anti_diagonal(&xs, &xs).unwrap();
        assert_eq!(bracket, AntiDiagonalBracket::Exact(0.5));
        assert_eq!(bracket.linear_root(), 0.5);
    }

    #[test]
    fn test_scan_interval() {
        let xs = [0.0, 0.25, 0.5, 0.75, 1.0];
        let ys = [0.0, 0.0, 0.0, 0.0, 1.0];
        let bracket = scan_anti_diagonal(&xs, &ys).unwrap();
        assert_eq!(
            bracket,
            AntiDiagonalBracket::Interval(Point2D::new(0.75, 0.0), Point2D::new(1.0, 1.0))
        );
        assert!((bracket.linear_root() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_scan_odd_diagonal() {
        let xs = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];
        let bracket = scan_anti_diagonal(&xs, &xs).unwrap();
        assert!((bracket.linear_root() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_scan_no_crossing() {
        // 整條曲線都在反對角線下方
        let xs = [0.0, 0.5, 0.9];
        let ys = [0.0, 0.1, 0.05];
        assert!(scan_anti_diagonal(&xs, &ys).is_none());
        assert!(scan_anti_diagonal(&[], &[]).is_none());
        assert!(scan_anti_diagonal(&[0.0, 1.0], &[f64::NAN, f64::NAN]).is_none());
    }

    #[test]
    fn test_brent_on_parabola() {
        // x^2 = 1 - x => x = (sqrt(5) - 1) / 2
        let expected = (5.0_f64.sqrt() - 1.0) / 2.0;
        let root = refine_anti_diagonal_root(&Parabola, 0.0, 1.0, 1e-12, 100).unwrap();
        assert!((root - expected).abs() < 1e-9);
    }

    #[test]
    fn test_brent_rejects_unbracketed_interval() {
        assert!(refine_anti_diagonal_root(&Parabola, 0.7, 1.0, 1e-12, 100).is_err());
    }
}

use serde::{
    Deserialize,
    Serialize
};

use crate::math::curve::curve::Curve;

/// 數值積分方式。
///
/// `SamplePoints` 直接在樣本點上做 composite trapezoid，是參考行為。
/// `Resampled` 先在 [min_x, max_x] 的等距網格上取插值曲線的值再做 trapezoid，
/// 插值若非線性，結果會與 `SamplePoints` 有些微差異。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum IntegrationMethod {
    #[default]
    SamplePoints,
    Resampled { grid_size: usize },
}

/// Composite trapezoidal rule：∫ y dx ≈ Σ (x[i+1]-x[i]) * (y[i]+y[i+1]) / 2
///
/// 長度不一致時以較短者為準；少於 2 點回傳 0。
pub fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) * 0.5)
        .sum()
}

/// `grid_size` 個等距點，含兩端。
pub fn linspace(start: f64, end: f64, grid_size: usize) -> Vec<f64> {
    match grid_size {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (grid_size - 1) as f64;
            (0..grid_size)
                .map(|i| if i == grid_size - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// 在等距網格上對任意曲線做 trapezoid 積分。
pub fn trapezoid_resampled<C: Curve + ?Sized>(curve: &C, start: f64, end: f64, grid_size: usize) -> f64 {
    let xs = linspace(start, end, grid_size);
    let ys: Vec<f64> = xs.iter().map(|&x| curve.value(x)).collect();
    trapezoid(&xs, &ys)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Square;

    impl Curve for Square {
        fn value(&self, x: f64) -> f64 {
            x * x
        }

        fn derivative(&self, x: f64) -> f64 {
            2.0 * x
        }
    }

    #[test]
    fn test_trapezoid_diagonal() {
        let xs = [0.0, 0.25, 0.5, 0.75, 1.0];
        assert!((trapezoid(&xs, &xs) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_trapezoid_step() {
        let xs = [0.0, 0.25, 0.5, 0.75, 1.0];
        let ys = [0.0, 0.0, 0.0, 0.0, 1.0];
        assert!((trapezoid(&xs, &ys) - 0.125).abs() < 1e-15);
    }

    #[test]
    fn test_trapezoid_degenerate() {
        assert_eq!(trapezoid(&[], &[]), 0.0);
        assert_eq!(trapezoid(&[0.5], &[0.5]), 0.0);
        // 同一 x 的兩點不貢獻面積
        assert_eq!(trapezoid(&[0.5, 0.5], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_linspace() {
        let grid = linspace(0.0, 1.0, 5);
        assert_eq!(grid, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(0.0, 1.0, 1), vec![0.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_resampled_converges() {
        let coarse = trapezoid_resampled(&Square, 0.0, 1.0, 5);
        let fine = trapezoid_resampled(&Square, 0.0, 1.0, 1001);
        let exact = 1.0 / 3.0;
        assert!((fine - exact).abs() < (coarse - exact).abs());
        assert!((fine - exact).abs() < 1e-6);
    }
}

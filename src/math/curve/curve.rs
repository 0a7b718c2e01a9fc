

pub trait Curve {
    fn value(&self, x: f64) -> f64;

    fn derivative(&self, x: f64) -> f64;
}

/// 曲線與反對角線 y = 1 - x 的差：L(x) - (1 - x)
pub fn anti_diagonal_gap<C: Curve + ?Sized>(curve: &C, x: f64) -> f64 {
    curve.value(x) - (1.0 - x)
}

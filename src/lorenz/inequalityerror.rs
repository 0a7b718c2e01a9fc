use thiserror::Error;

/// `LorenzCurve` 驗證失敗的原因
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidCurveReason {
    #[error("population share has {population} points but measure share has {measure}")]
    LengthMismatch { population: usize, measure: usize },
    #[error("a Lorenz curve needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    #[error("{series} share contains a non-finite value at index {index}")]
    NonFinite { series: &'static str, index: usize },
    #[error("{series} share decreases at index {index}")]
    NotMonotone { series: &'static str, index: usize },
    #[error("{series} share must start at 0, got {value}")]
    BadStart { series: &'static str, value: f64 },
    #[error("{series} share must end at 1, got {value}")]
    BadEnd { series: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InequalityError {
    #[error("degenerate input: the series is empty or its total measure is zero")]
    DegenerateInput,
    #[error("invalid measure {value} at index {index}: values must be finite and non-negative")]
    InvalidSeries { index: usize, value: f64 },
    #[error("invalid cumulative-proportion curve: {0}")]
    InvalidCurve(#[from] InvalidCurveReason),
    #[error("the Lorenz curve does not cross the anti-diagonal")]
    NoCrossing,
    #[error("the {0:?} interpolant could not be constructed")]
    Interpolation(crate::math::curve::nonparametriccurve::piecewisepolynomial::PolynomialType),
    #[error("root finding failed: {0}")]
    RootFinding(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x: x, y: y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn slope(lhs_pt: &Point2D, rhs_pt: &Point2D) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }

    /// 兩點連線與 y = 1 - x 的交點 x 座標。
    ///
    /// 兩點的 gap 須異號（或其中之一為 0）；兩點 x 相同時回傳左點。
    pub fn anti_diagonal_root(lhs_pt: &Point2D, rhs_pt: &Point2D) -> f64 {
        let lhs_gap = lhs_pt.y - (1.0 - lhs_pt.x);
        let rhs_gap = rhs_pt.y - (1.0 - rhs_pt.x);
        let denominator = rhs_gap - lhs_gap;
        if denominator == 0.0 || rhs_pt.x == lhs_pt.x {
            lhs_pt.x
        } else {
            lhs_pt.x - lhs_gap * (rhs_pt.x - lhs_pt.x) / denominator
        }
    }
}

pub trait NonparametricCurve {
    fn points(&self) -> Vec<Point2D>;

    fn min_x(&self) -> f64;

    fn max_x(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slope() {
        let lhs = Point2D::new(0.0, 1.0);
        let rhs = Point2D::new(2.0, 5.0);
        assert_eq!(Point2D::slope(&lhs, &rhs), 2.0);
    }

    #[test]
    fn test_anti_diagonal_root_on_diagonal() {
        let lhs = Point2D::new(0.25, 0.25);
        let rhs = Point2D::new(0.75, 0.75);
        assert!((Point2D::anti_diagonal_root(&lhs, &rhs) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_anti_diagonal_root_step() {
        // (0.75, 0) -> (1, 1)：y = 4x - 3 與 y = 1 - x 交於 x = 0.8
        let lhs = Point2D::new(0.75, 0.0);
        let rhs = Point2D::new(1.0, 1.0);
        assert!((Point2D::anti_diagonal_root(&lhs, &rhs) - 0.8).abs() < 1e-12);
    }
}

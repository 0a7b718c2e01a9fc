use crate::lorenz::inequalityerror::InequalityError;

/// 每個母體單位對應的非負測度值，長度至少為 1。
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    values: Vec<f64>
}

impl Series {
    pub fn new(values: Vec<f64>) -> Result<Series, InequalityError> {
        if values.is_empty() {
            return Err(InequalityError::DegenerateInput);
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0) {
            return Err(InequalityError::InvalidSeries { index, value });
        }
        Ok(Series { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 穩定排序（同值保持原順序）
    pub fn rank(self) -> RankedSeries {
        let mut values = self.values;
        values.sort_by(|a, b| a.total_cmp(b));
        RankedSeries { values }
    }
}

/// 遞增排序後的 `Series`。
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSeries {
    values: Vec<f64>
}

impl RankedSeries {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 累積和，最後一項即為總和。
    pub fn cumulative_sums(&self) -> Vec<f64> {
        Self::accumulate(self.values.iter().copied())
    }

    /// 各值除以最大值後的累積和；最大值為 0（或序列為空）時回傳 None。
    ///
    /// 比例不受縮放影響，而縮放後總和至多為 n。
    pub fn scaled_cumulative_sums(&self) -> Option<Vec<f64>> {
        let max = *self.values.last()?;
        if !(max > 0.0) {
            return None;
        }
        Some(Self::accumulate(self.values.iter().map(|v| v / max)))
    }

    fn accumulate<I: Iterator<Item = f64>>(values: I) -> Vec<f64> {
        values
            .scan(0.0, |acc, v| {
                *acc += v;
                Some(*acc)
            })
            .collect()
    }
}


/// 四捨六入五成雙（round half to even），至小數第 `digits` 位。
pub fn round(x: f64, digits: u32) -> f64 {
    let pow1: f64;
    let pow2: f64;

    if digits > 22 {
        pow1 = (10.0 as f64).powi((digits - 22) as i32);
        pow2 = 1e22;
    }
    else {
        pow1 = (10.0 as f64).powi(digits as i32);
        pow2 = 1.0;
    }

    let y = (x * pow1) * pow2;

    let mut z = y.round();

    if (y - z).abs() == 0.5 {
        z = 2.0 * ((y / 2.0).round() as f64)
    }

    (z / pow2) / pow1
}

/// 比例轉百分比字串，例如 `format_percent(0.1875, 1) == "18.8%"`。
pub fn format_percent(share: f64, digits: u32) -> String {
    let percent = round(share * 100.0, digits);
    format!("{:.*}%", digits as usize, percent)
}

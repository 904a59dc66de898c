pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let avg = mean(data)?;
    let variance = data.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / data.len() as f64;
    Some(variance.sqrt())
}

/// `m:ss.t` for the session timer
pub fn format_elapsed(ms: u64) -> String {
    let tenths = ms / 100;
    format!("{}:{:02}.{}", tenths / 600, (tenths / 10) % 60, tenths % 10)
}

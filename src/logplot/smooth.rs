/// TensorBoard 风格的指数滑动平均
///
/// smoothed[0] = raw[0]，之后 smoothed[i] = w * smoothed[i-1] + (1-w) * raw[i]
pub fn smooth(raw: &[f64], weight: f64) -> Vec<f64> {
    let mut last = match raw.first() {
        Some(&v) => v,
        None => return Vec::new(),
    };
    let mut smoothed = Vec::with_capacity(raw.len());
    for &point in raw {
        let value = last * weight + (1.0 - weight) * point;
        smoothed.push(value);
        last = value;
    }
    smoothed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-9, "{a} != {e}");
        }
    }

    #[test]
    fn test_smooth_known_series() {
        let out = smooth(&[1.0, 0.0, 1.0], 0.9);
        assert_close(&out, &[1.0, 0.9, 0.91]);
    }

    #[test]
    fn test_first_element_unchanged() {
        let out = smooth(&[5.0, 3.0], 0.5);
        assert_close(&out, &[5.0, 4.0]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(smooth(&[], 0.9).is_empty());
        assert_close(&smooth(&[2.5], 0.9), &[2.5]);
    }

    #[test]
    fn test_weight_zero_is_identity() {
        let raw = [0.3, 0.7, 0.1];
        assert_close(&smooth(&raw, 0.0), &raw);
    }
}

use argminmax::ArgMinMax;

/// Smallest and largest value. Caller guarantees a non-empty, NaN-free slice.
pub fn get_min_max(vec: &[f64]) -> (f64, f64) {
    let (min_index, max_index) = vec.argminmax();
    (vec[min_index], vec[max_index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max() {
        let values = [0.4, -1.2, 3.5, 0.0];
        assert_eq!(get_min_max(&values), (-1.2, 3.5));
        assert_eq!(get_min_max(&[7.0]), (7.0, 7.0));
    }
}

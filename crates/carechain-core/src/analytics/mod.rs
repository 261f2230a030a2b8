//! Derived statistics for the dashboard screens.
//!
//! Everything here is a pure function of already-fetched lists. Rates are
//! whole percentages, rounded, and 0 whenever the denominator is 0.

mod ranking;
mod stats;

pub use ranking::*;
pub use stats::*;

/// `part / whole` as a rounded whole percentage; 0 when `whole` is 0.
pub fn percentage(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Mean rounded to one decimal place; 0 for an empty set.
pub fn average(total: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    ((total as f64 / count as f64) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13); // 12.5 rounds away from zero
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn test_percentage_zero_denominator() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(7, 0), 0);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(10, 3), 3.3);
        assert_eq!(average(10, 0), 0.0);
    }
}

//! Date presentation helpers.

use chrono::NaiveDate;

/// Formats a calendar date for display, e.g. "June 10, 2024".
pub fn human_readable_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_without_zero_padding() {
        let date: NaiveDate = "2024-06-05".parse().unwrap();
        assert_eq!(human_readable_date(date), "June 5, 2024");
    }

    #[test]
    fn formats_double_digit_days() {
        let date: NaiveDate = "2024-12-25".parse().unwrap();
        assert_eq!(human_readable_date(date), "December 25, 2024");
    }
}

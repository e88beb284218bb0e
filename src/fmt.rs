/// Format a float as a dollar amount with thousands separators: $1,234.56
pub fn money(val: f64) -> String {
    let cents = (val.abs() * 100.0).round() as u64;
    let int_part = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    let sign = if val < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// Format a ratio-derived percentage to one decimal place: 8.8%
pub fn percent(val: f64) -> String {
    format!("{val:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(-500.00), "-$500.00");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(1000000.99), "$1,000,000.99");
        assert_eq!(money(42.10), "$42.10");
    }

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(money(7.199999999), "$7.20");
        assert_eq!(money(-0.004), "$0.00");
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(percent(8.78), "8.8%");
        assert_eq!(percent(-12.5), "-12.5%");
        assert_eq!(percent(0.0), "0.0%");
    }
}

use rust_decimal::Decimal;

/// Formats an amount as `#,##0.00`, rounding half to even.
pub fn format(amount: &Decimal) -> String {
    let rounded = amount.round_dp(2);
    let mut scaled = rounded.abs();
    scaled.rescale(2);
    let digits = scaled.to_string();
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{sign}{grouped}.{cents}")
}

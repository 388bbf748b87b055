//display helpers shared by the metric table and the monthly matrix

//"+1.23%", "-1.90%", "0.00%"
pub fn format_signed_pct(value: f64) -> String {
    let value = normalize_zero(value);
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, value)
}

//"+$1,234.56", "-$200.00", "$0.00"
pub fn format_signed_usd(value: f64) -> String {
    let value = normalize_zero(value);
    let sign = if value > 0.0 {
        "+"
    } else if value < 0.0 {
        "-"
    } else {
        ""
    };
    format!("{}${}", sign, group_thousands(value.abs()))
}

//"$1,234.56", "-$42.00"
pub fn format_usd(value: f64) -> String {
    if normalize_zero(value) < 0.0 {
        format!("-${}", group_thousands(value.abs()))
    } else {
        format!("${}", group_thousands(value.abs()))
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//keeps "-0.00" out of the output
fn normalize_zero(value: f64) -> f64 {
    if round_cents(value) == 0.0 {
        0.0
    } else {
        value
    }
}

//two decimals with comma thousands separators, input must be non-negative
fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}.{}", grouped, cents)
}

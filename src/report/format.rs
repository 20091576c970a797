//! Number formatting for statement output

/// Whole-number amount with space-grouped thousands, e.g. `-1 234 568`
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round();
    // Avoid printing "-0"
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

/// Fraction as a whole percentage, e.g. 0.338 -> `34%`
pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

/// Short axis label, e.g. 8 000 000 -> `8M`, -1 250 -> `-1.3K`
pub fn format_compact(value: f64) -> String {
    const UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

    for (scale, suffix) in UNITS {
        if value.abs() >= scale {
            let scaled = (value / scale * 10.0).round() / 10.0;
            return format!("{}{}", trim_fraction(scaled), suffix);
        }
    }
    trim_fraction((value * 10.0).round() / 10.0)
}

fn trim_fraction(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

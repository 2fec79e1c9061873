//! Display formatting shared by the order table and the dashboard.
//!
//! Numbers and dates follow the Indonesian (id-ID) conventions the dashboard
//! has always shown: `.` as thousands separator, `,` for decimals and
//! day/month/year dates without zero padding.

use chrono::{DateTime, Datelike, Local, NaiveDate, Timelike};

const MONTH_NAMES: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni",
    "Juli", "Agustus", "September", "Oktober", "November", "Desember",
];

/// Indonesian month name for a zero-based month index
pub fn month_name(month0: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month0 as usize).copied()
}

/// Format an amount as Rupiah, e.g. `Rp 1.500.000` or `Rp 2.500,5`
pub fn format_rupiah(amount: f64) -> String {
    format!("Rp {}", format_number_id(amount))
}

/// Group digits the id-ID way with at most two fraction digits
pub fn format_number_id(amount: f64) -> String {
    let negative = amount < 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (integer_part, fraction_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction_part.trim_end_matches('0');

    let digits: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*digit);
    }

    let mut result = String::new();
    if negative && (grouped != "0" || !fraction.is_empty()) {
        result.push('-');
    }
    result.push_str(&grouped);
    if !fraction.is_empty() {
        result.push(',');
        result.push_str(fraction);
    }
    result
}

/// `d/m/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// `d/m/yyyy, HH.MM.SS` in local time
pub fn format_local_datetime(datetime: &DateTime<Local>) -> String {
    format!(
        "{}, {:02}.{:02}.{:02}",
        format_date(datetime.date_naive()),
        datetime.hour(),
        datetime.minute(),
        datetime.second()
    )
}

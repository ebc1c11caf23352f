use time::{
    Date, Duration, OffsetDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a strict `YYYY-MM-DD` calendar day
///
/// Anything that is not exactly ten characters with dashes at positions 4
/// and 7, or that names a day the calendar does not have, yields `None`.
pub fn parse(date: &str) -> Option<Date> {
    let bytes = date.as_bytes();
    if bytes.len() != 10 {
        return None;
    }

    let shaped = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });

    if !shaped {
        return None;
    }

    Date::parse(date, ISO_DATE).ok()
}

pub fn format(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

pub fn is_valid(date: &str) -> bool {
    parse(date).is_some()
}

pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Most recent Monday on or before the given day
pub fn monday_of(date: Date) -> Option<Date> {
    let days_since_monday = date.weekday().number_days_from_monday();

    date.checked_sub(Duration::days(days_since_monday as i64))
        .filter(|d| (0..=9999).contains(&d.year()))
}

pub fn shift(date: Date, days: i64) -> Option<Date> {
    date.checked_add(Duration::days(days))
        .filter(|d| (0..=9999).contains(&d.year()))
}

pub fn monday_of_week(date: &str) -> Option<String> {
    parse(date).and_then(monday_of).map(format)
}

pub fn add_days(date: &str, days: i64) -> Option<String> {
    parse(date).and_then(|d| shift(d, days)).map(format)
}

pub fn next_week(date: &str) -> Option<String> {
    add_days(date, 7)
}

pub fn previous_week(date: &str) -> Option<String> {
    add_days(date, -7)
}

pub fn tomorrow(date: &str) -> Option<String> {
    add_days(date, 1)
}

/// "Monday"
pub fn weekday(date: Date) -> String {
    date.weekday().to_string()
}

/// "10"
pub fn day(date: Date) -> String {
    date.day().to_string()
}

/// "June 2024"
pub fn month_year(date: Date) -> String {
    format!("{} {}", date.month(), date.year())
}

/// "Monday, June 10th, 2024"
pub fn pretty(date: Date) -> String {
    let suffix = match (date.day() % 10, date.day() % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };

    format!(
        "{}, {} {}{suffix}, {}",
        date.weekday(),
        date.month(),
        date.day(),
        date.year()
    )
}

use time::{Date, Duration, Month};

/// ISO-8601 week number of `date` (weeks start on Monday, week 1 holds the
/// year's first Thursday).
pub fn iso_week_number(date: Date) -> u8 {
    let Some(thursday) = thursday_of_week(date) else {
        return date.iso_week();
    };
    let Some(first_thursday) = Date::from_calendar_date(thursday.year(), Month::January, 4)
        .ok()
        .and_then(thursday_of_week)
    else {
        return date.iso_week();
    };

    // Both sides are Thursdays, so the difference is a whole number of weeks.
    let weeks = (thursday - first_thursday).whole_days() / 7;
    (1 + weeks) as u8
}

fn thursday_of_week(date: Date) -> Option<Date> {
    let from_monday = date.weekday().number_days_from_monday() as i64;
    date.checked_add(Duration::days(3 - from_monday))
}

//! Calendar-accurate age arithmetic.

use chrono::{Datelike, NaiveDate};

/// Whether the birthday of `birth_date` has occurred in the calendar year of
/// `as_of` (on or before `as_of`).
///
/// Compares `(month, day)` pairs, so someone born on 29 February reaches their
/// birthday on 1 March in non-leap years.
pub fn birthday_reached(birth_date: NaiveDate, as_of: NaiveDate) -> bool {
    (as_of.month(), as_of.day()) >= (birth_date.month(), birth_date.day())
}

/// Number of completed birthdays between `birth_date` and `as_of`.
///
/// Elapsed calendar years, minus one when the birthday has not yet been
/// reached in `as_of`'s year. Negative when `birth_date` lies after `as_of`;
/// callers treat that as invalid input rather than clamping it.
pub fn compute_age(birth_date: NaiveDate, as_of: NaiveDate) -> i32 {
    let years = as_of.year() - birth_date.year();
    if birthday_reached(birth_date, as_of) {
        years
    } else {
        years - 1
    }
}

//! Hebrew-calendar date line, e.g. `ל׳ באדר א׳ תשפ״ד`.

use chrono::{Datelike, NaiveDate};
use icu_calendar::{Date, hebrew::Hebrew};

const GERESH: char = '׳';
const GERSHAYIM: char = '״';

/// Hebrew date of a Gregorian day: day and year in Hebrew numerals, month
/// name with the `ב` prefix.
pub fn hebrew_date(date: NaiveDate) -> Option<String> {
    let month = u8::try_from(date.month()).ok()?;
    let day = u8::try_from(date.day()).ok()?;
    let iso = Date::try_new_iso_date(date.year(), month, day).ok()?;
    let hebrew = iso.to_calendar(Hebrew::new());

    let year = u32::try_from(hebrew.year().number).ok()?;
    let month = month_name(hebrew.month().code.0.as_str(), is_leap_year(year))?;
    let day = hebrew.day_of_month().0;

    // the thousands are conventionally omitted
    Some(format!("{} ב{} {}", numeral(day), month, numeral(year % 1000)))
}

/// 13-month years: 3, 6, 8, 11, 14, 17 and 19 of the 19-year cycle.
fn is_leap_year(year: u32) -> bool {
    (7 * year + 1) % 19 < 7
}

fn month_name(code: &str, leap: bool) -> Option<&'static str> {
    Some(match code {
        "M01" => "תשרי",
        "M02" => "חשוון",
        "M03" => "כסלו",
        "M04" => "טבת",
        "M05" => "שבט",
        "M05L" => "אדר א׳",
        "M06" if leap => "אדר ב׳",
        "M06" => "אדר",
        "M07" => "ניסן",
        "M08" => "אייר",
        "M09" => "סיוון",
        "M10" => "תמוז",
        "M11" => "אב",
        "M12" => "אלול",
        _ => return None,
    })
}

/// Hebrew numeral with geresh/gershayim, for 1..=999.
fn numeral(mut n: u32) -> String {
    const HUNDREDS: [(u32, char); 4] = [(400, 'ת'), (300, 'ש'), (200, 'ר'), (100, 'ק')];
    const TENS: [char; 9] = ['י', 'כ', 'ל', 'מ', 'נ', 'ס', 'ע', 'פ', 'צ'];
    const ONES: [char; 9] = ['א', 'ב', 'ג', 'ד', 'ה', 'ו', 'ז', 'ח', 'ט'];

    let mut letters = Vec::new();
    for (value, letter) in HUNDREDS {
        while n >= value {
            letters.push(letter);
            n -= value;
        }
    }
    match n {
        // 15 and 16 avoid spelling the divine name
        15 => letters.extend(['ט', 'ו']),
        16 => letters.extend(['ט', 'ז']),
        _ => {
            if n >= 10 {
                letters.push(TENS[(n / 10 - 1) as usize]);
            }
            if n % 10 > 0 {
                letters.push(ONES[(n % 10 - 1) as usize]);
            }
        }
    }

    match letters.split_last() {
        None => String::new(),
        Some((last, [])) => format!("{last}{GERESH}"),
        Some((last, init)) => {
            let mut out: String = init.iter().collect();
            out.push(GERSHAYIM);
            out.push(*last);
            out
        }
    }
}

//! Display formatting shared by the text generators.

use chrono::NaiveDate;

/// Title-case names that arrive in UPPER CASE from EPA exports; any other casing is
/// assumed deliberate and returned unchanged.
pub fn format_city_name(name: &str) -> String {
    if name != name.to_uppercase() {
        return name.to_string();
    }

    name.to_lowercase()
        .split(' ')
        .enumerate()
        .map(|(index, word)| {
            if index > 0 && matches!(word, "of" | "the" | "and") {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `2.3M`, `512K`, `950`. Values that round to 1,000K are shown in millions.
pub fn format_population(population: u64) -> String {
    let thousands = (population as f64 / 1_000.0).round() as u64;
    if thousands >= 1_000 {
        return format!("{:.1}M", population as f64 / 1_000_000.0);
    }
    if population >= 1_000 {
        return format!("{thousands}K");
    }
    group_thousands(population)
}

/// `Dec 31, 2023`.
pub fn format_sample_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn pluralize<'a>(count: u64, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

pub fn plural_suffix(count: u64) -> &'static str {
    pluralize(count, "", "s")
}

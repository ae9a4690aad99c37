//! Text rendering of query results.
//!
//! Listings use a "grid" table: `+---+` rules between rows, a `+===+` rule
//! under the header, numbers right-aligned and text left-aligned. Airport
//! searches use the narrower fixed-width tables.

use chrono::{Month, NaiveDate};

use crate::models::{AirportRow, CountryTrip, MonthlyEmissions, Trip, YearlyEmissions};

pub const EMISSIONS_HEADER: &str = "Emissions (kg CO₂)";
pub const TOTAL_EMISSIONS_HEADER: &str = "Total Emissions (kg CO₂)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub align: Align,
}

impl Column {
    pub const fn text(header: &'static str) -> Self {
        Self { header, align: Align::Left }
    }

    pub const fn number(header: &'static str) -> Self {
        Self { header, align: Align::Right }
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, w: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{:<w$}", s, w = w),
        Align::Right => format!("{:>w$}", s, w = w),
    }
}

/// Render a grid table. Headers get two extra columns of slack.
pub fn grid(columns: &[Column], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| width(cell))
                .fold(width(col.header) + 2, usize::max)
        })
        .collect();

    let rule = |fill: char| {
        let mut line = String::from("+");
        for w in &widths {
            line.extend(std::iter::repeat_n(fill, w + 2));
            line.push('+');
        }
        line
    };
    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(columns)
            .zip(&widths)
            .map(|((cell, col), w)| pad(cell, *w, col.align))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let mut out = vec![rule('-')];
    out.push(line(columns.iter().map(|c| c.header).collect()));
    out.push(rule('='));
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
        out.push(rule('-'));
    }
    out.join("\n")
}

pub fn date(d: NaiveDate) -> String {
    d.format("%m-%d-%Y").to_string()
}

pub fn emissions(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn month_name(month: i64) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| month.to_string())
}

pub fn trips_table(trips: &[Trip]) -> String {
    const COLUMNS: [Column; 6] = [
        Column::number("Trip ID"),
        Column::text("From"),
        Column::text("To"),
        Column::text("Departure Date"),
        Column::number("Passengers"),
        Column::number(EMISSIONS_HEADER),
    ];
    let rows: Vec<Vec<String>> = trips
        .iter()
        .map(|t| {
            vec![
                t.trip_id.to_string(),
                t.from_airport.clone(),
                t.to_airport.clone(),
                date(t.departure_date),
                t.passengers.to_string(),
                emissions(t.emissions),
            ]
        })
        .collect();
    grid(&COLUMNS, &rows)
}

pub fn country_trips_table(trips: &[CountryTrip]) -> String {
    const COLUMNS: [Column; 8] = [
        Column::number("Trip ID"),
        Column::text("From Airport"),
        Column::text("From City"),
        Column::text("To Airport"),
        Column::text("To City"),
        Column::text("Departure Date"),
        Column::number("Passengers"),
        Column::number(EMISSIONS_HEADER),
    ];
    let rows: Vec<Vec<String>> = trips
        .iter()
        .map(|t| {
            vec![
                t.trip_id.to_string(),
                t.from_airport.clone(),
                t.from_city.clone(),
                t.to_airport.clone(),
                t.to_city.clone(),
                date(t.departure_date),
                t.passengers.to_string(),
                emissions(t.emissions),
            ]
        })
        .collect();
    grid(&COLUMNS, &rows)
}

pub fn yearly_table(years: &[YearlyEmissions]) -> String {
    const COLUMNS: [Column; 2] = [Column::number("Year"), Column::number(TOTAL_EMISSIONS_HEADER)];
    let rows: Vec<Vec<String>> = years
        .iter()
        .map(|y| vec![y.year.to_string(), emissions(y.emissions)])
        .collect();
    grid(&COLUMNS, &rows)
}

pub fn monthly_table(months: &[MonthlyEmissions]) -> String {
    const COLUMNS: [Column; 2] = [Column::text("Month"), Column::number(TOTAL_EMISSIONS_HEADER)];
    let rows: Vec<Vec<String>> = months
        .iter()
        .map(|m| vec![month_name(m.month), emissions(m.emissions)])
        .collect();
    grid(&COLUMNS, &rows)
}

/// Sum of the emissions column of any listing.
pub fn total<T>(rows: &[T], value: impl Fn(&T) -> f64) -> f64 {
    rows.iter().map(value).sum()
}

const CITY_RULE: &str = "+---------------------------+------------+";
const CODE_RULE: &str = "+------------+";

pub fn airport_list(airports: &[AirportRow]) -> String {
    let mut out = vec![
        CITY_RULE.to_string(),
        format!("| {:<25} | {:<10} |", "City", "Airport ID"),
        CITY_RULE.to_string(),
    ];
    out.extend(
        airports
            .iter()
            .map(|a| format!("| {:<25} | {:<10} |", a.city, a.airport_id)),
    );
    out.push(CITY_RULE.to_string());
    out.join("\n")
}

pub fn airport_codes(codes: &[String]) -> String {
    let mut out = vec![
        CODE_RULE.to_string(),
        format!("| {:<10} |", "Airport ID"),
        CODE_RULE.to_string(),
    ];
    out.extend(codes.iter().map(|code| format!("| {:<10} |", code)));
    out.push(CODE_RULE.to_string());
    out.join("\n")
}

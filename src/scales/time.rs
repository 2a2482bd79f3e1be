use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::array::extent_timestamps;
use crate::formatter::{FormatterRef, TickFormatter};
use crate::scales::DEFAULT_INTERVAL_COUNT;

/// Calendar unit a temporal tick cadence is expressed in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    /// Nominal duration of one unit, used only for cadence selection.
    /// Months count as 30 days and years as 365; actual stepping is
    /// calendar-correct.
    fn approx_millis(&self) -> i64 {
        match self {
            TimeUnit::Second => 1_000,
            TimeUnit::Minute => 60 * 1_000,
            TimeUnit::Hour => 60 * 60 * 1_000,
            TimeUnit::Day => 24 * 60 * 60 * 1_000,
            TimeUnit::Month => 30 * 24 * 60 * 60 * 1_000,
            TimeUnit::Year => 365 * 24 * 60 * 60 * 1_000,
        }
    }
}

/// A tick cadence: some whole multiple of a calendar unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInterval {
    pub unit: TimeUnit,
    pub multiple: u32,
}

impl TickInterval {
    pub const fn new(unit: TimeUnit, multiple: u32) -> Self {
        Self { unit, multiple }
    }

    pub fn approx_millis(&self) -> i64 {
        self.unit.approx_millis() * self.multiple as i64
    }
}

/// Candidate cadences in increasing duration order. Selection picks the
/// first entry at least as long as the raw per-tick duration, falling back
/// to the last entry for very wide domains.
pub const INTERVAL_TABLE: [TickInterval; 16] = [
    TickInterval::new(TimeUnit::Second, 1),
    TickInterval::new(TimeUnit::Second, 5),
    TickInterval::new(TimeUnit::Second, 15),
    TickInterval::new(TimeUnit::Second, 30),
    TickInterval::new(TimeUnit::Minute, 1),
    TickInterval::new(TimeUnit::Minute, 5),
    TickInterval::new(TimeUnit::Minute, 15),
    TickInterval::new(TimeUnit::Minute, 30),
    TickInterval::new(TimeUnit::Hour, 1),
    TickInterval::new(TimeUnit::Hour, 3),
    TickInterval::new(TimeUnit::Hour, 6),
    TickInterval::new(TimeUnit::Hour, 12),
    TickInterval::new(TimeUnit::Day, 1),
    TickInterval::new(TimeUnit::Day, 2),
    TickInterval::new(TimeUnit::Day, 5),
    TickInterval::new(TimeUnit::Day, 10),
];

/// Month and year cadences, appended after the fixed-duration entries.
pub const CALENDAR_INTERVAL_TABLE: [TickInterval; 3] = [
    TickInterval::new(TimeUnit::Month, 1),
    TickInterval::new(TimeUnit::Month, 3),
    TickInterval::new(TimeUnit::Year, 1),
];

/// Picks the cadence for a raw per-tick duration in milliseconds.
pub fn select_interval(raw_step_millis: i64) -> TickInterval {
    INTERVAL_TABLE
        .iter()
        .chain(CALENDAR_INTERVAL_TABLE.iter())
        .copied()
        .find(|interval| interval.approx_millis() >= raw_step_millis)
        .unwrap_or(CALENDAR_INTERVAL_TABLE[CALENDAR_INTERVAL_TABLE.len() - 1])
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => unreachable!("month out of range: {month}"),
    }
}

/// Steps forward by whole calendar months, clamping the day-of-month when
/// the target month is shorter.
fn add_months(value: NaiveDateTime, months: u32) -> NaiveDateTime {
    let total = value.month0() + months;
    let year = value.year() + (total / 12) as i32;
    let month = total % 12 + 1;
    let day = value.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_time(value.time())
}

/// Steps forward by one tick interval. Sub-month units add a fixed
/// duration; months and years step through the calendar so long axes don't
/// drift across variable month lengths and leap years.
pub fn add_interval(value: NaiveDateTime, interval: TickInterval) -> NaiveDateTime {
    let n = interval.multiple as i64;
    match interval.unit {
        TimeUnit::Second => value + Duration::seconds(n),
        TimeUnit::Minute => value + Duration::minutes(n),
        TimeUnit::Hour => value + Duration::hours(n),
        TimeUnit::Day => value + Duration::days(n),
        TimeUnit::Month => add_months(value, interval.multiple),
        TimeUnit::Year => add_months(value, interval.multiple * 12),
    }
}

/// Rounds down to the nearest interval boundary: all fields smaller than
/// the interval's unit are zeroed and the matching field is truncated to a
/// whole multiple. Month and year boundaries land on the first of the
/// month, so no invalid day-of-month can result.
pub fn round_down_to(value: NaiveDateTime, interval: TickInterval) -> NaiveDateTime {
    let m = interval.multiple;
    let date = value.date();
    match interval.unit {
        TimeUnit::Second => {
            let second = value.second() / m * m;
            date.and_hms_opt(value.hour(), value.minute(), second).unwrap()
        }
        TimeUnit::Minute => {
            let minute = value.minute() / m * m;
            date.and_hms_opt(value.hour(), minute, 0).unwrap()
        }
        TimeUnit::Hour => {
            let hour = value.hour() / m * m;
            date.and_hms_opt(hour, 0, 0).unwrap()
        }
        TimeUnit::Day => {
            let day = (value.day() - 1) / m * m + 1;
            NaiveDate::from_ymd_opt(value.year(), value.month(), day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        }
        TimeUnit::Month => {
            let month = value.month0() / m * m + 1;
            NaiveDate::from_ymd_opt(value.year(), month, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        }
        TimeUnit::Year => {
            let year = value.year() - value.year().rem_euclid(m as i32);
            NaiveDate::from_ymd_opt(year, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        }
    }
}

/// strftime pattern for tick labels at a given cadence.
pub fn display_pattern(interval: TickInterval) -> &'static str {
    match (interval.unit, interval.multiple) {
        (TimeUnit::Second, _) => "%M:%S",
        (TimeUnit::Minute, _) => "%H:%M:%S",
        (TimeUnit::Hour, 1) => "%H:%M:%S",
        (TimeUnit::Hour, _) => "%d %b %H:%M",
        (TimeUnit::Day, _) => "%d %b",
        (TimeUnit::Month, _) => "%b %Y",
        (TimeUnit::Year, _) => "%Y",
    }
}

/// Resolved temporal cadence: the chosen interval plus the boundary
/// timestamps that bracket the raw domain.
#[derive(Debug, Clone, PartialEq)]
pub struct NiceTemporal {
    pub interval: TickInterval,
    pub nice_min: NaiveDateTime,
    pub nice_max: NaiveDateTime,
    pub boundaries: Vec<NaiveDateTime>,
}

impl NiceTemporal {
    pub fn interval_count(&self) -> usize {
        self.boundaries.len() - 1
    }
}

/// Temporal scale mapping a date-time domain onto a coordinate range.
///
/// Tick cadence is a semantic unit rather than a numeric step: the domain
/// width picks an entry such as "15 minutes" or "3 months" from a fixed
/// table, the domain minimum is rounded down to a boundary of that unit,
/// and boundaries are accumulated one calendar step at a time until the
/// raw maximum is covered.
#[derive(Debug, Clone)]
pub struct TimeScale {
    domain: (NaiveDateTime, NaiveDateTime),
    range: (f64, f64),
    interval_count: usize,
    formatter: Option<FormatterRef>,
}

impl TimeScale {
    pub fn new(domain: (NaiveDateTime, NaiveDateTime), range: (f64, f64)) -> Self {
        let (min, max) = domain;
        let domain = if min > max { (max, min) } else { (min, max) };
        Self {
            domain,
            range,
            interval_count: DEFAULT_INTERVAL_COUNT,
            formatter: None,
        }
    }

    /// Creates a scale spanning the extent of `values`. An empty collection
    /// falls back to a one-day window at the epoch.
    pub fn from_data<I>(values: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = NaiveDateTime>,
    {
        Self::new(extent_timestamps(values), range)
    }

    pub fn with_domain(self, domain: (NaiveDateTime, NaiveDateTime)) -> Self {
        let (min, max) = domain;
        let domain = if min > max { (max, min) } else { (min, max) };
        Self { domain, ..self }
    }

    pub fn with_range(self, range: (f64, f64)) -> Self {
        Self { range, ..self }
    }

    pub fn with_interval_count(self, interval_count: usize) -> Self {
        Self {
            interval_count,
            ..self
        }
    }

    pub fn with_formatter(self, formatter: Arc<dyn TickFormatter>) -> Self {
        Self {
            formatter: Some(formatter),
            ..self
        }
    }

    pub fn domain(&self) -> (NaiveDateTime, NaiveDateTime) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn formatter(&self) -> Option<&FormatterRef> {
        self.formatter.as_ref()
    }

    /// Cadence and boundaries recomputed from the current domain.
    ///
    /// Boundary accumulation is a sequential search rather than a division:
    /// month lengths vary, so the number of calendar steps needed to cover
    /// the raw maximum cannot be computed in closed form.
    pub fn nice(&self) -> NiceTemporal {
        let (min, max) = self.domain;
        let divisor = self.interval_count.max(2) - 1;
        let raw_step = (max - min).num_milliseconds() / divisor as i64;
        let interval = select_interval(raw_step);

        let nice_min = round_down_to(min, interval);
        let mut boundaries = vec![nice_min];
        let mut current = nice_min;
        while current < max {
            current = add_interval(current, interval);
            boundaries.push(current);
        }
        NiceTemporal {
            interval,
            nice_min,
            nice_max: current,
            boundaries,
        }
    }

    /// Maps a timestamp into the range by its microsecond offset within the
    /// nice domain. A collapsed domain degenerates to the range start.
    pub fn position(&self, value: NaiveDateTime) -> f64 {
        let nice = self.nice();
        self.position_between(value, nice.nice_min, nice.nice_max)
    }

    pub(crate) fn position_between(
        &self,
        value: NaiveDateTime,
        nice_min: NaiveDateTime,
        nice_max: NaiveDateTime,
    ) -> f64 {
        let width = span_micros(nice_max - nice_min);
        if width == 0.0 {
            return self.range.0;
        }
        let elapsed = span_micros(value - nice_min);
        let (r0, r1) = self.range;
        r0 + (elapsed / width) * (r1 - r0)
    }

    /// Maps a range coordinate back to a timestamp within the nice domain.
    pub fn invert(&self, value: f64) -> NaiveDateTime {
        let nice = self.nice();
        let (r0, r1) = self.range;
        if r1 == r0 {
            return nice.nice_min;
        }
        let width = span_micros(nice.nice_max - nice.nice_min);
        let micros = ((value - r0) / (r1 - r0) * width).round() as i64;
        nice.nice_min + Duration::microseconds(micros)
    }

    /// Tick timestamps: every interval boundary from the rounded-down
    /// minimum through the first boundary covering the raw maximum.
    pub fn ticks_in_domain(&self) -> Vec<NaiveDateTime> {
        self.nice().boundaries
    }

    /// Range coordinates of the tick boundaries.
    pub fn ticks_in_range(&self) -> Vec<f64> {
        let nice = self.nice();
        nice.boundaries
            .iter()
            .map(|b| self.position_between(*b, nice.nice_min, nice.nice_max))
            .collect()
    }

    /// Formats a tick under the cadence's display pattern, unless a custom
    /// formatter was supplied.
    pub fn format_tick(&self, value: NaiveDateTime) -> String {
        if let Some(formatter) = &self.formatter {
            return formatter.format(&value.into());
        }
        let pattern = display_pattern(self.nice().interval);
        value.format(pattern).to_string()
    }
}

fn span_micros(duration: Duration) -> f64 {
    duration
        .num_microseconds()
        .map(|us| us as f64)
        .unwrap_or(duration.num_milliseconds() as f64 * 1_000.0)
}

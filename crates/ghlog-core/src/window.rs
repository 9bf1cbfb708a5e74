//! Local calendar-day window.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Where an instant falls relative to a [`DayWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Earlier than the first instant of the day.
    Before,
    /// Inside the day, bounds included.
    Within,
    /// Later than the last instant of the day.
    After,
}

/// One calendar day in a given time zone, `00:00:00` to `23:59:59` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(time) => time,
    None => panic!("23:59:59 is a valid time"),
};

#[derive(Clone, Copy)]
enum Edge {
    Start,
    End,
}

impl DayWindow {
    /// Builds the window for `day` in `tz`.
    ///
    /// Around DST transitions the start resolves to the earliest valid local
    /// time at or after midnight, and the end to the latest valid local time
    /// at or before `23:59:59`.
    pub fn new<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Self {
        let first = day.and_time(NaiveTime::MIN);
        let last = day.and_time(END_OF_DAY);
        Self {
            start: resolve(tz, first, Edge::Start),
            end: resolve(tz, last, Edge::End),
        }
    }

    pub const fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub const fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    pub fn place(&self, instant: &DateTime<FixedOffset>) -> Placement {
        if *instant < self.start {
            Placement::Before
        } else if *instant > self.end {
            Placement::After
        } else {
            Placement::Within
        }
    }
}

/// Maps a local wall-clock time to an instant, stepping away from DST gaps.
fn resolve<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime, edge: Edge) -> DateTime<FixedOffset> {
    let step = Duration::minutes(15);
    let mut candidate = local;
    loop {
        let mapped = tz.from_local_datetime(&candidate);
        let picked = match edge {
            Edge::Start => mapped.earliest(),
            Edge::End => mapped.latest(),
        };
        if let Some(instant) = picked {
            return instant.fixed_offset();
        }
        candidate = match edge {
            Edge::Start => candidate + step,
            Edge::End => candidate - step,
        };
    }
}

//! Calendar-day bucketing for reports.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::warn;

use crate::model::{Feedback, Order, User};

/// Records that may carry their own creation time, used when the preferred
/// date of a record is missing.
pub trait Timestamped {
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

impl Timestamped for Order {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.placed_at)
    }
}

impl Timestamped for User {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Timestamped for Feedback {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

/// Heading of a bucket, relative to the evaluation day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLabel {
    Today,
    Yesterday,
    Date(NaiveDate),
}

impl DayLabel {
    pub fn for_day(day: NaiveDate, today: NaiveDate) -> Self {
        if day == today {
            DayLabel::Today
        } else if Some(day) == today.checked_sub_signed(Duration::days(1)) {
            DayLabel::Yesterday
        } else {
            DayLabel::Date(day)
        }
    }
}

impl Display for DayLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayLabel::Today => f.write_str("Today"),
            DayLabel::Yesterday => f.write_str("Yesterday"),
            DayLabel::Date(day) => write!(f, "{}", day.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for DayLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Records sharing one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateBucket<T> {
    pub date: NaiveDate,
    pub label: DayLabel,
    pub items: Vec<T>,
}

/// Where [`group_by_date`] evaluates dates.
#[derive(Debug, Clone, Copy)]
pub struct DayClock {
    pub now: DateTime<Utc>,
    pub offset: FixedOffset,
}

impl DayClock {
    pub fn day_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }

    pub fn today(&self) -> NaiveDate {
        self.day_of(self.now)
    }
}

/// Buckets `items` by calendar day, most recent day first.
///
/// The day comes from `preferred`, else from [`Timestamped::created_at`],
/// else from the evaluation time. The last fallback is logged, since it
/// usually means a record is missing data.
pub fn group_by_date<T, F>(
    items: impl IntoIterator<Item = T>,
    preferred: F,
    clock: DayClock,
) -> Vec<DateBucket<T>>
where
    T: Timestamped,
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    let mut days: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();
    let mut undated = 0usize;
    for item in items {
        let at = match preferred(&item).or_else(|| item.created_at()) {
            Some(at) => at,
            None => {
                undated += 1;
                clock.now
            }
        };
        days.entry(clock.day_of(at)).or_default().push(item);
    }
    if undated > 0 {
        warn!(undated, "Records without any date were bucketed under today");
    }

    let today = clock.today();
    days.into_iter()
        .rev()
        .map(|(date, items)| DateBucket {
            date,
            label: DayLabel::for_day(date, today),
            items,
        })
        .collect()
}

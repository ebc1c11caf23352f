use signup_shared::{Result, date};
use time::Date;

use crate::{CategoryMapping, Roster, Store, day_rosters, find};

pub const NO_SCHEDULE: &str = "No schedule set for this day.";
pub const NO_PEOPLE: &str = "Schedule set but no people selected.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayEntry {
    NoSchedule,
    NoPeople {
        content: String,
    },
    Roster {
        content: String,
        students: Roster,
        /// Only listed when the day carries a volunteers bucket
        volunteers: Option<Roster>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBlock {
    pub date: String,
    pub weekday: String,
    pub day: String,
    pub month_year: String,
    pub entry: DayEntry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekView {
    pub monday: String,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub days: Vec<DayBlock>,
}

/// Monday of the requested day's week, or of `today`'s when the request is
/// absent, not a calendar day, or names a week that runs past 9999-12-31
pub fn resolve_monday(requested: Option<&str>, today: Date) -> Date {
    requested
        .and_then(date::parse)
        .and_then(date::monday_of)
        .filter(|monday| date::shift(*monday, 6).is_some())
        .or_else(|| date::monday_of(today))
        .unwrap_or(today)
}

impl WeekView {
    #[tracing::instrument(skip(store, mapping))]
    pub async fn resolve<S: Store + ?Sized>(
        store: &S,
        mapping: &CategoryMapping,
        requested: Option<&str>,
        today: Date,
    ) -> Result<Self> {
        let monday = resolve_monday(requested, today);
        let mut days = Vec::with_capacity(7);
        let mut current = Some(monday);

        for _ in 0..7 {
            let Some(day) = current else {
                break;
            };

            days.push(DayBlock::resolve(store, mapping, day).await?);
            current = date::shift(day, 1);
        }

        Ok(Self {
            monday: date::format(monday),
            previous: date::shift(monday, -7).map(date::format),
            next: date::shift(monday, 7)
                .filter(|next| date::shift(*next, 6).is_some())
                .map(date::format),
            days,
        })
    }
}

impl DayBlock {
    pub async fn resolve<S: Store + ?Sized>(
        store: &S,
        mapping: &CategoryMapping,
        day: Date,
    ) -> Result<Self> {
        let iso = date::format(day);
        let entry = match find(store, &iso).await? {
            Some(id) => DayEntry::resolve(store, mapping, &id).await?,
            _ => DayEntry::NoSchedule,
        };

        Ok(Self {
            weekday: date::weekday(day),
            day: date::day(day),
            month_year: date::month_year(day),
            date: iso,
            entry,
        })
    }
}

impl DayEntry {
    async fn resolve<S: Store + ?Sized>(
        store: &S,
        mapping: &CategoryMapping,
        id: &str,
    ) -> Result<Self> {
        let content = store
            .get(id)
            .await?
            .map(|post| post.content)
            .unwrap_or_default();

        let rosters = day_rosters(store, id, mapping).await?;
        if rosters.empty {
            return Ok(DayEntry::NoPeople { content });
        }

        let volunteers = rosters.volunteers.present.then_some(rosters.volunteers);

        Ok(DayEntry::Roster {
            content,
            students: rosters.students,
            volunteers,
        })
    }
}

use askama::Template as _;
use signup_schedule::{
    CategoryMapping, DayBlock, DayEntry, NO_PEOPLE, NO_SCHEDULE, Roster, Store, WeekView,
    day_rosters,
};
use time::Date;

/// One sign-up roster as printed under a day
pub struct RosterRow {
    pub names: Vec<String>,
    pub count: String,
}

impl From<&Roster> for RosterRow {
    fn from(roster: &Roster) -> Self {
        Self {
            names: roster.names.to_owned(),
            count: roster.count_label(),
        }
    }
}

pub struct DayRow {
    pub date: String,
    pub weekday: String,
    pub day: String,
    pub month_year: String,
    pub content: Option<String>,
    pub placeholder: Option<&'static str>,
    pub students: Option<RosterRow>,
    pub volunteers: Option<RosterRow>,
}

impl From<&DayBlock> for DayRow {
    fn from(block: &DayBlock) -> Self {
        let mut row = Self {
            date: block.date.to_owned(),
            weekday: block.weekday.to_owned(),
            day: block.day.to_owned(),
            month_year: block.month_year.to_owned(),
            content: None,
            placeholder: None,
            students: None,
            volunteers: None,
        };

        match &block.entry {
            DayEntry::NoSchedule => row.placeholder = Some(NO_SCHEDULE),
            DayEntry::NoPeople { content } => {
                row.content = Some(content.to_owned());
                row.placeholder = Some(NO_PEOPLE);
            }
            DayEntry::Roster {
                content,
                students,
                volunteers,
            } => {
                row.content = Some(content.to_owned());
                row.students = Some(students.into());
                row.volunteers = volunteers.as_ref().map(Into::into);
            }
        }

        row
    }
}

#[derive(askama::Template)]
#[template(path = "partials/week.html")]
pub struct WeekTemplate {
    pub monday: String,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub rows: Vec<DayRow>,
}

impl From<&WeekView> for WeekTemplate {
    fn from(view: &WeekView) -> Self {
        Self {
            monday: view.monday.to_owned(),
            previous: view.previous.to_owned(),
            next: view.next.to_owned(),
            rows: view.days.iter().map(Into::into).collect(),
        }
    }
}

pub struct RenderedWeek {
    /// Monday the fragment starts on
    pub monday: String,
    pub html: String,
}

/// Week schedule fragment for the requested day's week
pub async fn render_week<S: Store + ?Sized>(
    store: &S,
    mapping: &CategoryMapping,
    requested: Option<&str>,
    today: Date,
) -> anyhow::Result<RenderedWeek> {
    let view = WeekView::resolve(store, mapping, requested, today).await?;
    let html = WeekTemplate::from(&view).render()?;

    Ok(RenderedWeek {
        monday: view.monday,
        html,
    })
}

#[derive(askama::Template)]
#[template(path = "partials/day-roster.html")]
pub struct DayRosterTemplate {
    pub students: String,
    pub students_count: String,
    pub volunteers: String,
    pub volunteers_count: String,
}

/// Appends the sign-up summary to a schedule day's content.
///
/// Other kinds of records and days without any category come back
/// unchanged. Unlike the week view both roles are always listed here.
pub async fn decorate_day<S: Store + ?Sized>(
    store: &S,
    mapping: &CategoryMapping,
    id: &str,
    content: &str,
) -> anyhow::Result<String> {
    let Some(post) = store.get(id).await? else {
        return Ok(content.to_owned());
    };

    if !post.is_schedule_day() {
        return Ok(content.to_owned());
    }

    let rosters = day_rosters(store, id, mapping).await?;
    if rosters.empty {
        return Ok(content.to_owned());
    }

    let summary = DayRosterTemplate {
        students: rosters.students.joined(", "),
        students_count: rosters.students.count_label(),
        volunteers: rosters.volunteers.joined(", "),
        volunteers_count: rosters.volunteers.count_label(),
    }
    .render()?;

    Ok(format!("{content}{summary}"))
}

use std::collections::BTreeMap;

use serde::Deserialize;
use signup_shared::Result;
use strum::{AsRefStr, Display, EnumString};

use crate::{Category, Store};

/// Parent category ids that hold each role's sign-ups
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryMapping {
    pub youth_category: String,
    pub volunteers_category: String,
}

impl CategoryMapping {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.youth_category.trim().is_empty() {
            return Err("roster.youth_category must be set".to_owned());
        }

        if self.volunteers_category.trim().is_empty() {
            return Err("roster.volunteers_category must be set".to_owned());
        }

        if self.youth_category == self.volunteers_category {
            return Err("roster youth and volunteers categories must differ".to_owned());
        }

        Ok(())
    }

    pub fn parent(&self, role: Role) -> &str {
        match role {
            Role::Youth => &self.youth_category,
            Role::Volunteers => &self.volunteers_category,
        }
    }
}

#[derive(EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Youth,
    Volunteers,
}

impl Role {
    /// Metadata key holding this role's capacity on a schedule day
    pub fn limit_key(&self) -> &'static str {
        match self {
            Role::Youth => "limits_students",
            Role::Volunteers => "limits_volunteers",
        }
    }
}

/// Category names grouped by parent id, top level categories under `""`
pub type Buckets = BTreeMap<String, Vec<String>>;

pub fn group(categories: &[Category]) -> Buckets {
    let mut buckets = Buckets::new();

    for category in categories {
        buckets
            .entry(category.parent_id.to_owned().unwrap_or_default())
            .or_default()
            .push(category.name.to_owned());
    }

    buckets
}

pub async fn buckets<S: Store + ?Sized>(store: &S, day_id: &str) -> Result<Buckets> {
    let categories = store.categories(day_id).await?;

    Ok(group(&categories))
}

/// Only positive integers count as a capacity
pub async fn limit<S: Store + ?Sized>(store: &S, day_id: &str, role: Role) -> Result<Option<u32>> {
    let value = store.meta(day_id, role.limit_key()).await?;

    Ok(value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|limit| *limit > 0))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub names: Vec<String>,
    pub limit: Option<u32>,
    /// Whether the day carries this role's bucket at all
    pub present: bool,
}

impl Roster {
    pub fn from_buckets(buckets: &Buckets, parent: &str, limit: Option<u32>) -> Self {
        match buckets.get(parent) {
            Some(names) => Self {
                names: names.to_owned(),
                limit,
                present: true,
            },
            _ => Self {
                names: vec![],
                limit,
                present: false,
            },
        }
    }

    pub fn count(&self) -> usize {
        self.names.len()
    }

    /// "4/10" with a limit, "4" without
    pub fn count_label(&self) -> String {
        match self.limit {
            Some(limit) => format!("{}/{limit}", self.count()),
            _ => self.count().to_string(),
        }
    }

    pub fn joined(&self, separator: &str) -> String {
        self.names.join(separator)
    }
}

pub async fn roster_for<S: Store + ?Sized>(
    store: &S,
    day_id: &str,
    role: Role,
    mapping: &CategoryMapping,
) -> Result<Roster> {
    let buckets = buckets(store, day_id).await?;
    let limit = limit(store, day_id, role).await?;

    Ok(Roster::from_buckets(&buckets, mapping.parent(role), limit))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayRosters {
    /// No category of any kind is attached to the day
    pub empty: bool,
    pub students: Roster,
    pub volunteers: Roster,
}

/// Both rosters of a day from a single categories read
pub async fn day_rosters<S: Store + ?Sized>(
    store: &S,
    day_id: &str,
    mapping: &CategoryMapping,
) -> Result<DayRosters> {
    let categories = store.categories(day_id).await?;
    let buckets = group(&categories);

    let students_limit = limit(store, day_id, Role::Youth).await?;
    let volunteers_limit = limit(store, day_id, Role::Volunteers).await?;

    Ok(DayRosters {
        empty: categories.is_empty(),
        students: Roster::from_buckets(&buckets, mapping.parent(Role::Youth), students_limit),
        volunteers: Roster::from_buckets(
            &buckets,
            mapping.parent(Role::Volunteers),
            volunteers_limit,
        ),
    })
}

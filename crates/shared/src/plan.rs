use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One dinner slot of a week plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct PlannedDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub recipe_id: Option<String>,
    #[validate(range(min = 1, max = 50))]
    pub servings: u32,
    /// Leftover days reuse an earlier cook and add no ingredients.
    #[serde(default)]
    pub leftover: bool,
}

impl PlannedDay {
    pub fn is_weekend(&self) -> bool {
        is_weekend(self.date)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct WeekPlan {
    pub week_start: NaiveDate,
    #[validate(length(max = 14), nested)]
    pub days: Vec<PlannedDay>,
}

pub fn is_weekend(date: NaiveDate) -> bool {
    let weekday = date.weekday();
    weekday == Weekday::Sat || weekday == Weekday::Sun
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the mirror table.
///
/// Field order matches the output column order. Values that could not be
/// read from the page are empty strings, never missing keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefacementRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Attacker")]
    pub attacker: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Mirror")]
    pub mirror: String,
}

impl DefacementRecord {
    pub fn new(date: String, attacker: String, team: String, url: String, mirror: String) -> Self {
        Self {
            date,
            attacker,
            team,
            url,
            mirror,
        }
    }

    /// Team name, if the row had one.
    pub fn team(&self) -> Option<&str> {
        if self.team.is_empty() {
            None
        } else {
            Some(&self.team)
        }
    }

    /// The date column as a calendar date. `None` when the site printed
    /// something other than `YYYY-MM-DD`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

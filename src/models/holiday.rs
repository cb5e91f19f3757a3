//! Public holiday model with tenant and region scoping.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Employee;

/// A public holiday, scoped to a legal entity and/or a state region.
///
/// A `None` entity applies to every tenant; a `None` region applies to
/// every state.
///
/// # Example
///
/// ```
/// use leave_engine::models::PublicHoliday;
/// use chrono::NaiveDate;
///
/// let holiday = PublicHoliday {
///     id: "hol_anzac".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 4, 25).unwrap(),
///     name: "Anzac Day".to_string(),
///     entity_id: None,
///     state_region: None,
///     is_paid: true,
///     is_active: true,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// Unique identifier for the holiday.
    pub id: String,
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday (e.g., "Anzac Day").
    pub name: String,
    /// The legal entity the holiday applies to. `None` means all tenants.
    #[serde(default)]
    pub entity_id: Option<String>,
    /// The state or region the holiday applies to. `None` means all regions.
    #[serde(default)]
    pub state_region: Option<String>,
    /// Whether the day is paid when it falls inside a leave range.
    pub is_paid: bool,
    /// Inactive holidays are ignored by the calendar.
    pub is_active: bool,
}

impl PublicHoliday {
    /// Returns true if this holiday applies to the given employee.
    ///
    /// A holiday applies when it is active, its entity scope is global or
    /// matches the employee's entity, and its region scope is global or
    /// matches the employee's state. An employee with no recorded state only
    /// matches region-unscoped holidays.
    pub fn applies_to(&self, employee: &Employee) -> bool {
        if !self.is_active {
            return false;
        }
        let entity_matches = match &self.entity_id {
            None => true,
            Some(entity) => *entity == employee.entity_id,
        };
        let region_matches = match &self.state_region {
            None => true,
            Some(region) => employee.state.as_deref() == Some(region.as_str()),
        };
        entity_matches && region_matches
    }
}

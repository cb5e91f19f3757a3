//! Leave policy model and related types.
//!
//! A leave policy is organization-level reference data: one active policy
//! per leave type describing how that category accrues and who may use it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The category of leave a policy or balance applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Annual (recreation) leave.
    Annual,
    /// Personal/carer's leave.
    Personal,
    /// Sick leave, where tracked separately from personal leave.
    Sick,
    /// Long service leave, typically gated behind years of service.
    LongService,
    /// Parental leave.
    Parental,
    /// Compassionate leave.
    Compassionate,
    /// Any other configured category.
    Other,
}

impl LeaveType {
    /// Returns the snake_case wire name for this leave type.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Annual => "annual",
            LeaveType::Personal => "personal",
            LeaveType::Sick => "sick",
            LeaveType::LongService => "long_service",
            LeaveType::Parental => "parental",
            LeaveType::Compassionate => "compassionate",
            LeaveType::Other => "other",
        }
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LeaveType {
    type Err = crate::error::EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annual" => Ok(LeaveType::Annual),
            "personal" => Ok(LeaveType::Personal),
            "sick" => Ok(LeaveType::Sick),
            "long_service" => Ok(LeaveType::LongService),
            "parental" => Ok(LeaveType::Parental),
            "compassionate" => Ok(LeaveType::Compassionate),
            "other" => Ok(LeaveType::Other),
            _ => Err(crate::error::EngineError::InvalidRequest {
                field: "leave_type".to_string(),
                message: format!("unknown leave type '{}'", s),
            }),
        }
    }
}

/// The unit an accrual rate is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualUnit {
    /// The rate is a number of hours accrued per year.
    HoursPerYear,
    /// The rate is a number of weeks accrued per year.
    WeeksPerYear,
    /// The rate is a number of days accrued per year.
    DaysPerYear,
}

/// An organization-level accrual policy for one leave category.
///
/// # Example
///
/// ```
/// use leave_engine::models::{AccrualUnit, LeavePolicy, LeaveType};
/// use rust_decimal::Decimal;
///
/// let policy = LeavePolicy {
///     id: "pol_annual".to_string(),
///     leave_type: LeaveType::Annual,
///     accrual_unit: AccrualUnit::WeeksPerYear,
///     accrual_rate: Decimal::new(4, 0),
///     standard_hours_per_day: LeavePolicy::default_standard_hours_per_day(),
///     hours_per_week_reference: LeavePolicy::default_hours_per_week_reference(),
///     min_service_years_before_accrual: None,
///     allow_negative_balance: false,
///     is_active: true,
/// };
/// assert_eq!(policy.standard_hours_per_day, Decimal::new(76, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeavePolicy {
    /// Unique identifier for the policy.
    pub id: String,
    /// The leave category the policy governs.
    pub leave_type: LeaveType,
    /// The unit `accrual_rate` is expressed in.
    pub accrual_unit: AccrualUnit,
    /// The accrual rate, in `accrual_unit` units per year.
    pub accrual_rate: Decimal,
    /// Hours in a standard working day, used to convert between days and
    /// hours. Defaults to 7.6.
    #[serde(default = "LeavePolicy::default_standard_hours_per_day")]
    pub standard_hours_per_day: Decimal,
    /// The full-time weekly-hours reference FTE is computed against.
    /// Defaults to 38.
    #[serde(default = "LeavePolicy::default_hours_per_week_reference")]
    pub hours_per_week_reference: Decimal,
    /// Years of service required before this category accrues or may be
    /// used. Absent means no gate.
    #[serde(default)]
    pub min_service_years_before_accrual: Option<Decimal>,
    /// Whether deductions may take the balance below zero.
    #[serde(default)]
    pub allow_negative_balance: bool,
    /// Whether the policy is currently in force.
    pub is_active: bool,
}

impl LeavePolicy {
    /// The default standard working day, in hours (7.6).
    pub fn default_standard_hours_per_day() -> Decimal {
        Decimal::new(76, 1)
    }

    /// The default full-time weekly-hours reference (38).
    pub fn default_hours_per_week_reference() -> Decimal {
        Decimal::new(38, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_policy_with_defaults() {
        let json = r#"{
            "id": "pol_annual",
            "leave_type": "annual",
            "accrual_unit": "weeks_per_year",
            "accrual_rate": "4",
            "is_active": true
        }"#;

        let policy: LeavePolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.leave_type, LeaveType::Annual);
        assert_eq!(policy.accrual_unit, AccrualUnit::WeeksPerYear);
        assert_eq!(policy.standard_hours_per_day, Decimal::new(76, 1));
        assert_eq!(policy.hours_per_week_reference, Decimal::new(38, 0));
        assert_eq!(policy.min_service_years_before_accrual, None);
        assert!(!policy.allow_negative_balance);
    }

    #[test]
    fn test_deserialize_service_gated_policy() {
        let json = r#"{
            "id": "pol_long_service",
            "leave_type": "long_service",
            "accrual_unit": "weeks_per_year",
            "accrual_rate": "0.867",
            "min_service_years_before_accrual": "5",
            "is_active": true
        }"#;

        let policy: LeavePolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.leave_type, LeaveType::LongService);
        assert_eq!(
            policy.min_service_years_before_accrual,
            Some(Decimal::new(5, 0))
        );
    }

    #[test]
    fn test_deserialize_negative_balance_policy() {
        let json = r#"{
            "id": "pol_sick",
            "leave_type": "sick",
            "accrual_unit": "days_per_year",
            "accrual_rate": "10",
            "allow_negative_balance": true,
            "is_active": true
        }"#;

        let policy: LeavePolicy = serde_json::from_str(json).unwrap();
        assert!(policy.allow_negative_balance);
    }

    #[test]
    fn test_leave_type_from_str_round_trips() {
        for leave_type in [
            LeaveType::Annual,
            LeaveType::Personal,
            LeaveType::Sick,
            LeaveType::LongService,
            LeaveType::Parental,
            LeaveType::Compassionate,
            LeaveType::Other,
        ] {
            let parsed: LeaveType = leave_type.as_str().parse().unwrap();
            assert_eq!(parsed, leave_type);
        }
        assert!("gardening".parse::<LeaveType>().is_err());
    }

    #[test]
    fn test_leave_type_display_matches_wire_name() {
        assert_eq!(LeaveType::Annual.to_string(), "annual");
        assert_eq!(LeaveType::LongService.to_string(), "long_service");
        assert_eq!(
            serde_json::to_string(&LeaveType::LongService).unwrap(),
            "\"long_service\""
        );
    }

    #[test]
    fn test_accrual_unit_serialization() {
        assert_eq!(
            serde_json::to_string(&AccrualUnit::HoursPerYear).unwrap(),
            "\"hours_per_year\""
        );
        assert_eq!(
            serde_json::to_string(&AccrualUnit::DaysPerYear).unwrap(),
            "\"days_per_year\""
        );
    }

    #[test]
    fn test_policy_round_trip() {
        let policy = LeavePolicy {
            id: "pol_personal".to_string(),
            leave_type: LeaveType::Personal,
            accrual_unit: AccrualUnit::DaysPerYear,
            accrual_rate: Decimal::new(10, 0),
            standard_hours_per_day: LeavePolicy::default_standard_hours_per_day(),
            hours_per_week_reference: LeavePolicy::default_hours_per_week_reference(),
            min_service_years_before_accrual: None,
            allow_negative_balance: false,
            is_active: true,
        };

        let json = serde_json::to_string(&policy).unwrap();
        let deserialized: LeavePolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(policy, deserialized);
    }
}

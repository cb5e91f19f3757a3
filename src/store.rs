//! The persistence-collaborator seam.
//!
//! The engine reaches record storage through the [`LeaveStore`] trait:
//! generic list/filter/create/update primitives over the five entities,
//! plus the two atomic hooks the engine's correctness rules rely on: a
//! compare-and-set status transition on leave requests, and an
//! at-most-once restore credit per request. [`MemoryStore`] implements the
//! trait in process memory for tests, benchmarks, and the HTTP layer.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, LeaveBalance, LeaveRequest, LeaveType, PublicHoliday, RequestStatus};

/// A status transition applied through the compare-and-set hook.
///
/// Each variant carries exactly the fields its transition writes; the
/// store applies them only when the request's status still matches the
/// caller's expectation at write time.
#[derive(Debug, Clone)]
pub enum RequestTransition {
    /// `pending -> approved`, recording the decision time and the hours
    /// deducted from the ledger.
    Approve {
        /// When the decision was made.
        decided_at: DateTime<Utc>,
        /// The hours the approval deducted.
        deducted_hours: Decimal,
    },
    /// `pending -> declined`, recording the decision time and the
    /// approver's reason.
    Decline {
        /// When the decision was made.
        decided_at: DateTime<Utc>,
        /// The approver's stated reason. Never empty.
        reason: String,
    },
    /// `pending -> cancelled` or `approved -> cancelled` (recall).
    Cancel {
        /// When the cancellation happened.
        decided_at: DateTime<Utc>,
        /// The actor's stated reason, when given.
        reason: Option<String>,
    },
    /// `approved -> pending`: the compensating step when the ledger
    /// deduction fails after the status flip committed.
    RevertToPending,
}

impl RequestTransition {
    /// The status this transition moves the request into.
    pub fn target_status(&self) -> RequestStatus {
        match self {
            RequestTransition::Approve { .. } => RequestStatus::Approved,
            RequestTransition::Decline { .. } => RequestStatus::Declined,
            RequestTransition::Cancel { .. } => RequestStatus::Cancelled,
            RequestTransition::RevertToPending => RequestStatus::Pending,
        }
    }
}

/// Storage operations the engine needs from the persistence collaborator.
///
/// Implementations must make [`transition_request`](LeaveStore::transition_request)
/// and [`restore_balance`](LeaveStore::restore_balance) atomic: two concurrent
/// callers of either must not both succeed for the same record.
/// Infrastructure failures surface as [`EngineError::StoreUnavailable`],
/// which callers treat as retryable.
pub trait LeaveStore: Send + Sync {
    /// Fetches an employee by id.
    fn employee(&self, id: &str) -> EngineResult<Employee>;

    /// Creates or replaces an employee record.
    fn upsert_employee(&self, employee: Employee) -> EngineResult<()>;

    /// Lists all public holidays.
    fn holidays(&self) -> EngineResult<Vec<PublicHoliday>>;

    /// Creates or replaces a public holiday record.
    fn upsert_holiday(&self, holiday: PublicHoliday) -> EngineResult<()>;

    /// Fetches the ledger row for an employee and leave type, if one exists.
    fn balance(&self, employee_id: &str, leave_type: LeaveType)
    -> EngineResult<Option<LeaveBalance>>;

    /// Lists all ledger rows for an employee.
    fn balances_for_employee(&self, employee_id: &str) -> EngineResult<Vec<LeaveBalance>>;

    /// Creates or replaces a ledger row, keyed by (employee_id, leave_type).
    fn upsert_balance(&self, balance: LeaveBalance) -> EngineResult<()>;

    /// Fetches a leave request by id.
    fn request(&self, id: &str) -> EngineResult<LeaveRequest>;

    /// Creates a leave request record.
    fn insert_request(&self, request: LeaveRequest) -> EngineResult<()>;

    /// Lists all leave requests for an employee.
    fn requests_for_employee(&self, employee_id: &str) -> EngineResult<Vec<LeaveRequest>>;

    /// Lists all leave requests whose employee belongs to a department.
    fn requests_for_department(&self, department_id: &str) -> EngineResult<Vec<LeaveRequest>>;

    /// Applies a status transition if and only if the request's status
    /// still equals `expected` at write time.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AlreadyDecided`] with the status found when
    /// the compare-and-set loses, and [`EngineError::RequestNotFound`] when
    /// the request does not exist.
    fn transition_request(
        &self,
        id: &str,
        expected: RequestStatus,
        transition: RequestTransition,
    ) -> EngineResult<LeaveRequest>;

    /// Credits a request's restored hours, at most once per request id.
    ///
    /// Writes `balance` as an upsert and records the request id in one
    /// atomic step, so a failure commits neither. Returns `true` when this
    /// call applied the credit and `false` when the request was already
    /// restored, in which case the ledger is left untouched.
    fn restore_balance(&self, request_id: &str, balance: LeaveBalance) -> EngineResult<bool>;
}

#[derive(Default)]
struct MemoryStoreInner {
    employees: HashMap<String, Employee>,
    holidays: HashMap<String, PublicHoliday>,
    balances: HashMap<(String, LeaveType), LeaveBalance>,
    requests: HashMap<String, LeaveRequest>,
    restored_requests: HashSet<String>,
}

/// An in-process [`LeaveStore`] backed by hash maps behind a mutex.
///
/// Every trait method takes the lock once, so the compare-and-set and the
/// restore marker are atomic with respect to each other.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> EngineResult<std::sync::MutexGuard<'_, MemoryStoreInner>> {
        self.inner.lock().map_err(|_| EngineError::StoreUnavailable {
            message: "store lock poisoned".to_string(),
        })
    }
}

impl LeaveStore for MemoryStore {
    fn employee(&self, id: &str) -> EngineResult<Employee> {
        self.lock()?
            .employees
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    fn upsert_employee(&self, employee: Employee) -> EngineResult<()> {
        self.lock()?.employees.insert(employee.id.clone(), employee);
        Ok(())
    }

    fn holidays(&self) -> EngineResult<Vec<PublicHoliday>> {
        let mut holidays: Vec<_> = self.lock()?.holidays.values().cloned().collect();
        holidays.sort_by_key(|h| h.date);
        Ok(holidays)
    }

    fn upsert_holiday(&self, holiday: PublicHoliday) -> EngineResult<()> {
        self.lock()?.holidays.insert(holiday.id.clone(), holiday);
        Ok(())
    }

    fn balance(
        &self,
        employee_id: &str,
        leave_type: LeaveType,
    ) -> EngineResult<Option<LeaveBalance>> {
        Ok(self
            .lock()?
            .balances
            .get(&(employee_id.to_string(), leave_type))
            .cloned())
    }

    fn balances_for_employee(&self, employee_id: &str) -> EngineResult<Vec<LeaveBalance>> {
        let mut balances: Vec<_> = self
            .lock()?
            .balances
            .values()
            .filter(|b| b.employee_id == employee_id)
            .cloned()
            .collect();
        balances.sort_by_key(|b| b.leave_type.as_str());
        Ok(balances)
    }

    fn upsert_balance(&self, balance: LeaveBalance) -> EngineResult<()> {
        debug_assert!(balance.invariant_holds(), "ledger invariant violated");
        self.lock()?
            .balances
            .insert((balance.employee_id.clone(), balance.leave_type), balance);
        Ok(())
    }

    fn request(&self, id: &str) -> EngineResult<LeaveRequest> {
        self.lock()?
            .requests
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::RequestNotFound { id: id.to_string() })
    }

    fn insert_request(&self, request: LeaveRequest) -> EngineResult<()> {
        self.lock()?.requests.insert(request.id.clone(), request);
        Ok(())
    }

    fn requests_for_employee(&self, employee_id: &str) -> EngineResult<Vec<LeaveRequest>> {
        let mut requests: Vec<_> = self
            .lock()?
            .requests
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        Ok(requests)
    }

    fn requests_for_department(&self, department_id: &str) -> EngineResult<Vec<LeaveRequest>> {
        let inner = self.lock()?;
        let mut requests: Vec<_> = inner
            .requests
            .values()
            .filter(|r| {
                inner
                    .employees
                    .get(&r.employee_id)
                    .is_some_and(|e| e.department_id == department_id)
            })
            .cloned()
            .collect();
        requests.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        Ok(requests)
    }

    fn transition_request(
        &self,
        id: &str,
        expected: RequestStatus,
        transition: RequestTransition,
    ) -> EngineResult<LeaveRequest> {
        let mut inner = self.lock()?;
        let request = inner
            .requests
            .get_mut(id)
            .ok_or_else(|| EngineError::RequestNotFound { id: id.to_string() })?;

        // The status precondition is evaluated here, under the same lock
        // that commits the write.
        if request.status != expected {
            return Err(EngineError::AlreadyDecided {
                request_id: id.to_string(),
                status: request.status,
            });
        }

        request.status = transition.target_status();
        match transition {
            RequestTransition::Approve {
                decided_at,
                deducted_hours,
            } => {
                request.decided_at = Some(decided_at);
                request.deducted_hours = Some(deducted_hours);
            }
            RequestTransition::Decline { decided_at, reason } => {
                request.decided_at = Some(decided_at);
                request.cancellation_reason = Some(reason);
            }
            RequestTransition::Cancel { decided_at, reason } => {
                request.decided_at = Some(decided_at);
                request.cancellation_reason = reason;
            }
            RequestTransition::RevertToPending => {
                request.decided_at = None;
                request.deducted_hours = None;
            }
        }

        Ok(request.clone())
    }

    fn restore_balance(&self, request_id: &str, balance: LeaveBalance) -> EngineResult<bool> {
        debug_assert!(balance.invariant_holds(), "ledger invariant violated");
        let mut inner = self.lock()?;
        if !inner.restored_requests.insert(request_id.to_string()) {
            return Ok(false);
        }
        inner
            .balances
            .insert((balance.employee_id.clone(), balance.leave_type), balance);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeStatus, EmploymentType, PartialDayType};
    use chrono::NaiveDate;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn create_test_employee(id: &str, department_id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            employment_type: EmploymentType::FullTime,
            hours_per_week: None,
            start_date: make_date("2023-06-01"),
            service_start_date: None,
            department_id: department_id.to_string(),
            entity_id: "entity_au".to_string(),
            state: None,
            status: EmployeeStatus::Active,
        }
    }

    fn create_test_request(id: &str, employee_id: &str) -> LeaveRequest {
        LeaveRequest {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            leave_type: LeaveType::Annual,
            start_date: make_date("2026-03-02"),
            end_date: make_date("2026-03-06"),
            partial_day_type: PartialDayType::Full,
            status: RequestStatus::Pending,
            chargeable_days: Decimal::new(5, 0),
            deducted_hours: None,
            manager_id: None,
            reason: None,
            cancellation_reason: None,
            decided_at: None,
        }
    }

    #[test]
    fn test_employee_round_trip() {
        let store = MemoryStore::new();
        store
            .upsert_employee(create_test_employee("emp_001", "dept_care"))
            .unwrap();
        assert_eq!(store.employee("emp_001").unwrap().id, "emp_001");
        assert!(matches!(
            store.employee("emp_404"),
            Err(EngineError::EmployeeNotFound { .. })
        ));
    }

    #[test]
    fn test_balance_keyed_by_employee_and_leave_type() {
        let store = MemoryStore::new();
        store
            .upsert_balance(LeaveBalance::zeroed("bal_1", "emp_001", LeaveType::Annual))
            .unwrap();
        store
            .upsert_balance(LeaveBalance::zeroed("bal_2", "emp_001", LeaveType::Sick))
            .unwrap();

        assert!(store.balance("emp_001", LeaveType::Annual).unwrap().is_some());
        assert!(store.balance("emp_001", LeaveType::Parental).unwrap().is_none());
        assert_eq!(store.balances_for_employee("emp_001").unwrap().len(), 2);
    }

    #[test]
    fn test_upsert_balance_replaces_not_duplicates() {
        let store = MemoryStore::new();
        let mut row = LeaveBalance::zeroed("bal_1", "emp_001", LeaveType::Annual);
        store.upsert_balance(row.clone()).unwrap();
        row.accrued_hours = Decimal::new(760, 1);
        row.available_hours = Decimal::new(760, 1);
        store.upsert_balance(row).unwrap();

        let rows = store.balances_for_employee("emp_001").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].accrued_hours, Decimal::new(760, 1));
    }

    #[test]
    fn test_transition_cas_succeeds_from_expected_status() {
        let store = MemoryStore::new();
        store
            .insert_request(create_test_request("req_001", "emp_001"))
            .unwrap();

        let updated = store
            .transition_request(
                "req_001",
                RequestStatus::Pending,
                RequestTransition::Approve {
                    decided_at: Utc::now(),
                    deducted_hours: Decimal::new(380, 1),
                },
            )
            .unwrap();

        assert_eq!(updated.status, RequestStatus::Approved);
        assert_eq!(updated.deducted_hours, Some(Decimal::new(380, 1)));
        assert!(updated.decided_at.is_some());
    }

    #[test]
    fn test_transition_cas_loses_on_status_mismatch() {
        let store = MemoryStore::new();
        store
            .insert_request(create_test_request("req_001", "emp_001"))
            .unwrap();

        store
            .transition_request(
                "req_001",
                RequestStatus::Pending,
                RequestTransition::Decline {
                    decided_at: Utc::now(),
                    reason: "over staffing cap".to_string(),
                },
            )
            .unwrap();

        let result = store.transition_request(
            "req_001",
            RequestStatus::Pending,
            RequestTransition::Approve {
                decided_at: Utc::now(),
                deducted_hours: Decimal::new(380, 1),
            },
        );

        match result {
            Err(EngineError::AlreadyDecided { status, .. }) => {
                assert_eq!(status, RequestStatus::Declined);
            }
            other => panic!("expected AlreadyDecided, got {other:?}"),
        }
    }

    #[test]
    fn test_revert_to_pending_clears_decision_fields() {
        let store = MemoryStore::new();
        store
            .insert_request(create_test_request("req_001", "emp_001"))
            .unwrap();
        store
            .transition_request(
                "req_001",
                RequestStatus::Pending,
                RequestTransition::Approve {
                    decided_at: Utc::now(),
                    deducted_hours: Decimal::new(380, 1),
                },
            )
            .unwrap();

        let reverted = store
            .transition_request(
                "req_001",
                RequestStatus::Approved,
                RequestTransition::RevertToPending,
            )
            .unwrap();

        assert_eq!(reverted.status, RequestStatus::Pending);
        assert_eq!(reverted.deducted_hours, None);
        assert_eq!(reverted.decided_at, None);
    }

    #[test]
    fn test_restore_balance_credits_at_most_once() {
        let store = MemoryStore::new();
        let mut row = LeaveBalance::zeroed("bal_1", "emp_001", LeaveType::Annual);
        row.accrued_hours = Decimal::new(76, 0);
        row.available_hours = Decimal::new(76, 0);

        assert!(store.restore_balance("req_001", row.clone()).unwrap());

        // A repeat for the same request id writes nothing
        let mut stale = row.clone();
        stale.available_hours = Decimal::ZERO;
        stale.adjusted_hours = Decimal::new(-76, 0);
        assert!(!store.restore_balance("req_001", stale).unwrap());
        let stored = store.balance("emp_001", LeaveType::Annual).unwrap().unwrap();
        assert_eq!(stored.available_hours, Decimal::new(76, 0));

        // A different request id still goes through
        assert!(store.restore_balance("req_002", row).unwrap());
    }

    #[test]
    fn test_requests_for_department_joins_employees() {
        let store = MemoryStore::new();
        store
            .upsert_employee(create_test_employee("emp_001", "dept_care"))
            .unwrap();
        store
            .upsert_employee(create_test_employee("emp_002", "dept_admin"))
            .unwrap();
        store
            .insert_request(create_test_request("req_001", "emp_001"))
            .unwrap();
        store
            .insert_request(create_test_request("req_002", "emp_002"))
            .unwrap();

        let care = store.requests_for_department("dept_care").unwrap();
        assert_eq!(care.len(), 1);
        assert_eq!(care[0].id, "req_001");
    }

    #[test]
    fn test_holidays_sorted_by_date() {
        let store = MemoryStore::new();
        for (id, date) in [("h2", "2026-12-25"), ("h1", "2026-01-26")] {
            store
                .upsert_holiday(PublicHoliday {
                    id: id.to_string(),
                    date: make_date(date),
                    name: id.to_string(),
                    entity_id: None,
                    state_region: None,
                    is_paid: true,
                    is_active: true,
                })
                .unwrap();
        }
        let holidays = store.holidays().unwrap();
        assert_eq!(holidays[0].id, "h1");
        assert_eq!(holidays[1].id, "h2");
    }
}

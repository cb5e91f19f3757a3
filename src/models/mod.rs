//! Core data models for the leave entitlement engine.
//!
//! This module contains all the domain entities used throughout the engine.

mod balance;
mod employee;
mod holiday;
mod policy;
mod request;

pub use balance::LeaveBalance;
pub use employee::{Employee, EmployeeStatus, EmploymentType};
pub use holiday::PublicHoliday;
pub use policy::{AccrualUnit, LeavePolicy, LeaveType};
pub use request::{LeaveRequest, PartialDayType, RequestStatus};

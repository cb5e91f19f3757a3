//! Request workflow: the approval state machine, staffing conflict
//! detection, and the bundled leave-context read.

mod approval;
mod conflict;
mod context;

pub use approval::{
    approve_leave_request, cancel_leave_request, decline_leave_request, submit_leave_request,
    LeaveSubmission,
};
pub use conflict::{check_staffing_conflict, StaffingConflict};
pub use context::{get_leave_context, LeaveCategoryContext, LeaveContext};

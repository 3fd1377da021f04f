pub mod holiday;
pub mod leave_selection;

pub mod calendar;
pub mod calendar_view;
pub mod holiday;
pub mod leave_request;
pub mod selection;

pub mod auth;
pub mod calendar;
pub mod dashboard_service;
pub mod export;
pub mod hours_service;
pub mod identity;
pub mod leave_service;
pub mod roster_service;
pub mod schedule_service;
pub mod support_service;

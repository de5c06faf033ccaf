pub mod auth;
pub mod dashboard;
pub mod hours;
pub mod leave;
pub mod schedule;
pub mod support;
pub mod worker;

pub mod manager_repo;
pub use manager_repo::ManagerRepository;
pub mod worker_repo;
pub use worker_repo::WorkerRepository;
pub mod shift_repo;
pub use shift_repo::ShiftRepository;
pub mod leave_repo;
pub use leave_repo::LeaveRepository;
pub mod message_repo;
pub use message_repo::MessageRepository;
pub mod hours_repo;
pub use hours_repo::HoursRepository;

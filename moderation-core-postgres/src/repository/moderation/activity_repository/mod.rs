pub mod create;
pub mod load_recent;
pub mod repo_impl;

pub use repo_impl::StaffActivityRepositoryImpl;

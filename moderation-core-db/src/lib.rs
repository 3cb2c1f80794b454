pub mod engine;
pub mod models;
pub mod repository;
pub mod service;
pub mod utils;

pub use engine::escalation::EscalationEngine;
pub use service::moderation_service::ModerationService;

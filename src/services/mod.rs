pub mod ai_service;
pub mod quiz_service;
pub mod topic_service;
pub mod user_service;

pub mod question;
pub mod quiz;
pub mod topic;
pub mod user;

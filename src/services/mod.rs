pub mod activities;
pub mod assistant;
pub mod auth;
pub mod babies;
pub mod forum;
pub mod insights;
pub mod logs;
pub mod marketplace;
pub mod media;
pub mod metrics;
pub mod milestones;

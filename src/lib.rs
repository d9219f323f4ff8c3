// Study advisor service library
// Exposes modules for use in tests and the server binary

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

// AppState is defined here to be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub advisor: services::StudyAdvisorService,
}

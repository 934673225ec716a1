//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{CandidateService, SkillService};
use crate::domain::repositories::Persistence;

#[derive(Clone)]
pub struct AppState {
    pub candidate_service: Arc<CandidateService>,
    pub skill_service: Arc<SkillService>,
    pub persistence: Arc<dyn Persistence>,
}

impl AppState {
    /// Wires both services to the same persistence backend.
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self {
            candidate_service: Arc::new(CandidateService::new(persistence.clone())),
            skill_service: Arc::new(SkillService::new(persistence.clone())),
            persistence,
        }
    }
}

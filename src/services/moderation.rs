// src/services/moderation.rs
// DOCUMENTATION: Moderation rules for user-submitted content
// PURPOSE: Status transitions, edit permissions, dashboard counts

use crate::errors::SiteError;
use crate::models::{CurrentUser, Event, Landmark, ModerationStatus};
use serde::Serialize;

/// Admin actions that move a record between pending and published
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Unpublish,
}

impl ModerationAction {
    pub fn target_status(self) -> ModerationStatus {
        match self {
            ModerationAction::Approve => ModerationStatus::Published,
            ModerationAction::Unpublish => ModerationStatus::Pending,
        }
    }
}

/// Status after an edit: non-admin edits to published content go back for review
pub fn status_after_edit(current: ModerationStatus, editor_is_admin: bool) -> ModerationStatus {
    if editor_is_admin {
        current
    } else {
        ModerationStatus::Pending
    }
}

/// Admins may edit any event, other users only their own
pub fn can_edit_event(user: &CurrentUser, event: &Event) -> bool {
    user.is_admin() || event.owner_id == Some(user.id())
}

pub fn ensure_can_edit_event(user: &CurrentUser, event: &Event) -> Result<(), SiteError> {
    if can_edit_event(user, event) {
        Ok(())
    } else {
        log::warn!("User {} tried to modify event {} they do not own", user.id(), event.id);
        Err(SiteError::Forbidden(
            "You do not have permission to edit this event".to_string(),
        ))
    }
}

/// Counters shown at the top of the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub pending_events: usize,
    pub published_events: usize,
    pub total_events: usize,
    pub published_landmarks: usize,
}

impl DashboardStats {
    pub fn compute(events: &[Event], landmarks: &[Landmark]) -> Self {
        let published_events = events.iter().filter(|e| e.is_published()).count();
        Self {
            pending_events: events.len() - published_events,
            published_events,
            total_events: events.len(),
            published_landmarks: landmarks.iter().filter(|l| l.is_published()).count(),
        }
    }
}

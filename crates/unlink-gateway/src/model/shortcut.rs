use crate::error::AppError;
use serde::{Deserialize, Serialize};
use unlink_core::{CreateParams, DeleteParams, Shortcut, StatisticsView, UpdateParams, Visit};

#[derive(Deserialize)]
pub struct CreateShortcutRequest {
    pub shortcut: String,
    pub target_url: String,
    pub owner: String,
}

impl TryFrom<CreateShortcutRequest> for CreateParams {
    type Error = AppError;

    fn try_from(request: CreateShortcutRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            shortcut: Shortcut::new(request.shortcut)?,
            target_url: request.target_url,
            owner: request.owner,
        })
    }
}

#[derive(Deserialize)]
pub struct UpdateShortcutRequest {
    pub shortcut: String,
    pub target_url: String,
    pub owner: String,
}

impl TryFrom<UpdateShortcutRequest> for UpdateParams {
    type Error = AppError;

    fn try_from(request: UpdateShortcutRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            shortcut: Shortcut::new(request.shortcut)?,
            target_url: request.target_url,
            owner: request.owner,
        })
    }
}

#[derive(Deserialize)]
pub struct DeleteShortcutRequest {
    pub shortcut: String,
    pub owner: String,
}

impl TryFrom<DeleteShortcutRequest> for DeleteParams {
    type Error = AppError;

    fn try_from(request: DeleteShortcutRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            shortcut: Shortcut::new(request.shortcut)?,
            owner: request.owner,
        })
    }
}

#[derive(Deserialize)]
pub struct StatisticsQuery {
    pub owner: String,
}

#[derive(Serialize)]
pub struct VisitEntry {
    pub ip: String,
    pub visited_at: String,
}

impl From<Visit> for VisitEntry {
    fn from(visit: Visit) -> Self {
        Self {
            ip: visit.ip.to_string(),
            visited_at: visit.at.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct StatisticsResponse {
    pub shortcut: String,
    pub target_url: String,
    pub owner: String,
    pub visitors: Vec<VisitEntry>,
}

impl From<StatisticsView> for StatisticsResponse {
    fn from(view: StatisticsView) -> Self {
        Self {
            shortcut: view.shortcut.to_string(),
            target_url: view.target_url,
            owner: view.owner,
            visitors: view.visitors.into_iter().map(VisitEntry::from).collect(),
        }
    }
}

mod health;
mod shortcut;

pub use health::HealthResponse;
pub use shortcut::{
    CreateShortcutRequest, DeleteShortcutRequest, StatisticsQuery, StatisticsResponse,
    UpdateShortcutRequest, VisitEntry,
};

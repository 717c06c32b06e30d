mod health;
mod shortcut;

pub use health::health_handler;
pub use shortcut::{
    create_handler, delete_handler, expand_handler, statistics_handler, update_handler,
};

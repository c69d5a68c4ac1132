//! Record shapes persisted by the host application.
//!
//! Timestamps accept any RFC 3339 string, which covers values the host wrote out as
//! JavaScript `Date` strings.

mod app_state;
mod command;
mod plugin;

pub use app_state::{AppStateRecord, ChangedBy, SettingHistoryRecord};
pub use command::{CommandRecord, CommandSource, CommandStatus, CommandType};
pub use plugin::{
    PluginDependencyRecord, PluginRecord, PluginSource, PluginStateRecord, PluginStatus,
    PluginType,
};

//! Named settings and their defaults.

use super::Settings;
use serde::Serialize;

/// Dotted key of every recognized setting.
pub mod keys {
    pub const SQL_ENABLED: &str = "sql.enabled";
    pub const SQL_HOSTNAME: &str = "sql.hostname";
    pub const SQL_USERNAME: &str = "sql.username";
    pub const SQL_PASSWORD: &str = "sql.password";
    pub const SQL_DATABASE: &str = "sql.database";
    pub const SQL_TABLE_PREFIX: &str = "sql.table prefix";
    pub const SQL_SERVER_NAME: &str = "sql.server name";
    pub const SQL_USE_SSL: &str = "sql.usessl";

    pub const INTERVAL_CHECK: &str = "interval check";
    pub const LEADERBOARD_LENGTH: &str = "leaderboard length";
    pub const LEADERBOARD_LAYOUT: &str = "leaderboard layout";
    pub const CHECK_COMMAND_LAYOUT: &str = "check command layout";
    pub const HELP_BASED_ON_PERMISSION: &str = "show help command based on permission";
    pub const CHECK_FOR_NEW_VERSIONS: &str = "auto-updater.check-for-new-versions";
    pub const BROADCAST_DATA_RESET: &str = "broadcast resetting of data files";
    pub const DISABLE_AUTOMATIC_PATH_CHECKING: &str = "disable automatic path checking";
    pub const PRIMARY_GROUP_ONLY: &str = "use primary group for vault";
    pub const SHOW_WARNINGS: &str = "show warnings";
    pub const ADVANCED_DEPENDENCY_OUTPUT: &str = "advanced dependency output";
    pub const AFK_INTEGRATION: &str = "afk integration";
    pub const USE_DEBUG: &str = "use debug";
    pub const GLOBAL_TIME_IN_LEADERBOARD: &str = "use global time in leaderboard";
    pub const ARCHIVE_OLD_DATA: &str = "automatically archive old data";
    pub const PRIMARY_STORAGE_PROVIDER: &str = "primary storage provider";
    pub const REMOVE_BACKUPS_OLDER_THAN: &str = "automatically remove backups if older than";
    pub const AUTO_UPDATE_FILE: &str = "automatically update this file with new options";
    pub const ENABLE_LOGGING: &str = "enable logging";
    pub const DETAILED_SINGLE_PATH: &str = "show detailed path when only one active path";
}

const DEFAULT_LEADERBOARD_LAYOUT: &str = "&6&r | &b&p - &7&d day(s), &h hour(s) and &m minute(s).";
const DEFAULT_CHECK_COMMAND_LAYOUT: &str =
    "&p has played for &time and is on path '&path'. Requirements to be ranked up: &reqs";

/// Connection settings for the optional external database.
///
/// `server_name` is returned as written; substituting server details into
/// it is up to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SqlSettings {
    pub enabled: bool,
    pub hostname: String,
    pub username: String,
    pub password: String,
    pub database: String,
    pub table_prefix: String,
    pub server_name: String,
    pub use_ssl: bool,
}

impl Settings {
    pub fn sql(&self) -> SqlSettings {
        SqlSettings {
            enabled: self.get_bool(keys::SQL_ENABLED, false),
            hostname: self.get_str(keys::SQL_HOSTNAME, ""),
            username: self.get_str(keys::SQL_USERNAME, ""),
            password: self.get_str(keys::SQL_PASSWORD, ""),
            database: self.get_str(keys::SQL_DATABASE, ""),
            table_prefix: self.get_str(keys::SQL_TABLE_PREFIX, ""),
            server_name: self.get_str(keys::SQL_SERVER_NAME, ""),
            use_ssl: self.get_bool(keys::SQL_USE_SSL, false),
        }
    }

    pub fn use_sql(&self) -> bool {
        self.get_bool(keys::SQL_ENABLED, false)
    }

    /// Minutes between two periodic checks.
    pub fn interval_minutes(&self) -> i64 {
        self.get_int(keys::INTERVAL_CHECK, 5)
    }

    /// Number of entries shown on a leaderboard.
    pub fn leaderboard_length(&self) -> i64 {
        self.get_int(keys::LEADERBOARD_LENGTH, 10)
    }

    pub fn leaderboard_layout(&self) -> String {
        self.get_str(keys::LEADERBOARD_LAYOUT, DEFAULT_LEADERBOARD_LAYOUT)
    }

    pub fn check_command_layout(&self) -> String {
        self.get_str(keys::CHECK_COMMAND_LAYOUT, DEFAULT_CHECK_COMMAND_LAYOUT)
    }

    /// Only list commands the caller has permission for on help pages.
    pub fn help_based_on_permission(&self) -> bool {
        self.get_bool(keys::HELP_BASED_ON_PERMISSION, false)
    }

    pub fn check_for_new_versions(&self) -> bool {
        self.get_bool(keys::CHECK_FOR_NEW_VERSIONS, true)
    }

    pub fn broadcast_data_reset(&self) -> bool {
        self.get_bool(keys::BROADCAST_DATA_RESET, true)
    }

    pub fn automatic_path_checking_disabled(&self) -> bool {
        self.get_bool(keys::DISABLE_AUTOMATIC_PATH_CHECKING, false)
    }

    pub fn primary_group_only(&self) -> bool {
        self.get_bool(keys::PRIMARY_GROUP_ONLY, true)
    }

    pub fn show_warnings(&self) -> bool {
        self.get_bool(keys::SHOW_WARNINGS, true)
    }

    pub fn advanced_dependency_output(&self) -> bool {
        self.get_bool(keys::ADVANCED_DEPENDENCY_OUTPUT, false)
    }

    pub fn afk_integration(&self) -> bool {
        self.get_bool(keys::AFK_INTEGRATION, true)
    }

    pub fn use_debug(&self) -> bool {
        self.get_bool(keys::USE_DEBUG, false)
    }

    pub fn global_time_in_leaderboard(&self) -> bool {
        self.get_bool(keys::GLOBAL_TIME_IN_LEADERBOARD, false)
    }

    pub fn archive_old_data(&self) -> bool {
        self.get_bool(keys::ARCHIVE_OLD_DATA, true)
    }

    pub fn primary_storage_provider(&self) -> String {
        self.get_str(keys::PRIMARY_STORAGE_PROVIDER, "flatfile")
    }

    /// Backups older than this many days are removed.
    pub fn backup_retention_days(&self) -> i64 {
        self.get_int(keys::REMOVE_BACKUPS_OLDER_THAN, 14)
    }

    /// Whether the file may be reconciled against its template at startup.
    pub fn auto_update_file(&self) -> bool {
        self.get_bool(keys::AUTO_UPDATE_FILE, true)
    }

    pub fn logging_enabled(&self) -> bool {
        self.get_bool(keys::ENABLE_LOGGING, true)
    }

    pub fn detailed_single_path(&self) -> bool {
        self.get_bool(keys::DETAILED_SINGLE_PATH, false)
    }
}

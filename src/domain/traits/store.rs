use async_trait::async_trait;

/// Per-group moderation settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSettings {
    pub bad_react_filter: bool,
}

/// Keyed store of group settings.
///
/// An entry is created with defaults the first time a group is referenced
/// and lives until the process exits; nothing resets it implicitly.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Settings for `group_id`, creating the default entry if missing
    async fn group(&self, group_id: &str) -> GroupSettings;

    /// Turn the bad-reaction filter of `group_id` on or off (creating the
    /// entry if missing) and return the new settings
    async fn set_bad_react_filter(&self, group_id: &str, enabled: bool) -> GroupSettings;

    /// Ids of every group referenced so far
    async fn groups(&self) -> Vec<String>;
}

//! In-memory settings storage

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::traits::{GroupSettings, SettingsStore};

/// Process-lifetime group settings keyed by group JID
#[derive(Clone, Default)]
pub struct MemoryStore {
    groups: Arc<RwLock<HashMap<String, GroupSettings>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn group(&self, group_id: &str) -> GroupSettings {
        if let Some(settings) = self.groups.read().await.get(group_id) {
            return settings.clone();
        }
        let mut groups = self.groups.write().await;
        groups.entry(group_id.to_string()).or_default().clone()
    }

    async fn set_bad_react_filter(&self, group_id: &str, enabled: bool) -> GroupSettings {
        let mut groups = self.groups.write().await;
        let settings = groups.entry(group_id.to_string()).or_default();
        settings.bad_react_filter = enabled;
        settings.clone()
    }

    async fn groups(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.groups.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}

//! Admin allow-list.
//!
//! Sender ids are compared as trimmed strings. What an empty list means is
//! decided by [`AdminPolicy`]: `OpenIfEmpty` treats every sender as an admin.

use std::collections::HashSet;

use crate::domain::config::AdminConfig;
use crate::domain::types::AdminPolicy;

#[derive(Debug, Clone, Default)]
pub struct AdminList {
    ids: HashSet<String>,
    policy: AdminPolicy,
}

impl AdminList {
    pub fn new<I, S>(ids: I, policy: AdminPolicy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ids: ids
                .into_iter()
                .map(|id| id.as_ref().trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
            policy,
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(&config.ids, config.policy)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn policy(&self) -> AdminPolicy {
        self.policy
    }

    pub fn is_admin(&self, sender_id: Option<&str>) -> bool {
        if self.ids.is_empty() {
            return self.policy == AdminPolicy::OpenIfEmpty;
        }
        sender_id.is_some_and(|id| self.ids.contains(id.trim()))
    }
}

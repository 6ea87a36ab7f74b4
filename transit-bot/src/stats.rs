use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

/// Process-lifetime counters. Never persisted or reset.
#[derive(Debug, Default)]
struct Stats {
    commands_processed: u64,
    users_served: HashSet<u64>,
}

/// Point-in-time copy for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub commands_processed: u64,
    pub users_count: usize,
}

/// Stats context shared across gateway handlers. The dispatcher may run
/// handlers concurrently, so updates go through a mutex.
#[derive(Debug, Clone, Default)]
pub struct SharedStats(Arc<Mutex<Stats>>);

impl SharedStats {
    /// Count one inbound command from `user`.
    pub fn record_command(&self, user: Option<u64>) {
        let mut stats = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        stats.commands_processed += 1;
        if let Some(user) = user {
            stats.users_served.insert(user);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let stats = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        StatsSnapshot {
            commands_processed: stats.commands_processed,
            users_count: stats.users_served.len(),
        }
    }
}

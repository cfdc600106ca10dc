use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::backend::{Endpoint, Freshness, RepositoryRecord};
use crate::poller::PollEvent;
use crate::view::{self, Filters, Totals};

/// Which signal clears `waiting_for_update`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WaitingMode {
    /// `/db/updating` is polled and its answer is taken as-is.
    #[default]
    UpdatingPoll,
    /// No updating poll; a strictly newer `/db/updated` value clears the flag.
    Timestamp,
}

#[derive(Debug, Default, Clone)]
pub struct EndpointHealth {
    pub consecutive_failures: u32,
    pub last_error: Option<String>,
    pub last_success: Option<Instant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connection {
    Connecting,
    Online,
    Offline { failures: u32, message: String },
    Stale { since: Duration },
}

#[derive(Debug)]
pub struct Dashboard {
    repos: Vec<RepositoryRecord>,
    filters: Filters,
    last_updated: Option<Freshness>,
    waiting_for_update: bool,
    loaded: bool,
    waiting_mode: WaitingMode,
    stale_after: Duration,
    health: HashMap<Endpoint, EndpointHealth>,
}

impl Dashboard {
    pub fn new(filters: Filters, waiting_mode: WaitingMode, stale_after: Duration) -> Self {
        Self {
            repos: vec![RepositoryRecord::placeholder()],
            filters,
            last_updated: None,
            waiting_for_update: false,
            loaded: false,
            waiting_mode,
            stale_after,
            health: HashMap::new(),
        }
    }

    pub fn repos(&self) -> &[RepositoryRecord] {
        &self.repos
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut Filters {
        &mut self.filters
    }

    pub fn last_updated(&self) -> Option<&Freshness> {
        self.last_updated.as_ref()
    }

    pub fn waiting_for_update(&self) -> bool {
        self.waiting_for_update
    }

    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn filtered_rows(&self) -> Vec<&RepositoryRecord> {
        view::filtered_rows(&self.repos, &self.filters)
    }

    pub fn totals(&self) -> Totals {
        view::totals(&self.filtered_rows())
    }

    pub fn health(&self, endpoint: Endpoint) -> Option<&EndpointHealth> {
        self.health.get(&endpoint)
    }

    pub fn apply(&mut self, event: PollEvent) {
        match event {
            PollEvent::ReposFetched(repos) => self.set_repos(repos),
            PollEvent::LastUpdatedFetched(value) => self.set_last_updated(value),
            PollEvent::UpdatingFetched(updating) => self.set_updating(updating),
            PollEvent::UpdateTriggered => self.record_success(Endpoint::TriggerUpdate),
            PollEvent::FetchFailed { endpoint, message } => self.record_failure(endpoint, message),
        }
    }

    pub fn set_repos(&mut self, repos: Vec<RepositoryRecord>) {
        tracing::debug!(count = repos.len(), "repository list replaced");
        self.repos = repos;
        self.loaded = true;
        self.record_success(Endpoint::Repos);
    }

    /// Stores `value` only when it is strictly newer than what we have.
    pub fn set_last_updated(&mut self, value: Freshness) {
        self.record_success(Endpoint::LastUpdated);
        if !value.is_newer_than(self.last_updated.as_ref()) {
            tracing::debug!(
                incoming = %value,
                current = ?self.last_updated,
                "last updated value is not newer, keeping current"
            );
            return;
        }
        if self.waiting_mode == WaitingMode::Timestamp {
            self.waiting_for_update = false;
        }
        self.last_updated = Some(value);
    }

    pub fn set_updating(&mut self, updating: bool) {
        self.record_success(Endpoint::Updating);
        if self.waiting_mode != WaitingMode::UpdatingPoll {
            return;
        }
        self.waiting_for_update = updating;
    }

    /// Marks the dashboard as waiting before the update request is sent.
    pub fn begin_backend_update(&mut self) {
        self.waiting_for_update = true;
    }

    pub fn record_success(&mut self, endpoint: Endpoint) {
        let health = self.health.entry(endpoint).or_default();
        health.consecutive_failures = 0;
        health.last_error = None;
        health.last_success = Some(Instant::now());
    }

    pub fn record_failure(&mut self, endpoint: Endpoint, message: String) {
        tracing::warn!(endpoint = endpoint.path(), error = %message, "backend request failed");
        let health = self.health.entry(endpoint).or_default();
        health.consecutive_failures = health.consecutive_failures.saturating_add(1);
        health.last_error = Some(message);
    }

    pub fn connection(&self, now: Instant) -> Connection {
        let Some(health) = self.health.get(&Endpoint::Repos) else {
            return Connection::Connecting;
        };
        if health.consecutive_failures > 0 {
            return Connection::Offline {
                failures: health.consecutive_failures,
                message: health.last_error.clone().unwrap_or_default(),
            };
        }
        match health.last_success {
            Some(at) if now.saturating_duration_since(at) > self.stale_after => Connection::Stale {
                since: now.saturating_duration_since(at),
            },
            Some(_) => Connection::Online,
            None => Connection::Connecting,
        }
    }
}

#[cfg(test)]
mod tests;

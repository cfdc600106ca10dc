use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::backend::{BackendClient, Endpoint, Freshness, RepositoryRecord};

#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn list_repos(&self) -> Result<Vec<RepositoryRecord>>;
    async fn last_updated(&self) -> Result<Freshness>;
    async fn updating(&self) -> Result<bool>;
    async fn trigger_update(&self) -> Result<()>;
}

#[async_trait]
impl DashboardApi for BackendClient {
    async fn list_repos(&self) -> Result<Vec<RepositoryRecord>> {
        self.list_repos().await
    }

    async fn last_updated(&self) -> Result<Freshness> {
        self.last_updated().await
    }

    async fn updating(&self) -> Result<bool> {
        self.updating().await
    }

    async fn trigger_update(&self) -> Result<()> {
        self.trigger_update().await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    ReposFetched(Vec<RepositoryRecord>),
    LastUpdatedFetched(Freshness),
    UpdatingFetched(bool),
    UpdateTriggered,
    FetchFailed { endpoint: Endpoint, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    pub repos: Duration,
    pub last_updated: Duration,
    /// `None` disables the `/db/updating` poll.
    pub updating: Option<Duration>,
}

/// Owns the recurring fetch tasks. Every task reports through `events`; the
/// receiving side applies results on a single thread.
pub struct Poller {
    handle: Handle,
    api: Arc<dyn DashboardApi>,
    events: Sender<PollEvent>,
    tasks: Vec<JoinHandle<()>>,
}

impl Poller {
    /// Starts one task per interval. Each fires immediately, then on its period.
    pub fn start(
        handle: Handle,
        api: Arc<dyn DashboardApi>,
        intervals: PollIntervals,
        events: Sender<PollEvent>,
    ) -> Self {
        let mut poller = Self {
            handle,
            api,
            events,
            tasks: Vec::new(),
        };
        poller.spawn_loop(Endpoint::Repos, intervals.repos);
        poller.spawn_loop(Endpoint::LastUpdated, intervals.last_updated);
        if let Some(period) = intervals.updating {
            poller.spawn_loop(Endpoint::Updating, period);
        }
        tracing::info!(tasks = poller.tasks.len(), ?intervals, "poller started");
        poller
    }

    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|task| !task.is_finished())
    }

    /// Fire-and-forget request to `/repos/update`.
    pub fn trigger_update(&mut self) {
        self.spawn_once(Endpoint::TriggerUpdate);
    }

    /// One-off fetch of the list and freshness value outside the timers.
    pub fn refresh_now(&mut self) {
        self.spawn_once(Endpoint::Repos);
        self.spawn_once(Endpoint::LastUpdated);
    }

    pub fn shutdown(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        for task in self.tasks.drain(..) {
            task.abort();
        }
        tracing::info!("poller stopped");
    }

    fn spawn_loop(&mut self, endpoint: Endpoint, period: Duration) {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let task = self.handle.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let event = fetch(api.as_ref(), endpoint).await;
                if events.send(event).is_err() {
                    tracing::debug!(endpoint = endpoint.path(), "event receiver gone, stopping poll");
                    break;
                }
            }
        });
        self.tasks.push(task);
    }

    fn spawn_once(&mut self, endpoint: Endpoint) {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let task = self.handle.spawn(async move {
            let event = fetch(api.as_ref(), endpoint).await;
            if events.send(event).is_err() {
                tracing::debug!(endpoint = endpoint.path(), "event receiver gone, dropping result");
            }
        });
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.push(task);
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

pub async fn fetch(api: &dyn DashboardApi, endpoint: Endpoint) -> PollEvent {
    let result = match endpoint {
        Endpoint::Repos => api.list_repos().await.map(PollEvent::ReposFetched),
        Endpoint::LastUpdated => api.last_updated().await.map(PollEvent::LastUpdatedFetched),
        Endpoint::Updating => api.updating().await.map(PollEvent::UpdatingFetched),
        Endpoint::TriggerUpdate => api.trigger_update().await.map(|()| PollEvent::UpdateTriggered),
    };
    match result {
        Ok(event) => {
            tracing::debug!(endpoint = endpoint.path(), "fetch succeeded");
            event
        }
        Err(error) => PollEvent::FetchFailed {
            endpoint,
            message: format!("{:#}", error),
        },
    }
}

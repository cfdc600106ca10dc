use std::time::{Duration, Instant};

use super::{Connection, Dashboard, WaitingMode};
use crate::backend::{Endpoint, Freshness, PLACEHOLDER_NAME, RepositoryRecord};
use crate::poller::PollEvent;
use crate::view::Filters;

const STALE_AFTER: Duration = Duration::from_secs(15);

fn dashboard(mode: WaitingMode) -> Dashboard {
    let filters = Filters {
        require_open_issues: false,
        ..Filters::default()
    };
    Dashboard::new(filters, mode, STALE_AFTER)
}

fn repo(full_name: &str, issues: u64) -> RepositoryRecord {
    let mut record = RepositoryRecord::new(full_name);
    record.open_issues = issues;
    record
}

#[test]
fn starts_with_loading_placeholder() {
    let dashboard = dashboard(WaitingMode::UpdatingPoll);
    assert_eq!(dashboard.repos().len(), 1);
    assert_eq!(dashboard.repos()[0].full_name, PLACEHOLDER_NAME);
    assert!(!dashboard.loaded());
    assert!(dashboard.last_updated().is_none());
    assert!(!dashboard.waiting_for_update());
}

#[test]
fn issues_filter_hides_placeholder_until_first_fetch() {
    let default_filters = Dashboard::new(Filters::default(), WaitingMode::UpdatingPoll, STALE_AFTER);
    assert_eq!(default_filters.repos()[0].open_issues, 0);
    assert!(default_filters.filtered_rows().is_empty());
    assert_eq!(default_filters.totals().repos, 0);

    let unfiltered = dashboard(WaitingMode::UpdatingPoll);
    let rows = unfiltered.filtered_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].full_name, PLACEHOLDER_NAME);
}

#[test]
fn fetched_repos_replace_list_wholesale() {
    let mut dashboard = dashboard(WaitingMode::UpdatingPoll);
    dashboard.apply(PollEvent::ReposFetched(vec![repo("a/one", 1), repo("a/two", 2)]));
    dashboard.apply(PollEvent::ReposFetched(vec![repo("a/two", 5)]));

    assert!(dashboard.loaded());
    assert_eq!(dashboard.repos().len(), 1);
    assert_eq!(dashboard.repos()[0].full_name, "a/two");
    assert_eq!(dashboard.totals().open_issues, 5);
}

#[test]
fn failed_fetch_keeps_previous_repos() {
    let mut dashboard = dashboard(WaitingMode::UpdatingPoll);
    dashboard.apply(PollEvent::ReposFetched(vec![repo("a/one", 1)]));
    dashboard.apply(PollEvent::FetchFailed {
        endpoint: Endpoint::Repos,
        message: "connection refused".to_string(),
    });

    assert_eq!(dashboard.repos().len(), 1);
    assert_eq!(dashboard.repos()[0].full_name, "a/one");
    assert_eq!(
        dashboard.connection(Instant::now()),
        Connection::Offline {
            failures: 1,
            message: "connection refused".to_string(),
        }
    );
}

#[test]
fn last_updated_only_moves_forward() {
    let mut dashboard = dashboard(WaitingMode::UpdatingPoll);
    dashboard.apply(PollEvent::LastUpdatedFetched(Freshness::Integer(100)));
    dashboard.apply(PollEvent::LastUpdatedFetched(Freshness::Integer(90)));
    assert_eq!(dashboard.last_updated(), Some(&Freshness::Integer(100)));

    dashboard.apply(PollEvent::LastUpdatedFetched(Freshness::Integer(100)));
    assert_eq!(dashboard.last_updated(), Some(&Freshness::Integer(100)));

    dashboard.apply(PollEvent::LastUpdatedFetched(Freshness::Integer(101)));
    assert_eq!(dashboard.last_updated(), Some(&Freshness::Integer(101)));
}

#[test]
fn begin_backend_update_sets_waiting_immediately() {
    let mut dashboard = dashboard(WaitingMode::UpdatingPoll);
    dashboard.begin_backend_update();
    assert!(dashboard.waiting_for_update());

    dashboard.apply(PollEvent::FetchFailed {
        endpoint: Endpoint::TriggerUpdate,
        message: "timeout".to_string(),
    });
    assert!(dashboard.waiting_for_update());
}

#[test]
fn updating_poll_overwrites_waiting_flag() {
    let mut dashboard = dashboard(WaitingMode::UpdatingPoll);
    dashboard.begin_backend_update();
    dashboard.apply(PollEvent::LastUpdatedFetched(Freshness::Integer(50)));
    assert!(dashboard.waiting_for_update());

    dashboard.apply(PollEvent::UpdatingFetched(false));
    assert!(!dashboard.waiting_for_update());

    dashboard.apply(PollEvent::UpdatingFetched(true));
    assert!(dashboard.waiting_for_update());
}

#[test]
fn timestamp_mode_clears_waiting_on_newer_value() {
    let mut dashboard = dashboard(WaitingMode::Timestamp);
    dashboard.apply(PollEvent::LastUpdatedFetched(Freshness::Integer(10)));
    dashboard.begin_backend_update();

    dashboard.apply(PollEvent::LastUpdatedFetched(Freshness::Integer(10)));
    assert!(dashboard.waiting_for_update());

    dashboard.apply(PollEvent::UpdatingFetched(false));
    assert!(dashboard.waiting_for_update());

    dashboard.apply(PollEvent::LastUpdatedFetched(Freshness::Integer(11)));
    assert!(!dashboard.waiting_for_update());
}

#[test]
fn connection_reports_connecting_then_online() {
    let mut dashboard = dashboard(WaitingMode::UpdatingPoll);
    assert_eq!(dashboard.connection(Instant::now()), Connection::Connecting);

    dashboard.apply(PollEvent::ReposFetched(Vec::new()));
    assert_eq!(dashboard.connection(Instant::now()), Connection::Online);
}

#[test]
fn connection_goes_stale_without_recent_success() {
    let mut dashboard = dashboard(WaitingMode::UpdatingPoll);
    dashboard.apply(PollEvent::ReposFetched(Vec::new()));

    let later = Instant::now() + STALE_AFTER + Duration::from_secs(1);
    assert!(matches!(dashboard.connection(later), Connection::Stale { .. }));
}

#[test]
fn success_resets_failure_count() {
    let mut dashboard = dashboard(WaitingMode::UpdatingPoll);
    for _ in 0..3 {
        dashboard.apply(PollEvent::FetchFailed {
            endpoint: Endpoint::Repos,
            message: "boom".to_string(),
        });
    }
    assert_eq!(
        dashboard
            .health(Endpoint::Repos)
            .map(|health| health.consecutive_failures),
        Some(3)
    );

    dashboard.apply(PollEvent::ReposFetched(vec![repo("a/one", 0)]));
    let health = dashboard.health(Endpoint::Repos).expect("health");
    assert_eq!(health.consecutive_failures, 0);
    assert!(health.last_error.is_none());
}

#[test]
fn totals_follow_filter_changes() {
    let mut dashboard = dashboard(WaitingMode::UpdatingPoll);
    dashboard.apply(PollEvent::ReposFetched(vec![repo("a/one", 0), repo("b/two", 4)]));
    assert_eq!(dashboard.totals().repos, 2);

    dashboard.filters_mut().require_open_issues = true;
    assert_eq!(dashboard.totals().repos, 1);
    assert_eq!(dashboard.totals().open_issues, 4);

    dashboard.filters_mut().filter_text = "A/".to_string();
    assert_eq!(dashboard.totals().repos, 0);
}

//! Notifications screen workflow tests

use std::sync::Arc;

use assert_matches::assert_matches;
use univote::models::notification::{NotificationFilter, NotificationKind};
use univote::utils::errors::NavigationError;
use univote::utils::helpers::format_relative_time;
use univote::{Screen, UniVoteError};

use crate::helpers::FailingNotificationService;
use crate::integration::setup_integration_test;

#[tokio::test]
async fn test_mark_selected_read_clears_selection_and_unread() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;
    assert_eq!(client.dashboard().await.unwrap().unread_notifications, 1);

    client.navigate(Screen::Notifications, None).unwrap();
    assert!(client.notifications_view_mut().unwrap().toggle("1"));

    let sent = client.mark_selected_read().await.unwrap();

    assert_eq!(sent, 1);
    assert!(client.notifications_view().unwrap().selected().is_empty());
    assert_eq!(ctx.notifications.unread_count().await, 0);
    assert_eq!(client.dashboard().await.unwrap().unread_notifications, 0);
}

#[tokio::test]
async fn test_filters_apply_to_feed() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;
    client.navigate(Screen::Notifications, None).unwrap();

    assert_eq!(client.notifications().await.unwrap().len(), 3);

    client
        .notifications_view_mut()
        .unwrap()
        .set_filter(NotificationFilter::Unread);
    let unread = client.notifications().await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].id, "1");

    client
        .notifications_view_mut()
        .unwrap()
        .set_filter("election".parse().unwrap());
    let elections = client.notifications().await.unwrap();
    assert_eq!(elections.len(), 2);
    assert!(elections.iter().all(|n| n.kind == NotificationKind::Election));
}

#[tokio::test]
async fn test_feed_timestamps_format_relative_to_now() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("student1").await;
    client.navigate(Screen::Notifications, None).unwrap();

    let now = client.now();
    let labels: Vec<String> = client
        .notifications()
        .await
        .unwrap()
        .iter()
        .map(|n| format_relative_time(n.timestamp, now))
        .collect();

    assert_eq!(labels, vec!["2h ago", "20h ago", "Feb 22, 12:00 PM"]);
}

#[tokio::test]
async fn test_empty_selection_sends_nothing() {
    let ctx = setup_integration_test();
    let mut client = ctx.signed_in("admin1").await;
    client.navigate(Screen::Notifications, None).unwrap();

    assert_eq!(client.mark_selected_read().await.unwrap(), 0);
    assert_eq!(ctx.notifications.unread_count().await, 1);

    client.go_home().unwrap();
    assert_matches!(
        client.notifications().await,
        Err(UniVoteError::Navigation(NavigationError::NotOnScreen { .. }))
    );
}

#[tokio::test]
async fn test_failed_mark_read_keeps_selection_and_shows_banner() {
    let ctx = setup_integration_test();
    let mut client = ctx.client_with_notifications(Arc::new(FailingNotificationService));
    client.login("student1", "password").await.unwrap();
    client.navigate(Screen::Notifications, None).unwrap();

    let view = client.notifications_view_mut().unwrap();
    view.toggle("1");
    view.toggle("3");

    let result = client.mark_selected_read().await;

    assert_matches!(result, Err(UniVoteError::Service(_)));
    let view = client.notifications_view().unwrap();
    assert!(view.is_selected("1"));
    assert!(view.is_selected("3"));
    assert_eq!(view.selected().len(), 2);

    let banner = client.banner().unwrap();
    assert_eq!(banner.screen, Screen::Notifications);
    assert_eq!(banner.message, "Something went wrong. Please try again.");
}

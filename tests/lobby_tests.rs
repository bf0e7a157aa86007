// Entry page actions: join / create with the in-flight guard

mod common;

use common::{MockRoomCreator, MockTokenIssuer};
use meet_room::{Lobby, Role, Route};
use std::sync::Arc;
use std::time::Duration;

fn lobby(tokens: &Arc<MockTokenIssuer>, rooms: &Arc<MockRoomCreator>) -> Lobby {
    Lobby::new(tokens.clone(), rooms.clone())
}

#[tokio::test]
async fn test_join_requests_guest_token_and_navigates() {
    let tokens = Arc::new(MockTokenIssuer::default());
    let rooms = Arc::new(MockRoomCreator::new("unused"));

    let route = lobby(&tokens, &rooms).join("abc123").await;

    assert_eq!(tokens.requests(), vec![("abc123".to_string(), Role::Guest)]);
    let route = route.expect("join should navigate");
    assert_eq!(route.path(), "/abc123?role=guest");
    assert_eq!(rooms.calls(), 0);
}

#[tokio::test]
async fn test_join_blank_input_is_noop() {
    let tokens = Arc::new(MockTokenIssuer::default());
    let rooms = Arc::new(MockRoomCreator::new("unused"));
    let lobby = lobby(&tokens, &rooms);

    for input in ["", " ", "\t", "  \n "] {
        assert!(lobby.join(input).await.is_none(), "input {:?}", input);
    }

    assert!(tokens.requests().is_empty());
    assert!(!lobby.is_busy());
}

#[tokio::test]
async fn test_join_trims_input() {
    let tokens = Arc::new(MockTokenIssuer::default());
    let rooms = Arc::new(MockRoomCreator::new("unused"));

    let route = lobby(&tokens, &rooms).join("  abc-defg-hij  ").await;

    assert_eq!(tokens.requests()[0].0, "abc-defg-hij");
    assert_eq!(route.unwrap().path(), "/abc-defg-hij?role=guest");
}

#[tokio::test]
async fn test_join_invalid_code_makes_no_request() {
    let tokens = Arc::new(MockTokenIssuer::default());
    let rooms = Arc::new(MockRoomCreator::new("unused"));

    assert!(lobby(&tokens, &rooms).join("abc/../x").await.is_none());
    assert!(tokens.requests().is_empty());
}

#[tokio::test]
async fn test_join_token_failure_stays_on_entry() {
    let tokens = Arc::new(MockTokenIssuer::failing());
    let rooms = Arc::new(MockRoomCreator::new("unused"));
    let lobby = lobby(&tokens, &rooms);

    assert!(lobby.join("abc123").await.is_none());
    assert_eq!(tokens.requests().len(), 1);
    // Busy flag is released after a failure
    assert!(!lobby.is_busy());
}

#[tokio::test]
async fn test_create_requests_host_token_and_navigates() {
    let tokens = Arc::new(MockTokenIssuer::default());
    let rooms = Arc::new(MockRoomCreator::new("xyz-abcd-efg"));

    let route = lobby(&tokens, &rooms).create().await;

    assert_eq!(rooms.calls(), 1);
    assert_eq!(tokens.requests(), vec![("xyz-abcd-efg".to_string(), Role::Host)]);
    match route {
        Some(Route::Meeting { code, role }) => {
            assert_eq!(code.as_str(), "xyz-abcd-efg");
            assert_eq!(role, Role::Host);
        }
        other => panic!("expected meeting route, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_failure_skips_token_request() {
    let tokens = Arc::new(MockTokenIssuer::default());
    let mut creator = MockRoomCreator::new("unused");
    creator.fail = true;
    let rooms = Arc::new(creator);

    assert!(lobby(&tokens, &rooms).create().await.is_none());
    assert!(tokens.requests().is_empty());
}

#[tokio::test]
async fn test_double_join_issues_one_request() {
    let tokens = Arc::new(MockTokenIssuer::slow(Duration::from_millis(20)));
    let rooms = Arc::new(MockRoomCreator::new("unused"));
    let lobby = lobby(&tokens, &rooms);

    let (first, second) = tokio::join!(lobby.join("abc123"), lobby.join("abc123"));

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(tokens.requests().len(), 1);
}

#[tokio::test]
async fn test_double_create_issues_one_request() {
    let tokens = Arc::new(MockTokenIssuer::default());
    let mut creator = MockRoomCreator::new("xyz-abcd-efg");
    creator.delay = Some(Duration::from_millis(20));
    let rooms = Arc::new(creator);
    let lobby = lobby(&tokens, &rooms);

    let (first, second) = tokio::join!(lobby.create(), lobby.create());

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(rooms.calls(), 1);
    assert_eq!(tokens.requests().len(), 1);
}

#[tokio::test]
async fn test_join_while_create_in_flight_is_ignored() {
    let tokens = Arc::new(MockTokenIssuer::default());
    let mut creator = MockRoomCreator::new("xyz-abcd-efg");
    creator.delay = Some(Duration::from_millis(20));
    let rooms = Arc::new(creator);
    let lobby = lobby(&tokens, &rooms);

    let (created, joined) = tokio::join!(lobby.create(), lobby.join("abc123"));

    assert!(created.is_some());
    assert!(joined.is_none());
    assert_eq!(tokens.requests(), vec![("xyz-abcd-efg".to_string(), Role::Host)]);
}

#[tokio::test]
async fn test_sequential_actions_are_allowed() {
    let tokens = Arc::new(MockTokenIssuer::default());
    let rooms = Arc::new(MockRoomCreator::new("unused"));
    let lobby = lobby(&tokens, &rooms);

    assert!(lobby.join("room-1").await.is_some());
    assert!(lobby.join("room-2").await.is_some());
    assert_eq!(tokens.requests().len(), 2);
}

// Stage layout: grid sizing, focus region and tile controls

use meet_room::layout::{local_label, PinControl, MAX_GRID_COLUMNS};
use meet_room::{
    plan_layout, Arrangement, ControlBar, Focus, MeetingAction, MeetingState, PeerId, Role,
    RoomCode, RoomEvent, TileKind, Viewport,
};

fn peer(id: &str) -> PeerId {
    PeerId::new(id).unwrap()
}

fn state_with_peers(role: Role, peers: &[&str]) -> MeetingState {
    let mut state = MeetingState::new(role);
    state.reduce(MeetingAction::BeginJoin(RoomCode::parse("abc123").unwrap()));
    state.reduce(MeetingAction::Room(RoomEvent::Joined));
    for id in peers {
        state.reduce(MeetingAction::Room(RoomEvent::PeerJoined(peer(id))));
    }
    state
}

#[test]
fn test_viewport_columns() {
    assert_eq!(Viewport::new(0).max_columns(), 1);
    assert_eq!(Viewport::new(639).max_columns(), 1);
    assert_eq!(Viewport::new(640).max_columns(), 2);
    assert_eq!(Viewport::new(1023).max_columns(), 2);
    assert_eq!(Viewport::new(1024).max_columns(), 3);
    assert_eq!(Viewport::new(1280).max_columns(), 4);
    assert_eq!(Viewport::new(3840).max_columns(), MAX_GRID_COLUMNS);
}

#[test]
fn test_grid_sized_by_participant_count() {
    let wide = Viewport::new(1920);

    let alone = plan_layout(&state_with_peers(Role::Host, &[]), wide);
    assert_eq!(alone.arrangement, Arrangement::Grid { columns: 1 });

    let pair = plan_layout(&state_with_peers(Role::Host, &["p1"]), wide);
    assert_eq!(pair.arrangement, Arrangement::Grid { columns: 2 });

    let crowd = plan_layout(
        &state_with_peers(Role::Host, &["p1", "p2", "p3", "p4", "p5", "p6"]),
        wide,
    );
    assert_eq!(crowd.arrangement, Arrangement::Grid { columns: 4 });
    assert_eq!(crowd.tile_count(), 7);
}

#[test]
fn test_narrow_viewport_uses_one_column() {
    let plan = plan_layout(&state_with_peers(Role::Guest, &["p1", "p2"]), Viewport::new(375));

    assert_eq!(plan.arrangement, Arrangement::Grid { columns: 1 });
    assert!(plan.focus.is_none());
    assert!(plan.tiles.iter().all(|tile| !tile.compact));
}

#[test]
fn test_local_tile_first_with_role_label() {
    let plan = plan_layout(&state_with_peers(Role::Host, &["p1"]), Viewport::new(1280));

    match &plan.tiles[0].kind {
        TileKind::Local { label, video_on } => {
            assert_eq!(label, "You (Host)");
            assert!(!video_on);
        }
        other => panic!("expected local tile first, got {:?}", other),
    }
    assert!(plan.tiles[0].pin.is_none());
    assert_eq!(local_label(Role::Guest), "You (Guest)");
}

#[test]
fn test_tile_count_matches_truthy_peers() {
    let mut state = state_with_peers(Role::Guest, &[]);
    let raw = vec![
        None,
        Some("p1".to_string()),
        Some(String::new()),
        Some("p2".to_string()),
        None,
        Some("p3".to_string()),
    ];
    let truthy = raw
        .iter()
        .filter(|slot| slot.as_deref().is_some_and(|id| !id.is_empty()))
        .count();

    state.reduce(MeetingAction::PeersSynced(raw));
    let plan = plan_layout(&state, Viewport::new(1280));

    assert_eq!(plan.peer_tiles().count(), truthy);
    assert_eq!(plan.tile_count(), truthy + 1);
}

#[test]
fn test_pinned_peer_moves_to_focus_and_tiles_shrink() {
    let mut state = state_with_peers(Role::Guest, &["p1", "p2"]);
    state.reduce(MeetingAction::TogglePin(peer("p2")));

    let plan = plan_layout(&state, Viewport::new(1280));

    assert_eq!(plan.focus, Some(Focus::Peer(peer("p2"))));
    assert_eq!(plan.arrangement, Arrangement::Strip);
    assert!(plan.tiles.iter().all(|tile| tile.compact));

    let pins: Vec<Option<PinControl>> = plan.peer_tiles().map(|tile| tile.pin).collect();
    assert_eq!(
        pins,
        vec![Some(PinControl { pinned: false }), Some(PinControl { pinned: true })]
    );
}

#[test]
fn test_screen_share_takes_focus_and_hides_pins() {
    let mut state = state_with_peers(Role::Host, &["p1", "p2"]);
    state.reduce(MeetingAction::SetScreenShare(true));

    let plan = plan_layout(&state, Viewport::new(1280));

    assert_eq!(plan.focus, Some(Focus::ScreenShare));
    assert_eq!(plan.arrangement, Arrangement::Strip);
    assert!(plan.tiles.iter().all(|tile| tile.compact && tile.pin.is_none()));
}

#[test]
fn test_control_bar_mirrors_media_flags() {
    let mut state = state_with_peers(Role::Guest, &[]);
    state.reduce(MeetingAction::SetVideo(true));
    state.reduce(MeetingAction::SetScreenShare(true));

    let controls = ControlBar::from(state.media());

    assert!(!controls.audio_on);
    assert!(controls.video_on);
    assert!(controls.screen_sharing);
}

#[test]
fn test_layout_serializes_for_renderers() {
    let mut state = state_with_peers(Role::Guest, &["p1"]);
    state.reduce(MeetingAction::TogglePin(peer("p1")));

    let json = serde_json::to_value(plan_layout(&state, Viewport::new(800))).unwrap();

    assert_eq!(json["focus"]["peer"], "p1");
    assert_eq!(json["arrangement"], "strip");
    assert_eq!(json["tiles"][0]["kind"]["local"]["label"], "You (Guest)");
}

use crate::room::{PeerId, Role};
use crate::session::{Focus, LocalMediaState, MeetingState};
use serde::Serialize;

/// Viewport widths (px) at which the grid gains a column
pub const GRID_BREAKPOINTS: [u32; 3] = [640, 1024, 1280];

/// Widest grid on any viewport
pub const MAX_GRID_COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
}

impl Viewport {
    pub fn new(width: u32) -> Self {
        Self { width }
    }

    /// 1 column below 640px, then 2, 3 and 4 at 640/1024/1280px
    pub fn max_columns(&self) -> usize {
        1 + GRID_BREAKPOINTS
            .iter()
            .filter(|&&breakpoint| self.width >= breakpoint)
            .count()
    }
}

/// How the participant tiles are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrangement {
    /// Responsive grid filling the whole stage
    Grid { columns: usize },
    /// Scrollable strip of small tiles under the focus region
    Strip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    /// The local participant
    Local { label: String, video_on: bool },
    /// A remote peer
    Peer(PeerId),
}

/// Pin button on a peer tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PinControl {
    /// Highlighted when this peer is the current pin
    pub pinned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub kind: TileKind,
    /// Shrunk into the strip
    pub compact: bool,
    /// Hidden on the local tile and during screen share
    pub pin: Option<PinControl>,
}

/// Everything a renderer needs to draw the meeting stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutPlan {
    /// Enlarged upper region, if anything is focused
    pub focus: Option<Focus>,
    pub arrangement: Arrangement,
    /// Local tile first, then peers in join order
    pub tiles: Vec<Tile>,
}

impl LayoutPlan {
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn peer_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles
            .iter()
            .filter(|tile| matches!(tile.kind, TileKind::Peer(_)))
    }
}

/// Media buttons in the control bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlBar {
    pub audio_on: bool,
    pub video_on: bool,
    pub screen_sharing: bool,
}

impl From<LocalMediaState> for ControlBar {
    fn from(media: LocalMediaState) -> Self {
        Self {
            audio_on: media.audio_enabled,
            video_on: media.video_enabled,
            screen_sharing: media.screen_share_active,
        }
    }
}

/// Local tile label, e.g. "You (Host)"
pub fn local_label(role: Role) -> String {
    format!("You ({})", role.label())
}

/// Compute the stage layout for the current meeting state
pub fn plan_layout(state: &MeetingState, viewport: Viewport) -> LayoutPlan {
    let focus = state.focus();
    let compact = focus.is_some();
    let sharing = state.media().screen_share_active;
    let pinned = state.pinned();

    let mut tiles = Vec::with_capacity(state.peers().len() + 1);
    tiles.push(Tile {
        kind: TileKind::Local {
            label: local_label(state.session().role),
            video_on: state.media().video_enabled,
        },
        compact,
        pin: None,
    });

    tiles.extend(state.peers().iter().map(|peer_id| Tile {
        kind: TileKind::Peer(peer_id.clone()),
        compact,
        pin: (!sharing).then(|| PinControl {
            pinned: pinned == Some(peer_id),
        }),
    }));

    let arrangement = if compact {
        Arrangement::Strip
    } else {
        Arrangement::Grid {
            columns: viewport.max_columns().min(tiles.len()).max(1),
        }
    };

    LayoutPlan {
        focus,
        arrangement,
        tiles,
    }
}

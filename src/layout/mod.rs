//! Stage layout: focus region, participant tiles and grid sizing

mod plan;

pub use plan::{
    local_label, plan_layout, Arrangement, ControlBar, LayoutPlan, PinControl, Tile, TileKind,
    Viewport, GRID_BREAKPOINTS, MAX_GRID_COLUMNS,
};

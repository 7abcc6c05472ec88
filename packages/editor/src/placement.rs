//! # Spatial Placement
//!
//! Free positioning of blocks inside a page canvas while a pointer drags them.
//!
//! Each pointer-move runs the same pipeline:
//!
//! ```text
//! start + delta → clamp to [0, canvas - block] → snap center to canvas center
//! ```
//!
//! A drag whose pointer never travels past the click threshold ends as a
//! selection instead of a move. Each block is owned by at most one pointer;
//! other pointers are ignored until it is released.

use std::collections::HashMap;

use blockcraft_schema::Block;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which axes are currently center-snapped (drives the alignment guides)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisSnap {
    pub x: bool,
    pub y: bool,
}

impl AxisSnap {
    pub fn any(self) -> bool {
        self.x || self.y
    }
}

/// Result of one pointer-move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementFrame {
    pub position: Point,
    pub snap: AxisSnap,
}

/// How a drag finished
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Pointer travelled past the click threshold; persist `position`
    Moved { block_id: String, position: Point },
    /// Pointer barely moved; treat as a selection
    Clicked { block_id: String },
}

#[derive(Debug, Clone)]
struct DragState {
    pointer_id: u64,
    start: Point,
    position: Point,
    snap: AxisSnap,
    moved: bool,
}

/// Clamp and snap a candidate position. Pure; the engine's per-move step.
pub fn place(start: Point, delta: Point, canvas: Size, block: Size, snap_tolerance: f64) -> PlacementFrame {
    let (x, snap_x) = place_axis(start.x + delta.x, canvas.width, block.width, snap_tolerance);
    let (y, snap_y) = place_axis(start.y + delta.y, canvas.height, block.height, snap_tolerance);
    PlacementFrame {
        position: Point::new(x, y),
        snap: AxisSnap { x: snap_x, y: snap_y },
    }
}

fn place_axis(candidate: f64, canvas: f64, block: f64, tolerance: f64) -> (f64, bool) {
    let max = (canvas - block).max(0.0);
    let clamped = candidate.clamp(0.0, max);

    // Centering a block wider than the canvas would push it negative
    if block > canvas {
        return (clamped, false);
    }

    let centered = canvas / 2.0 - block / 2.0;
    let center = clamped + block / 2.0;
    if (center - canvas / 2.0).abs() <= tolerance {
        (centered, true)
    } else {
        (clamped, false)
    }
}

/// Stored position of a block, or the list-index default when absent
pub fn block_origin(block: &Block, index: usize, row_height: f64) -> Point {
    Point::new(
        block.number_prop("x").unwrap_or(0.0),
        block.number_prop("y").unwrap_or(index as f64 * row_height),
    )
}

/// On-canvas position: stored origin plus the `offsetX` nudge
pub fn layout_position(block: &Block, index: usize, row_height: f64) -> Point {
    let origin = block_origin(block, index, row_height);
    Point::new(origin.x + block.number_prop("offsetX").unwrap_or(0.0), origin.y)
}

/// Tracks in-progress drags, one per block
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    snap_tolerance: f64,
    click_threshold: f64,
    drags: HashMap<String, DragState>,
}

impl PlacementEngine {
    pub fn new(snap_tolerance: f64, click_threshold: f64) -> Self {
        Self {
            snap_tolerance,
            click_threshold,
            drags: HashMap::new(),
        }
    }

    /// Claim a block for `pointer_id`. Returns false if another pointer owns it.
    pub fn begin(&mut self, block_id: &str, pointer_id: u64, start: Point) -> bool {
        if let Some(existing) = self.drags.get(block_id) {
            tracing::debug!(
                "ignoring pointer {} on {}: owned by pointer {}",
                pointer_id,
                block_id,
                existing.pointer_id
            );
            return false;
        }

        self.drags.insert(
            block_id.to_string(),
            DragState {
                pointer_id,
                start,
                position: start,
                snap: AxisSnap::default(),
                moved: false,
            },
        );
        true
    }

    /// Pointer moved `delta` from where the drag began
    pub fn drag(
        &mut self,
        block_id: &str,
        pointer_id: u64,
        delta: Point,
        canvas: Size,
        block: Size,
    ) -> Option<PlacementFrame> {
        let state = self.drags.get_mut(block_id).filter(|s| s.pointer_id == pointer_id)?;

        let frame = place(state.start, delta, canvas, block, self.snap_tolerance);
        state.position = frame.position;
        state.snap = frame.snap;
        if delta.x.abs() > self.click_threshold || delta.y.abs() > self.click_threshold {
            state.moved = true;
        }
        Some(frame)
    }

    /// Release the block. `None` if `pointer_id` doesn't own a drag on it.
    pub fn end(&mut self, block_id: &str, pointer_id: u64) -> Option<DragOutcome> {
        match self.drags.get(block_id) {
            Some(state) if state.pointer_id == pointer_id => {}
            _ => return None,
        }
        let state = self.drags.remove(block_id)?;

        Some(if state.moved {
            DragOutcome::Moved {
                block_id: block_id.to_string(),
                position: state.position,
            }
        } else {
            DragOutcome::Clicked {
                block_id: block_id.to_string(),
            }
        })
    }

    pub fn is_dragging(&self, block_id: &str) -> bool {
        self.drags.contains_key(block_id)
    }

    pub fn has_active_drags(&self) -> bool {
        !self.drags.is_empty()
    }

    /// Union of snap guides across active drags; cleared once they end
    pub fn guides(&self) -> AxisSnap {
        self.drags.values().fold(AxisSnap::default(), |acc, s| AxisSnap {
            x: acc.x || s.snap.x,
            y: acc.y || s.snap.y,
        })
    }

    /// Live position of a dragged block
    pub fn position(&self, block_id: &str) -> Option<Point> {
        self.drags.get(block_id).map(|s| s.position)
    }

    /// Drop every drag without committing (document replaced underneath)
    pub fn clear(&mut self) {
        self.drags.clear();
    }
}

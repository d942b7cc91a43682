use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::EntityGeometry;
use crate::error::{TimelineError, TimelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Dragging,
    Resizing,
}

/// Ephemeral per-entity gesture record.
///
/// `current_*` holds the last snapped value, which becomes authoritative on
/// pointer-up regardless of how many move events were coalesced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureState {
    Idle,
    Dragging {
        pointer_origin_x: f64,
        origin_left: f64,
        entity_width: f64,
        current_left: f64,
        moved: bool,
    },
    Resizing {
        pointer_origin_x: f64,
        origin_width: f64,
        entity_left: f64,
        current_width: f64,
        moved: bool,
    },
}

impl GestureState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        match self {
            Self::Idle => InteractionMode::Idle,
            Self::Dragging { .. } => InteractionMode::Dragging,
            Self::Resizing { .. } => InteractionMode::Resizing,
        }
    }
}

/// Container limits for one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureBounds {
    container_width: f64,
    cell_width: f64,
}

impl GestureBounds {
    pub fn new(container_width: f64, cell_width: f64) -> TimelineResult<Self> {
        if !cell_width.is_finite() || cell_width <= 0.0 {
            return Err(TimelineError::InvalidCellWidth(cell_width));
        }
        if !container_width.is_finite() || container_width < 0.0 {
            return Err(TimelineError::InvalidData(format!(
                "container width must be finite and >= 0, got {container_width}"
            )));
        }
        Ok(Self {
            container_width,
            cell_width,
        })
    }

    #[must_use]
    pub fn container_width(self) -> f64 {
        self.container_width
    }

    #[must_use]
    pub fn cell_width(self) -> f64 {
        self.cell_width
    }
}

/// Final value of a gesture, reported on pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureOutcome {
    /// Idle, or a press released without any pointer motion.
    None,
    Moved { origin_left: f64, left: f64 },
    Resized { origin_width: f64, width: f64 },
}

/// Rounds `value` to the nearest multiple of `cell_width`.
#[must_use]
pub fn snap_to_grid(value: f64, cell_width: f64) -> f64 {
    (value / cell_width).round() * cell_width
}

/// Pointer-driven drag/resize state machine for one entity.
///
/// The controller only produces snapped pixel geometry; converting it back to
/// timestamps and persisting is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragResizeController {
    state: GestureState,
}

impl Default for DragResizeController {
    fn default() -> Self {
        Self {
            state: GestureState::Idle,
        }
    }
}

impl DragResizeController {
    #[must_use]
    pub fn state(self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.state.mode()
    }

    /// Pointer-down on the entity body. Replaces any stale gesture.
    pub fn begin_drag(&mut self, pointer_x: f64, geometry: EntityGeometry) {
        self.state = GestureState::Dragging {
            pointer_origin_x: pointer_x,
            origin_left: geometry.left,
            entity_width: geometry.width.max(0.0),
            current_left: geometry.left,
            moved: false,
        };
    }

    /// Pointer-down on the resize handle. Replaces any stale gesture.
    pub fn begin_resize(&mut self, pointer_x: f64, geometry: EntityGeometry) {
        self.state = GestureState::Resizing {
            pointer_origin_x: pointer_x,
            origin_width: geometry.width,
            entity_left: geometry.left,
            current_width: geometry.width,
            moved: false,
        };
    }

    /// Applies pointer motion and returns the snapped left (drag) or width
    /// (resize). Out-of-range positions are clamped, never rejected.
    pub fn pointer_move(&mut self, current_x: f64, bounds: GestureBounds) -> Option<f64> {
        let cell = bounds.cell_width;
        match &mut self.state {
            GestureState::Idle => None,
            GestureState::Dragging {
                pointer_origin_x,
                origin_left,
                entity_width,
                current_left,
                moved,
            } => {
                let dx = current_x - *pointer_origin_x;
                let max_left = (bounds.container_width - *entity_width).max(0.0);
                let left = (*origin_left + dx).min(max_left).max(0.0);
                *current_left = snap_to_grid(left, cell);
                *moved |= dx != 0.0;
                trace!(dx, left = *current_left, "drag move");
                Some(*current_left)
            }
            GestureState::Resizing {
                pointer_origin_x,
                origin_width,
                entity_left,
                current_width,
                moved,
            } => {
                let dx = current_x - *pointer_origin_x;
                let max_width = bounds.container_width - *entity_left;
                let width = (*origin_width + dx).max(cell).min(max_width);
                *current_width = snap_to_grid(width, cell).max(cell);
                *moved |= dx != 0.0;
                trace!(dx, width = *current_width, "resize move");
                Some(*current_width)
            }
        }
    }

    /// Pointer-up: returns the final snapped value and returns to idle.
    pub fn pointer_up(&mut self) -> GestureOutcome {
        let finished = std::mem::replace(&mut self.state, GestureState::Idle);
        match finished {
            GestureState::Dragging {
                origin_left,
                current_left,
                moved: true,
                ..
            } => GestureOutcome::Moved {
                origin_left,
                left: current_left,
            },
            GestureState::Resizing {
                origin_width,
                current_width,
                moved: true,
                ..
            } => GestureOutcome::Resized {
                origin_width,
                width: current_width,
            },
            _ => GestureOutcome::None,
        }
    }

    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }
}

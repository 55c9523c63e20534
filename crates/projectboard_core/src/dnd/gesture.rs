//! Per-gesture drag state machine.
//!
//! Phases run `Idle -> Dragging -> (Over | Dragging) -> (Dropped | Cancelled)`.
//! The gesture owns the event, so the payload set on start is the payload the
//! target sees on over and drop.
//!
//! # Invariants
//! - Only the target currently hovered may receive leave or drop.
//! - Drop requires that target to have accepted the payload.
//! - Moving onto another target sends leave to the previous one first.

use crate::dnd::transfer::DragEvent;
use crate::dnd::{DragTarget, Draggable};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    /// Hovering a target that accepted the payload.
    Over,
    Dropped,
    Cancelled,
}

impl DragPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Dropped | Self::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragAction {
    Start,
    Over,
    Leave,
    Drop,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragError {
    InvalidTransition { from: DragPhase, action: DragAction },
}

impl Display for DragError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition { from, action } => {
                write!(f, "drag action {action:?} is not allowed in phase {from:?}")
            }
        }
    }
}

impl Error for DragError {}

/// One drag gesture from start to drop or cancel.
///
/// Borrows the hovered target so it can deliver the leave signal when the
/// pointer moves on or the gesture is abandoned.
#[derive(Clone)]
pub struct DragGesture<'a> {
    phase: DragPhase,
    event: DragEvent,
    hovered: Option<&'a dyn DragTarget>,
}

impl Default for DragGesture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DragGesture<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragGesture")
            .field("phase", &self.phase)
            .field("event", &self.event)
            .field("hovered", &self.hovered_id())
            .finish()
    }
}

impl<'a> DragGesture<'a> {
    /// Gesture on a platform with a drag data channel.
    pub fn new() -> Self {
        Self::with_event(DragEvent::new())
    }

    pub fn with_event(event: DragEvent) -> Self {
        Self {
            phase: DragPhase::Idle,
            event,
            hovered: None,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn event(&self) -> &DragEvent {
        &self.event
    }

    /// ID of the target under the pointer, accepted or not.
    pub fn hovered_id(&self) -> Option<&str> {
        self.hovered.map(|target| target.target_id())
    }

    pub fn start(&mut self, source: &dyn Draggable) -> Result<DragPhase, DragError> {
        self.require(DragAction::Start, &[DragPhase::Idle])?;
        source.drag_start(&mut self.event);
        Ok(self.advance(DragAction::Start, DragPhase::Dragging))
    }

    /// Delivers one dragover signal. Ends in `Over` only if the target
    /// accepted the payload.
    pub fn over(&mut self, target: &'a dyn DragTarget) -> Result<DragPhase, DragError> {
        self.require(DragAction::Over, &[DragPhase::Dragging, DragPhase::Over])?;
        if let Some(previous) = self.hovered {
            if previous.target_id() != target.target_id() {
                previous.drag_leave(&self.event);
            }
        }
        self.hovered = Some(target);

        self.event.reset_default();
        target.drag_over(&mut self.event);
        let next = if self.event.default_prevented() {
            DragPhase::Over
        } else {
            DragPhase::Dragging
        };
        Ok(self.advance(DragAction::Over, next))
    }

    /// Leaves `target`. Repeating it once nothing is hovered is a no-op leave.
    pub fn leave(&mut self, target: &dyn DragTarget) -> Result<DragPhase, DragError> {
        self.require(DragAction::Leave, &[DragPhase::Dragging, DragPhase::Over])?;
        if !self.is_hovered_or_none(target) {
            return Err(self.invalid(DragAction::Leave));
        }
        target.drag_leave(&self.event);
        self.hovered = None;
        Ok(self.advance(DragAction::Leave, DragPhase::Dragging))
    }

    /// Releases over the accepting target, then notifies the source.
    pub fn drop(
        &mut self,
        source: &dyn Draggable,
        target: &dyn DragTarget,
    ) -> Result<DragPhase, DragError> {
        self.require(DragAction::Drop, &[DragPhase::Over])?;
        let accepted = self
            .hovered
            .is_some_and(|hovered| hovered.target_id() == target.target_id());
        if !accepted {
            return Err(self.invalid(DragAction::Drop));
        }
        target.drop(&self.event);
        self.hovered = None;
        source.drag_end(&self.event);
        Ok(self.advance(DragAction::Drop, DragPhase::Dropped))
    }

    /// Abandons the gesture. The hovered target receives a leave signal first.
    pub fn cancel(&mut self, source: &dyn Draggable) -> Result<DragPhase, DragError> {
        self.require(DragAction::Cancel, &[DragPhase::Dragging, DragPhase::Over])?;
        if let Some(target) = self.hovered.take() {
            target.drag_leave(&self.event);
        }
        source.drag_end(&self.event);
        Ok(self.advance(DragAction::Cancel, DragPhase::Cancelled))
    }

    fn is_hovered_or_none(&self, target: &dyn DragTarget) -> bool {
        self.hovered
            .map_or(true, |hovered| hovered.target_id() == target.target_id())
    }

    fn require(&self, action: DragAction, allowed: &[DragPhase]) -> Result<(), DragError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: DragAction) -> DragError {
        DragError::InvalidTransition {
            from: self.phase,
            action,
        }
    }

    fn advance(&mut self, action: DragAction, next: DragPhase) -> DragPhase {
        debug!(
            "event=drag_transition module=dnd status=ok action={:?} from={:?} to={:?} target={}",
            action,
            self.phase,
            next,
            self.hovered_id().unwrap_or("none")
        );
        self.phase = next;
        next
    }
}

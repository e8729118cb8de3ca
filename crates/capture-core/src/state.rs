use serde::Serialize;
use stepcapture_core_types::ElementRef;

/// A text field edit in progress, committed on a matching focus-exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingFieldEdit {
    pub element: ElementRef,
    pub original_value: String,
}

/// Capture flags and in-flight tracking.
///
/// Owned and mutated only by [`crate::CaptureMachine`]; everyone else reads it
/// through [`crate::CaptureMachine::state`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CaptureState {
    pub(crate) recording_active: bool,
    pub(crate) picking_active: bool,
    pub(crate) pending_field_edit: Option<PendingFieldEdit>,
    pub(crate) hovered_element: Option<ElementRef>,
}

impl CaptureState {
    pub fn recording_active(&self) -> bool {
        self.recording_active
    }

    pub fn picking_active(&self) -> bool {
        self.picking_active
    }

    pub fn pending_field_edit(&self) -> Option<&PendingFieldEdit> {
        self.pending_field_edit.as_ref()
    }

    pub fn hovered_element(&self) -> Option<ElementRef> {
        self.hovered_element
    }

    pub fn mode(&self) -> CaptureMode {
        match (self.recording_active, self.picking_active) {
            (false, false) => CaptureMode::Idle,
            (true, false) => CaptureMode::Recording,
            (false, true) => CaptureMode::Picking,
            (true, true) => CaptureMode::RecordingAndPicking,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    Idle,
    Recording,
    Picking,
    RecordingAndPicking,
}

impl CaptureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureMode::Idle => "idle",
            CaptureMode::Recording => "recording",
            CaptureMode::Picking => "picking",
            CaptureMode::RecordingAndPicking => "recording_and_picking",
        }
    }
}

impl std::fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_follows_flags() {
        let mut state = CaptureState::default();
        assert_eq!(state.mode(), CaptureMode::Idle);
        state.picking_active = true;
        assert_eq!(state.mode(), CaptureMode::Picking);
        state.recording_active = true;
        assert_eq!(state.mode(), CaptureMode::RecordingAndPicking);
        state.picking_active = false;
        assert_eq!(state.mode().to_string(), "recording");
    }
}

use std::collections::BTreeSet;

use serde::Serialize;

use crate::highlight::HighlightUpdate;

/// Document observers the machine registers with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerKind {
    Activation,
    FocusIn,
    FocusOut,
    Change,
    PointerMove,
    /// Capture-phase activation listener owned by picking mode.
    ActivationIntercept,
}

impl ListenerKind {
    pub const RECORDING: [ListenerKind; 4] = [
        ListenerKind::Activation,
        ListenerKind::FocusIn,
        ListenerKind::FocusOut,
        ListenerKind::Change,
    ];

    pub const PICKING: [ListenerKind; 2] =
        [ListenerKind::PointerMove, ListenerKind::ActivationIntercept];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorAffordance {
    #[default]
    Default,
    Crosshair,
}

/// Side of the document the capture core may touch: observer registration,
/// the hover cursor, and the highlight outline.
pub trait CaptureHost {
    fn attach(&mut self, kind: ListenerKind);
    fn detach(&mut self, kind: ListenerKind);
    fn set_cursor(&mut self, cursor: CursorAffordance);
    fn render_outline(&mut self, update: HighlightUpdate);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum HostCall {
    Attach { kind: ListenerKind },
    Detach { kind: ListenerKind },
    SetCursor { cursor: CursorAffordance },
    RenderOutline { update: HighlightUpdate },
}

/// Host that applies calls to plain in-memory state and keeps a call log.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    attached: BTreeSet<ListenerKind>,
    cursor: CursorAffordance,
    outline: Option<HighlightUpdate>,
    calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached(&self) -> &BTreeSet<ListenerKind> {
        &self.attached
    }

    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.attached.contains(&kind)
    }

    pub fn cursor(&self) -> CursorAffordance {
        self.cursor
    }

    /// Last outline update rendered, if any.
    pub fn outline(&self) -> Option<HighlightUpdate> {
        self.outline
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }
}

impl CaptureHost for RecordingHost {
    fn attach(&mut self, kind: ListenerKind) {
        self.attached.insert(kind);
        self.calls.push(HostCall::Attach { kind });
    }

    fn detach(&mut self, kind: ListenerKind) {
        self.attached.remove(&kind);
        self.calls.push(HostCall::Detach { kind });
    }

    fn set_cursor(&mut self, cursor: CursorAffordance) {
        self.cursor = cursor;
        self.calls.push(HostCall::SetCursor { cursor });
    }

    fn render_outline(&mut self, update: HighlightUpdate) {
        self.outline = Some(update);
        self.calls.push(HostCall::RenderOutline { update });
    }
}

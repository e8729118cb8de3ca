use stepcapture_core_types::ElementRef;

/// Document events delivered by the host's listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    FocusIn(ElementRef),
    FocusOut(ElementRef),
    /// Pointer-down/click equivalent.
    Activation(ElementRef),
    /// Value change on a form control.
    Change(ElementRef),
    /// Hover target changed; `None` when the pointer left every element.
    PointerMove(Option<ElementRef>),
    Navigated(String),
}

/// What the host should do with the native event after the machine ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventDisposition {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl EventDisposition {
    pub const PASSTHROUGH: EventDisposition = EventDisposition {
        prevent_default: false,
        stop_propagation: false,
    };

    pub const INTERCEPT: EventDisposition = EventDisposition {
        prevent_default: true,
        stop_propagation: true,
    };

    pub fn is_intercepted(&self) -> bool {
        self.prevent_default && self.stop_propagation
    }
}

use std::collections::BTreeSet;

use perceiver_dom::{DocumentPort, ElementRef};
use step_builder::{ElementTarget, StepBuilder};
use step_model::StepFields;
use tracing::{debug, info, warn};

use crate::events::{DomEvent, EventDisposition};
use crate::fields::{is_select, is_text_field};
use crate::highlight::{HighlightCoordinator, HighlightUpdate};
use crate::host::{CaptureHost, CursorAffordance, ListenerKind};
use crate::messages::{InboundSignal, OutboundMessage, Outbox};
use crate::policy::CapturePolicyView;
use crate::state::{CaptureMode, CaptureState, PendingFieldEdit};

const SET_VALUE: &str = "setValue";
const CLICK: &str = "click";
const SELECT_BY_TEXT: &str = "selectByVisibleText";
const NAVIGATE: &str = "url";

/// Turns document events into steps according to the recording and picking flags.
///
/// Single-threaded: every call completes synchronously and the machine is the
/// only writer of its [`CaptureState`].
pub struct CaptureMachine<H, O>
where
    H: CaptureHost,
    O: Outbox,
{
    state: CaptureState,
    attached: BTreeSet<ListenerKind>,
    builder: StepBuilder,
    highlight: HighlightCoordinator,
    policy: CapturePolicyView,
    host: H,
    outbox: O,
}

impl<H, O> CaptureMachine<H, O>
where
    H: CaptureHost,
    O: Outbox,
{
    pub fn new(builder: StepBuilder, policy: CapturePolicyView, host: H, outbox: O) -> Self {
        Self {
            state: CaptureState::default(),
            attached: BTreeSet::new(),
            builder,
            highlight: HighlightCoordinator::new(policy.clone()),
            policy,
            host,
            outbox,
        }
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn mode(&self) -> CaptureMode {
        self.state.mode()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn outbox(&self) -> &O {
        &self.outbox
    }

    /// Apply an inbound signal. Re-sending the current value is a no-op.
    pub fn apply(&mut self, signal: InboundSignal) {
        match signal {
            InboundSignal::SetRecording(on) => {
                if self.state.recording_active == on {
                    debug!(recording = on, "recording flag unchanged");
                    return;
                }
                self.state.recording_active = on;
                if !on {
                    if let Some(edit) = self.state.pending_field_edit.take() {
                        debug!(element = %edit.element, "pending field edit discarded");
                    }
                }
            }
            InboundSignal::SetPicking(on) => {
                if self.state.picking_active == on {
                    debug!(picking = on, "picking flag unchanged");
                    return;
                }
                if on {
                    self.state.picking_active = true;
                    self.host.set_cursor(CursorAffordance::Crosshair);
                } else {
                    self.leave_picking();
                }
            }
        }
        self.sync_listeners();
        info!(mode = %self.state.mode(), "capture mode changed");
    }

    /// Process one document event and report how the native event should proceed.
    pub fn handle(&mut self, doc: &dyn DocumentPort, event: DomEvent) -> EventDisposition {
        match event {
            DomEvent::FocusIn(element) if self.listening(ListenerKind::FocusIn) => {
                self.on_focus_in(doc, element);
                EventDisposition::PASSTHROUGH
            }
            DomEvent::FocusOut(element) if self.listening(ListenerKind::FocusOut) => {
                self.on_focus_out(doc, element);
                EventDisposition::PASSTHROUGH
            }
            DomEvent::Activation(element)
                if self.listening(ListenerKind::Activation)
                    || self.listening(ListenerKind::ActivationIntercept) =>
            {
                self.on_activation(doc, element)
            }
            DomEvent::Change(element) if self.listening(ListenerKind::Change) => {
                self.on_change(doc, element);
                EventDisposition::PASSTHROUGH
            }
            DomEvent::PointerMove(target) if self.listening(ListenerKind::PointerMove) => {
                self.on_hover(doc, target);
                EventDisposition::PASSTHROUGH
            }
            DomEvent::Navigated(url) if self.state.recording_active => {
                self.emit_step(NAVIGATE, None, Some(StepFields::url(url)));
                EventDisposition::PASSTHROUGH
            }
            other => {
                debug!(event = ?other, "event ignored, no listener attached");
                EventDisposition::PASSTHROUGH
            }
        }
    }

    fn on_focus_in(&mut self, doc: &dyn DocumentPort, element: ElementRef) {
        if !is_text_field(doc, element) {
            return;
        }
        let original_value = doc.value(element).unwrap_or_default();
        debug!(%element, "tracking field edit");
        self.state.pending_field_edit = Some(PendingFieldEdit {
            element,
            original_value,
        });
    }

    fn on_focus_out(&mut self, doc: &dyn DocumentPort, element: ElementRef) {
        let Some(edit) = self.state.pending_field_edit.take() else {
            return;
        };
        if edit.element != element {
            debug!(tracked = %edit.element, %element, "focus left a different element");
            return;
        }
        let current = doc.value(element).unwrap_or_default();
        if current == edit.original_value {
            debug!(%element, "field value unchanged");
            return;
        }
        self.emit_step(
            SET_VALUE,
            Some(ElementTarget::new(doc, element)),
            Some(StepFields::text(current)),
        );
    }

    fn on_activation(&mut self, doc: &dyn DocumentPort, element: ElementRef) -> EventDisposition {
        if doc.is_within(element, &self.policy.reserved_container_id) {
            debug!(%element, "activation inside recorder surface ignored");
            return EventDisposition::PASSTHROUGH;
        }
        if self.state.picking_active {
            self.emit_step(CLICK, Some(ElementTarget::new(doc, element)), None);
            self.leave_picking();
            self.sync_listeners();
            self.send(OutboundMessage::SetPicking(false));
            info!(mode = %self.state.mode(), "pick complete, picking left");
            return EventDisposition::INTERCEPT;
        }
        if self.state.recording_active {
            self.emit_step(CLICK, Some(ElementTarget::new(doc, element)), None);
        }
        EventDisposition::PASSTHROUGH
    }

    fn on_change(&mut self, doc: &dyn DocumentPort, element: ElementRef) {
        if !self.state.recording_active || !is_select(doc, element) {
            return;
        }
        let observed = doc
            .selected_option_text(element)
            .map(StepFields::option_value);
        self.emit_step(
            SELECT_BY_TEXT,
            Some(ElementTarget::new(doc, element)),
            observed,
        );
    }

    fn on_hover(&mut self, doc: &dyn DocumentPort, target: Option<ElementRef>) {
        let Some(update) = self.highlight.update(doc, target) else {
            return;
        };
        self.state.hovered_element = target;
        self.render(update);
    }

    fn leave_picking(&mut self) {
        self.state.picking_active = false;
        self.state.hovered_element = None;
        self.render(HighlightUpdate::Hide);
        self.host.set_cursor(CursorAffordance::Default);
    }

    fn render(&mut self, update: HighlightUpdate) {
        self.host.render_outline(update);
        self.send(OutboundMessage::Highlight(update));
    }

    fn desired_listeners(&self) -> BTreeSet<ListenerKind> {
        let mut desired = BTreeSet::new();
        if self.state.recording_active {
            desired.extend(ListenerKind::RECORDING);
        }
        if self.state.picking_active {
            desired.extend(ListenerKind::PICKING);
        }
        desired
    }

    fn sync_listeners(&mut self) {
        let desired = self.desired_listeners();
        let stale: Vec<_> = self.attached.difference(&desired).copied().collect();
        let missing: Vec<_> = desired.difference(&self.attached).copied().collect();
        for kind in stale {
            self.host.detach(kind);
        }
        for kind in missing {
            self.host.attach(kind);
        }
        self.attached = desired;
    }

    fn listening(&self, kind: ListenerKind) -> bool {
        self.attached.contains(&kind)
    }

    fn emit_step(
        &mut self,
        key: &str,
        target: Option<ElementTarget<'_>>,
        observed: Option<StepFields>,
    ) {
        match self.builder.build(key, target, observed.as_ref()) {
            Some(step) => {
                if step.locator_candidates().is_empty() && target.is_some() {
                    debug!(step_id = %step.id(), "step emitted without locator");
                }
                self.send(OutboundMessage::StepProduced(step));
            }
            None => warn!(key, "capture command missing from registry"),
        }
    }

    fn send(&mut self, message: OutboundMessage) {
        if let Err(err) = self.outbox.send(message) {
            warn!(error = %err, "outbound message dropped");
        }
    }
}

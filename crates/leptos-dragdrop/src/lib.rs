//! Leptos DragDrop Utilities
//!
//! Mouse-event drag-and-drop for Leptos.
//! Uses a movement threshold to distinguish click from drag, and a small
//! state machine (`DragMachine`) that the signal wrappers drive.
//!
//! Phases: `Idle -> Pending -> Dragging -> (Dropped | DroppedOutside | Cancelled) -> Idle`.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// How long `drag_just_ended` stays set after a drop, so click handlers can ignore it
const JUST_ENDED_MS: i32 = 100;

/// Where a dragged element would land
#[derive(Clone, Debug, PartialEq)]
pub enum DropTarget<C> {
    /// Drop on a container body (append at the end)
    Container(C),
    /// Drop on a zone between elements (container, insertion index)
    Zone(C, usize),
}

impl<C> DropTarget<C> {
    pub fn container(&self) -> &C {
        match self {
            DropTarget::Container(c) | DropTarget::Zone(c, _) => c,
        }
    }
}

/// Current phase of the gesture
#[derive(Clone, Debug, PartialEq)]
pub enum DragPhase<K> {
    Idle,
    /// Mouse is down on an element but has not moved past the threshold
    Pending { id: K, start_x: i32, start_y: i32 },
    Dragging { id: K },
}

/// Result of finishing a drag
#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome<K, C> {
    Dropped { dragged: K, target: DropTarget<C> },
    DroppedOutside { dragged: K },
    Cancelled { dragged: K },
}

/// Pure drag state machine, independent of the DOM
#[derive(Clone, Debug)]
pub struct DragMachine<K, C> {
    phase: DragPhase<K>,
    target: Option<DropTarget<C>>,
}

impl<K, C> Default for DragMachine<K, C> {
    fn default() -> Self {
        Self { phase: DragPhase::Idle, target: None }
    }
}

impl<K: Clone + PartialEq, C: Clone + PartialEq> DragMachine<K, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DragPhase<K> {
        &self.phase
    }

    pub fn target(&self) -> Option<&DropTarget<C>> {
        self.target.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, DragPhase::Pending { .. })
    }

    pub fn dragging_id(&self) -> Option<&K> {
        match &self.phase {
            DragPhase::Dragging { id } => Some(id),
            _ => None,
        }
    }

    /// Mouse down on an element
    pub fn press(&mut self, id: K, x: i32, y: i32) {
        if self.dragging_id().is_some() {
            return;
        }
        self.phase = DragPhase::Pending { id, start_x: x, start_y: y };
        self.target = None;
    }

    /// Mouse moved; returns true when this motion started the drag
    pub fn motion(&mut self, x: i32, y: i32) -> bool {
        if let DragPhase::Pending { id, start_x, start_y } = &self.phase {
            let dx = (x - start_x).abs();
            let dy = (y - start_y).abs();
            if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                self.phase = DragPhase::Dragging { id: id.clone() };
                return true;
            }
        }
        false
    }

    /// Pointer entered a droppable region
    pub fn hover(&mut self, target: DropTarget<C>) {
        if self.dragging_id().is_some() {
            self.target = Some(target);
        }
    }

    /// Pointer left a droppable region
    pub fn leave(&mut self) {
        if self.dragging_id().is_some() {
            self.target = None;
        }
    }

    /// Mouse released. `None` means the gesture was a click (or nothing).
    pub fn release(&mut self) -> Option<DropOutcome<K, C>> {
        let phase = std::mem::replace(&mut self.phase, DragPhase::Idle);
        let target = self.target.take();
        match phase {
            DragPhase::Dragging { id } => Some(match target {
                Some(target) => DropOutcome::Dropped { dragged: id, target },
                None => DropOutcome::DroppedOutside { dragged: id },
            }),
            _ => None,
        }
    }

    /// Escape pressed
    pub fn cancel(&mut self) -> Option<DropOutcome<K, C>> {
        let phase = std::mem::replace(&mut self.phase, DragPhase::Idle);
        self.target = None;
        match phase {
            DragPhase::Dragging { id } => Some(DropOutcome::Cancelled { dragged: id }),
            _ => None,
        }
    }
}

/// DnD state signals
pub struct DndSignals<K: Send + Sync + 'static, C: Send + Sync + 'static> {
    pub machine: RwSignal<DragMachine<K, C>>,
    /// Set briefly after a drag finishes
    pub drag_just_ended: RwSignal<bool>,
}

impl<K: Send + Sync + 'static, C: Send + Sync + 'static> Clone for DndSignals<K, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Send + Sync + 'static, C: Send + Sync + 'static> Copy for DndSignals<K, C> {}

impl<K, C> DndSignals<K, C>
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    /// Reactive: id of the element being dragged
    pub fn dragging_id(&self) -> Option<K> {
        self.machine.with(|m| m.dragging_id().cloned())
    }

    /// Reactive: current drop target
    pub fn drop_target(&self) -> Option<DropTarget<C>> {
        self.machine.with(|m| m.target().cloned())
    }
}

pub fn create_dnd_signals<K, C>() -> DndSignals<K, C>
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    DndSignals {
        machine: RwSignal::new(DragMachine::new()),
        drag_just_ended: RwSignal::new(false),
    }
}

/// Mark the drag as just ended and clear the flag after a short delay
pub fn end_drag<K, C>(dnd: &DndSignals<K, C>)
where
    K: Send + Sync + 'static,
    C: Send + Sync + 'static,
{
    dnd.drag_just_ended.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            let _ = clear.try_set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), JUST_ENDED_MS);
        cb.forget();
    }
}

/// Create mousedown handler for draggable elements
/// Records a pending drag with start position
pub fn make_on_mousedown<K, C>(dnd: DndSignals<K, C>, id: K) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore presses on form controls
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some() { return; }
        }
        let id = id.clone();
        dnd.machine.update(|m| m.press(id, ev.client_x(), ev.client_y()));
    }
}

/// Document mousemove: promote a pending press to a drag once it moved
/// past the threshold. Returns true when this motion started the drag.
pub fn handle_mousemove<K, C>(dnd: &DndSignals<K, C>, x: i32, y: i32) -> bool
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    // Only write the signal when the drag actually starts, so plain hovering stays silent
    let starts = dnd
        .machine
        .try_with_untracked(|m| m.is_pending() && m.clone().motion(x, y))
        .unwrap_or(false);
    starts && dnd.machine.try_update(|m| m.motion(x, y)).unwrap_or(false)
}

/// Document mouseup: finish the gesture. `None` for a click, an idle
/// machine, or signals whose owner is gone.
pub fn handle_mouseup<K, C>(dnd: &DndSignals<K, C>) -> Option<DropOutcome<K, C>>
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    if dnd.machine.try_with_untracked(|m| matches!(m.phase(), DragPhase::Idle))? {
        return None;
    }
    dnd.machine.try_update(|m| m.release()).flatten()
}

/// Escape key: cancel an active drag
pub fn handle_escape<K, C>(dnd: &DndSignals<K, C>) -> Option<DropOutcome<K, C>>
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    if dnd.machine.try_with_untracked(|m| m.dragging_id().is_none())? {
        return None;
    }
    dnd.machine.try_update(|m| m.cancel()).flatten()
}

/// Attach a document listener for the lifetime of the page
fn listen<T: ?Sized + wasm_bindgen::closure::WasmClosure>(event: &str, closure: wasm_bindgen::closure::Closure<T>) {
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Create mouseenter handler for a drop region
pub fn make_on_target_mouseenter<K, C>(dnd: DndSignals<K, C>, target: DropTarget<C>) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.machine.with_untracked(|m| m.dragging_id().is_some()) {
            let target = target.clone();
            dnd.machine.update(|m| m.hover(target));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<K, C>(dnd: DndSignals<K, C>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.machine.with_untracked(|m| m.target().is_some()) {
            dnd.machine.update(|m| m.leave());
        }
    }
}

/// Bind the document mouseup (drop), mousemove (drag start) and keydown
/// (Escape cancels) listeners.
///
/// The listeners live as long as the page, so call this once from a
/// component that stays mounted and hand the signals down. Handlers go
/// quiet if the signals' owner is disposed anyway.
pub fn bind_global_mouseup<K, C, F>(dnd: DndSignals<K, C>, on_outcome: F)
where
    K: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
    F: Fn(DropOutcome<K, C>) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_drop = on_outcome.clone();
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        // A click leaves no outcome; the element's click event fires naturally
        if let Some(outcome) = handle_mouseup(&dnd) {
            end_drag(&dnd);
            on_drop(outcome);
        }
    });
    listen("mouseup", on_mouseup);

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        handle_mousemove(&dnd, ev.client_x(), ev.client_y());
    });
    listen("mousemove", on_mousemove);

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() != "Escape" {
            return;
        }
        if let Some(outcome) = handle_escape(&dnd) {
            end_drag(&dnd);
            on_outcome(outcome);
        }
    });
    listen("keydown", on_keydown);
}

#[cfg(test)]
mod tests {
    use super::*;

    type Machine = DragMachine<&'static str, &'static str>;

    fn dragging(id: &'static str) -> Machine {
        let mut m = Machine::new();
        m.press(id, 10, 10);
        assert!(m.motion(30, 10));
        m
    }

    #[test]
    fn test_small_motion_stays_pending() {
        let mut m = Machine::new();
        m.press("c1", 100, 100);
        assert!(!m.motion(103, 104));
        assert!(m.is_pending());
        // Release below threshold is a click
        assert_eq!(m.release(), None);
        assert_eq!(m.phase(), &DragPhase::Idle);
    }

    #[test]
    fn test_drop_on_target() {
        let mut m = dragging("c1");
        m.hover(DropTarget::Zone("list-b", 2));
        assert_eq!(
            m.release(),
            Some(DropOutcome::Dropped { dragged: "c1", target: DropTarget::Zone("list-b", 2) })
        );
        assert_eq!(m.phase(), &DragPhase::Idle);
        assert!(m.target().is_none());
    }

    #[test]
    fn test_drop_outside_after_leave() {
        let mut m = dragging("c1");
        m.hover(DropTarget::Container("list-a"));
        m.leave();
        assert_eq!(m.release(), Some(DropOutcome::DroppedOutside { dragged: "c1" }));
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut m = dragging("c1");
        m.hover(DropTarget::Zone("list-a", 0));
        assert_eq!(m.cancel(), Some(DropOutcome::Cancelled { dragged: "c1" }));
        assert_eq!(m.phase(), &DragPhase::Idle);
        assert_eq!(m.release(), None);
    }

    #[test]
    fn test_hover_ignored_when_not_dragging() {
        let mut m = Machine::new();
        m.hover(DropTarget::Container("list-a"));
        assert!(m.target().is_none());

        m.press("c1", 0, 0);
        m.hover(DropTarget::Container("list-a"));
        assert!(m.target().is_none());
    }

    type Signals = DndSignals<&'static str, &'static str>;

    #[test]
    fn test_document_handlers_drive_the_machine() {
        let owner = Owner::new();
        owner.with(|| {
            let dnd: Signals = create_dnd_signals();
            dnd.machine.update(|m| m.press("c1", 0, 0));
            assert!(!handle_mousemove(&dnd, 2, 2));
            assert!(handle_mousemove(&dnd, 20, 0));
            assert_eq!(dnd.machine.with_untracked(|m| m.dragging_id().cloned()), Some("c1"));

            dnd.machine.update(|m| m.hover(DropTarget::Zone("list-b", 1)));
            assert_eq!(
                handle_mouseup(&dnd),
                Some(DropOutcome::Dropped { dragged: "c1", target: DropTarget::Zone("list-b", 1) })
            );
            assert_eq!(handle_mouseup(&dnd), None);
            assert_eq!(handle_escape(&dnd), None);
        });
    }

    #[test]
    fn test_document_handlers_after_owner_disposed() {
        let owner = Owner::new();
        let dnd: Signals = owner.with(|| {
            let dnd: Signals = create_dnd_signals();
            dnd.machine.update(|m| {
                m.press("c1", 0, 0);
                m.motion(20, 0);
            });
            dnd
        });
        owner.cleanup();

        assert!(!handle_mousemove(&dnd, 40, 0));
        assert_eq!(handle_mouseup(&dnd), None);
        assert_eq!(handle_escape(&dnd), None);
    }

    #[test]
    fn test_press_during_drag_is_ignored() {
        let mut m = dragging("c1");
        m.press("c2", 0, 0);
        assert_eq!(m.dragging_id(), Some(&"c1"));
    }
}

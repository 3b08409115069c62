//! Leptos DragDrop Utilities
//!
//! Mouse-event drag-and-drop for the issue board.
//! A press only becomes a drag once the pointer moves past a small threshold,
//! so clicks on card buttons still work.

use board_core::drag::DragOperation;
use board_core::Status;
use leptos::prelude::*;
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub use board_core::reconcile::DropTarget;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// Delay before `drag_just_ended` clears, in milliseconds
const CLICK_SUPPRESS_MS: i32 = 100;

/// Mouse press on a card that has not turned into a drag yet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingPress {
    pub item_id: u32,
    pub x: i32,
    pub y: i32,
}

impl PendingPress {
    pub fn past_threshold(&self, x: i32, y: i32) -> bool {
        (x - self.x).abs() > DRAG_THRESHOLD_PX || (y - self.y).abs() > DRAG_THRESHOLD_PX
    }
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    /// Active gesture, once past the threshold
    pub drag: RwSignal<Option<DragOperation>>,
    pub pending: RwSignal<Option<PendingPress>>,
    /// True for a moment after a drop so the trailing click can be ignored
    pub drag_just_ended: RwSignal<bool>,
}

pub fn create_dnd_signals() -> DndSignals {
    DndSignals {
        drag: RwSignal::new(None),
        pending: RwSignal::new(None),
        drag_just_ended: RwSignal::new(false),
    }
}

impl DndSignals {
    /// Id of the card being dragged (tracked)
    pub fn dragging_id(&self) -> Option<u32> {
        self.drag.with(|drag| drag.as_ref().map(DragOperation::active_id))
    }

    /// Current drop target (tracked)
    pub fn over(&self) -> Option<DropTarget> {
        self.drag.with(|drag| drag.as_ref().and_then(DragOperation::over))
    }

    fn is_dragging(&self) -> bool {
        self.drag.with_untracked(Option::is_some)
    }

    fn hover(&self, target: DropTarget) {
        if self.is_dragging() {
            self.drag.update(|drag| {
                if let Some(op) = drag {
                    op.hover(target);
                }
            });
        }
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.drag.set(None);
    dnd.pending.set(None);
    dnd.drag_just_ended.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended;
        let cb = Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), CLICK_SUPPRESS_MS);
        cb.forget();
    }
}

fn is_form_control(target: &web_sys::EventTarget) -> bool {
    target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some()
        || target.dyn_ref::<web_sys::HtmlSelectElement>().is_some()
}

/// Create mousedown handler for draggable cards.
/// Records a pending press with its start position.
pub fn make_on_mousedown(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if ev.target().is_some_and(|target| is_form_control(&target)) {
            return;
        }
        dnd.pending.set(Some(PendingPress {
            item_id,
            x: ev.client_x(),
            y: ev.client_y(),
        }));
    }
}

/// Document mousemove: starts the drag once the press moved far enough
pub fn bind_global_mousemove(dnd: DndSignals) {
    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(press) = dnd.pending.get_untracked() else {
            return;
        };
        if !dnd.is_dragging() && press.past_threshold(ev.client_x(), ev.client_y()) {
            debug!("[DND] Drag start: item {}", press.item_id);
            dnd.drag.set(Some(DragOperation::start(press.item_id)));
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for cards. Entering the dragged card itself is ignored.
pub fn make_on_item_mouseenter(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| dnd.hover(DropTarget::Item(item_id))
}

/// Create mouseenter handler for a column's drop zone
pub fn make_on_column_mouseenter(dnd: DndSignals, status: Status) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| dnd.hover(DropTarget::Column(status))
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.is_dragging() {
            dnd.drag.update(|drag| {
                if let Some(op) = drag {
                    op.leave();
                }
            });
        }
    }
}

/// What a document mouseup ends
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// No drag was active; the press stays an ordinary click
    Click,
    /// A drag ended away from every target
    Cancelled,
    Dropped(u32, DropTarget),
}

impl Release {
    pub fn from_drag(drag: Option<DragOperation>) -> Self {
        match drag {
            None => Release::Click,
            Some(op) => match op.finish() {
                Some((dragged, target)) => Release::Dropped(dragged, target),
                None => Release::Cancelled,
            },
        }
    }
}

/// Bind global mouseup handler for drop detection.
///
/// `on_drop` runs at most once per gesture, and only when the pointer was
/// released over a target. A plain click only clears the pending press, so
/// click handlers behind it are not suppressed.
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(u32, DropTarget) + Clone + 'static,
{
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        match Release::from_drag(dnd.drag.get_untracked()) {
            Release::Click => dnd.pending.set(None),
            Release::Cancelled => {
                end_drag(&dnd);
                debug!("[DND] Released without a target");
            }
            Release::Dropped(dragged, target) => {
                end_drag(&dnd);
                on_drop(dragged, target);
            }
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}

//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect, Size};

use crate::adapter::GraphView;
use crate::config::ViewOptions;
use crate::context::ViewContext;
use crate::engine::{DocumentRef, DrawingEngine, EngineError, EngineResult};
use crate::overlay::{ActionId, NoIcons};
use crate::view::{View, ViewId};

/// Tick returned by [`RecordingEngine::record_tick`].
pub const TEST_TICK: i64 = 42;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Engine-facing call recorded by [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    CreateView(ViewId),
    CreateLinkedView { view: ViewId, source_view: ViewId },
    DestroyView(ViewId),
    Resize { view: ViewId, width: u32, height: u32 },
    SubmitCommitted(ViewId),
    SubmitDynamic(ViewId),
    AcquireFront,
    RecordTick,
    RecordUndo { tick: i64, document: u64 },
    Dispatch { action: ActionId, overlays_visible: bool },
    Dispose,
}

/// Knobs controlling how [`RecordingEngine`] answers.
#[derive(Debug)]
pub struct EngineState {
    pub playing: bool,
    pub undo_loading: bool,
    pub undo_recording: bool,
    /// Committed submissions report new content.
    pub new_content: bool,
    pub fail_submissions: bool,
    pub front_document_missing: bool,
    /// Call back into the view from `destroy_view`.
    pub late_callbacks_on_destroy: bool,
    pub late_show_result: Option<bool>,
    /// Request a full regen from inside `resize`.
    pub regen_on_resize: bool,
    /// Request a full regen from inside `dispatch_context_action`.
    pub regen_on_dispatch: bool,
    next_document: u64,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            playing: false,
            undo_loading: false,
            undo_recording: true,
            new_content: true,
            fail_submissions: false,
            front_document_missing: false,
            late_callbacks_on_destroy: false,
            late_show_result: None,
            regen_on_resize: false,
            regen_on_dispatch: false,
            next_document: 1,
        }
    }
}

/// Engine that records every call. Clones share state and call log.
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    pub state: Rc<RefCell<EngineState>>,
    calls: Rc<RefCell<Vec<EngineCall>>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&EngineCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: EngineCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl DrawingEngine for RecordingEngine {
    fn create_view(&mut self, view: &mut dyn GraphView) {
        self.record(EngineCall::CreateView(view.view_id()));
    }

    fn create_linked_view(&mut self, view: &mut dyn GraphView, _source: &Self, source_view: ViewId) {
        self.record(EngineCall::CreateLinkedView {
            view: view.view_id(),
            source_view,
        });
    }

    fn destroy_view(&mut self, view: &mut dyn GraphView) {
        self.record(EngineCall::DestroyView(view.view_id()));

        let late = self.state.borrow().late_callbacks_on_destroy;
        if late {
            view.on_full_regen(self, true);
            view.on_redraw(self, true);
            let shown = view.show_context_actions(&[1], &[Point::ZERO], Rect::ZERO);
            self.state.borrow_mut().late_show_result = Some(shown);
        }
    }

    fn resize(&mut self, view: &mut dyn GraphView, width: u32, height: u32) {
        self.record(EngineCall::Resize {
            view: view.view_id(),
            width,
            height,
        });

        let regen = self.state.borrow().regen_on_resize;
        if regen {
            view.on_full_regen(self, true);
        }
    }

    fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    fn is_undo_loading(&self) -> bool {
        self.state.borrow().undo_loading
    }

    fn is_undo_recording(&self) -> bool {
        self.state.borrow().undo_recording
    }

    fn submit_committed_document(&mut self, view: ViewId) -> EngineResult<bool> {
        self.record(EngineCall::SubmitCommitted(view));
        let state = self.state.borrow();
        if state.fail_submissions {
            return Err(EngineError::Submission("rejected".to_string()));
        }
        Ok(state.new_content)
    }

    fn submit_dynamic_shapes(&mut self, view: ViewId) -> EngineResult<()> {
        self.record(EngineCall::SubmitDynamic(view));
        if self.state.borrow().fail_submissions {
            return Err(EngineError::Submission("rejected".to_string()));
        }
        Ok(())
    }

    fn acquire_front_document(&mut self) -> EngineResult<DocumentRef> {
        self.record(EngineCall::AcquireFront);
        let mut state = self.state.borrow_mut();
        if state.front_document_missing {
            return Err(EngineError::DocumentUnavailable);
        }
        let document = DocumentRef(state.next_document);
        state.next_document += 1;
        Ok(document)
    }

    fn record_tick(&mut self, _new_recording: bool, _wall_clock_ms: i64) -> i64 {
        self.record(EngineCall::RecordTick);
        TEST_TICK
    }

    fn record_undo_snapshot(
        &mut self,
        _new_recording: bool,
        tick: i64,
        document: DocumentRef,
        _aux_a: i32,
        _aux_b: i32,
    ) {
        self.record(EngineCall::RecordUndo {
            tick,
            document: document.0,
        });
    }

    fn dispatch_context_action(&mut self, view: &mut dyn GraphView, action: ActionId) -> bool {
        self.record(EngineCall::Dispatch {
            action,
            overlays_visible: view.is_context_actions_visible(),
        });

        let regen = self.state.borrow().regen_on_dispatch;
        if regen {
            view.on_full_regen(self, true);
        }
        true
    }

    fn dispose(&mut self) {
        self.record(EngineCall::Dispose);
    }
}

/// Primary 800x600 view without icons, in its own context.
pub fn test_view(engine: &RecordingEngine) -> View<RecordingEngine> {
    test_view_with(engine, &ViewOptions::default())
}

pub fn test_view_with(engine: &RecordingEngine, options: &ViewOptions) -> View<RecordingEngine> {
    View::new(
        engine.clone(),
        &Size::new(800.0, 600.0),
        Rc::new(NoIcons),
        options,
        Rc::new(ViewContext::new()),
    )
}

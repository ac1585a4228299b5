//! Navigation state machine: a bounded stack of screens.
//!
//! The stack holds at most [`MENU_STACK_DEPTH`] entries, root included. The
//! root is never popped. Pushing onto a full stack is a silent no-op
//! (embedded reality: bounded buffer).
//!
//! Screens never touch the stack directly. They queue [`NavRequest`]s on
//! their [`Context`]; the navigator applies them once the handler returns,
//! running the new top's first-run pass after every change.

use heapless::{Deque, Vec};
use input::{Key, KeyEvent};
use platform::config::MENU_STACK_DEPTH;
use platform::Tone;

use crate::event::UiEvent;
use crate::quick_keys::{QuickKeyGesture, QuickKeys};
use crate::screen::{Registry, RegistryError, RotaryMapping, ScreenId};
use crate::status::{select_tone, MenuStatus, QsoFlags};

/// Requests a single handler call may queue.
pub const MAX_REQUESTS: usize = 4;

/// Requests waiting to be applied within one operation.
const REQUEST_QUEUE: usize = 8;

/// Bound on stack changes applied per operation, first-run chains included.
const MAX_CHAINED_CHANGES: usize = 32;

/// Called once when the screen that registered it leaves the stack.
pub struct ExitCallback<A> {
    /// Callback
    pub func: fn(&mut A, u32),
    /// Opaque data passed back to `func`
    pub data: u32,
}

impl<A> ExitCallback<A> {
    fn invoke(self, app: &mut A) {
        (self.func)(app, self.data);
    }
}

impl<A> Clone for ExitCallback<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for ExitCallback<A> {}

impl<A> core::fmt::Debug for ExitCallback<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExitCallback")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

/// Stack change requested by a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavRequest {
    /// Enter a screen.
    Push(ScreenId),
    /// Leave the active screen.
    Pop,
    /// Unwind to the root.
    PopAllRoot,
    /// Unwind and replace the root.
    PopAllSpecific(ScreenId),
}

struct Slot<A> {
    id: ScreenId,
    saved_item_index: usize,
    exit: Option<ExitCallback<A>>,
}

impl<A> Slot<A> {
    fn new(id: ScreenId) -> Self {
        Self {
            id,
            saved_item_index: 0,
            exit: None,
        }
    }
}

/// Handle a screen gets for the duration of one handler call.
pub struct Context<'a, A> {
    app: &'a mut A,
    screen: ScreenId,
    depth: usize,
    first_run: bool,
    item_index: usize,
    last_item_index: usize,
    qso: QsoFlags,
    now: u32,
    effects: Effects<A>,
}

struct Effects<A> {
    requests: Vec<NavRequest, MAX_REQUESTS>,
    exit: Option<ExitCallback<A>>,
    quick_key_action: Option<u16>,
    alpha_mode: Option<bool>,
}

impl<A> Effects<A> {
    const fn new() -> Self {
        Self {
            requests: Vec::new(),
            exit: None,
            quick_key_action: None,
            alpha_mode: None,
        }
    }
}

impl<'a, A> Context<'a, A> {
    /// Application state.
    pub fn app(&mut self) -> &mut A {
        self.app
    }

    /// ID of the screen being called.
    pub fn screen_id(&self) -> ScreenId {
        self.screen
    }

    /// Stack depth, root included.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// `true` during the first-run pass.
    pub fn is_first_run(&self) -> bool {
        self.first_run
    }

    /// Tick timestamp.
    pub fn now(&self) -> u32 {
        self.now
    }

    /// Selected item of the active screen.
    pub fn item_index(&self) -> usize {
        self.item_index
    }

    /// Move the selection.
    pub fn set_item_index(&mut self, index: usize) {
        self.item_index = index;
    }

    /// Item index this screen had when it was last left.
    pub fn last_item_index(&self) -> usize {
        self.last_item_index
    }

    /// One-shot QSO display flags for this dispatch.
    pub fn qso_flags(&self) -> QsoFlags {
        self.qso
    }

    fn request(&mut self, request: NavRequest) {
        if self.effects.requests.push(request).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("screen {} dropped {}", self.screen, request);
        }
    }

    /// Enter `id` once this handler returns.
    pub fn push(&mut self, id: ScreenId) {
        self.request(NavRequest::Push(id));
    }

    /// Leave this screen once the handler returns.
    pub fn pop(&mut self) {
        self.request(NavRequest::Pop);
    }

    /// Unwind to the root once the handler returns.
    pub fn pop_all_and_display_root(&mut self) {
        self.request(NavRequest::PopAllRoot);
    }

    /// Unwind and make `id` the new root once the handler returns.
    pub fn pop_all_and_display_specific_root(&mut self, id: ScreenId) {
        self.request(NavRequest::PopAllSpecific(id));
    }

    /// Run `func(app, data)` when this screen leaves the stack.
    ///
    /// Only honoured during the screen's first run. A later registration in
    /// the same first run replaces the earlier one.
    pub fn register_exit_callback(&mut self, func: fn(&mut A, u32), data: u32) {
        if self.first_run {
            self.effects.exit = Some(ExitCallback { func, data });
        } else {
            #[cfg(feature = "defmt")]
            defmt::debug!("screen {} exit callback outside first run ignored", self.screen);
        }
    }

    /// Report a bindable action. Bound to a digit if quick-key capture is
    /// armed, ignored otherwise.
    pub fn record_quick_key_action(&mut self, function: u16) {
        self.effects.quick_key_action = Some(function);
    }

    /// Ask the keyboard to switch multi-tap text entry on or off.
    pub fn set_alpha_mode(&mut self, enabled: bool) {
        self.effects.alpha_mode = Some(enabled);
    }
}

/// What the caller should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// Status returned by the active screen.
    pub status: MenuStatus,
    /// Feedback tone to play.
    pub tone: Option<Tone>,
    /// Input arrived: keep the backlight on.
    pub wake_backlight: bool,
    /// Requested keyboard alpha mode change.
    pub alpha_mode: Option<bool>,
}

/// The menu stack navigator.
pub struct Navigator<'s, A> {
    registry: Registry<'s, A>,
    stack: Vec<Slot<A>, MENU_STACK_DEPTH>,
    item_index: usize,
    quick_keys: QuickKeys,
    qso: QsoFlags,
    alpha_request: Option<bool>,
    alpha_active: bool,
    now: u32,
}

impl<'s, A> Navigator<'s, A> {
    /// Create a navigator with `root` at the bottom of the stack.
    ///
    /// The root's first run happens in [`start`](Self::start).
    ///
    /// # Errors
    ///
    /// [`RegistryError::Unknown`] if `root` is not registered.
    pub fn new(registry: Registry<'s, A>, root: ScreenId) -> Result<Self, RegistryError> {
        if !registry.contains(root) {
            return Err(RegistryError::Unknown(root.0));
        }
        let mut stack = Vec::new();
        // Cannot fail: the stack starts empty.
        let _ = stack.push(Slot::new(root));
        Ok(Self {
            registry,
            stack,
            item_index: 0,
            quick_keys: QuickKeys::new(),
            qso: QsoFlags::empty(),
            alpha_request: None,
            alpha_active: false,
            now: 0,
        })
    }

    /// Run the root screen's first-run pass.
    pub fn start(&mut self, app: &mut A) -> MenuStatus {
        self.run_first(app)
    }

    /// Active screen.
    #[must_use]
    pub fn current(&self) -> Option<ScreenId> {
        self.stack.last().map(|s| s.id)
    }

    /// Number of entries on the stack, root included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Screen at `position` (0 = root).
    #[must_use]
    pub fn screen_at(&self, position: usize) -> Option<ScreenId> {
        self.stack.get(position).map(|s| s.id)
    }

    /// Selected item of the active screen.
    #[must_use]
    pub fn item_index(&self) -> usize {
        self.item_index
    }

    /// `true` if the active stack slot has an exit callback registered.
    #[must_use]
    pub fn has_exit_callback(&self) -> bool {
        self.stack.last().is_some_and(|s| s.exit.is_some())
    }

    /// Registered screens.
    pub fn registry(&self) -> &Registry<'s, A> {
        &self.registry
    }

    /// Quick-key bindings and state.
    pub fn quick_keys(&self) -> &QuickKeys {
        &self.quick_keys
    }

    /// Mutable quick-key state, e.g. to restore saved bindings.
    pub fn quick_keys_mut(&mut self) -> &mut QuickKeys {
        &mut self.quick_keys
    }

    /// Raise one-shot QSO display flags for the next dispatch.
    pub fn raise_qso_flags(&mut self, flags: QsoFlags) {
        self.qso |= flags;
    }

    /// Pending QSO display flags.
    #[must_use]
    pub fn qso_flags(&self) -> QsoFlags {
        self.qso
    }

    /// `true` while a screen has alpha mode switched on. Digits belong to
    /// text entry then, so quick-key gestures are not recognised.
    #[must_use]
    pub fn alpha_active(&self) -> bool {
        self.alpha_active
    }

    /// Take the most recent alpha-mode request from any handler call.
    pub fn take_alpha_request(&mut self) -> Option<bool> {
        self.alpha_request.take()
    }

    // ── Stack operations ────────────────────────────────────────────────────

    /// Enter `id`. No-op when the stack is full or `id` is unknown.
    pub fn push(&mut self, app: &mut A, id: ScreenId) {
        self.apply(app, NavRequest::Push(id));
    }

    /// Leave the active screen. At the root only the root's exit callback
    /// runs; the stack is left unchanged.
    pub fn pop(&mut self, app: &mut A) {
        self.apply(app, NavRequest::Pop);
    }

    /// Unwind to the root, running every exit callback top-down.
    pub fn pop_all_and_display_root(&mut self, app: &mut A) {
        self.apply(app, NavRequest::PopAllRoot);
    }

    /// Unwind and replace the root with `id`. The old root's exit callback
    /// runs too, since it is replaced.
    pub fn pop_all_and_display_specific_root(&mut self, app: &mut A, id: ScreenId) {
        self.apply(app, NavRequest::PopAllSpecific(id));
    }

    /// Apply `first` and every request queued by the first-run passes it
    /// triggers.
    fn apply(&mut self, app: &mut A, first: NavRequest) {
        let mut queue: Deque<NavRequest, REQUEST_QUEUE> = Deque::new();
        let _ = queue.push_back(first);
        let mut budget = MAX_CHAINED_CHANGES;

        while let Some(request) = queue.pop_front() {
            if budget == 0 {
                #[cfg(feature = "defmt")]
                defmt::warn!("navigation chain too long, dropping {}", request);
                break;
            }
            budget = budget.saturating_sub(1);

            if !self.change(app, request) {
                continue;
            }
            self.quick_keys.cancel_capture();
            let (_, requests) = self.dispatch(app, &UiEvent::quiet(self.now), true);
            for r in requests {
                if queue.push_back(r).is_err() {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("navigation queue full, dropping {}", r);
                }
            }
        }
    }

    /// Perform one stack change. Returns `true` if the active screen changed.
    fn change(&mut self, app: &mut A, request: NavRequest) -> bool {
        #[cfg(feature = "defmt")]
        defmt::debug!("nav {} at depth {}", request, self.depth());

        match request {
            NavRequest::Push(id) => self.push_slot(id),
            NavRequest::Pop => self.pop_slot(app),
            NavRequest::PopAllRoot => {
                self.unwind(app);
                self.item_index = self.stack.first().map_or(0, |s| s.saved_item_index);
                true
            }
            NavRequest::PopAllSpecific(id) => {
                debug_assert!(self.registry.contains(id), "unknown screen {}", id.0);
                if !self.registry.contains(id) {
                    return false;
                }
                self.unwind(app);
                if let Some(root) = self.stack.first_mut() {
                    if let Some(exit) = root.exit.take() {
                        exit.invoke(app);
                    }
                    *root = Slot::new(id);
                }
                self.item_index = 0;
                true
            }
        }
    }

    fn push_slot(&mut self, id: ScreenId) -> bool {
        debug_assert!(self.registry.contains(id), "unknown screen {}", id.0);
        if !self.registry.contains(id) || self.stack.is_full() {
            #[cfg(feature = "defmt")]
            defmt::debug!("push {} ignored", id);
            return false;
        }
        self.save_item_index();
        // Cannot fail: fullness checked above.
        let _ = self.stack.push(Slot::new(id));
        self.item_index = 0;
        true
    }

    fn pop_slot(&mut self, app: &mut A) -> bool {
        self.save_item_index();
        if self.stack.len() <= 1 {
            // Root stays registered and active: its callback runs on every
            // pop attempt.
            if let Some(exit) = self.stack.first().and_then(|s| s.exit) {
                exit.invoke(app);
            }
            return false;
        }
        if let Some(slot) = self.stack.pop() {
            if let Some(exit) = slot.exit {
                exit.invoke(app);
            }
        }
        self.item_index = self.stack.last().map_or(0, |s| s.saved_item_index);
        true
    }

    /// Pop everything above the root, running exit callbacks top-down.
    fn unwind(&mut self, app: &mut A) {
        self.save_item_index();
        while self.stack.len() > 1 {
            if let Some(slot) = self.stack.pop() {
                if let Some(exit) = slot.exit {
                    exit.invoke(app);
                }
            }
        }
    }

    fn save_item_index(&mut self) {
        let index = self.item_index;
        if let Some(top) = self.stack.last_mut() {
            top.saved_item_index = index;
            let id = top.id;
            self.registry.remember_item_index(id, index);
        }
    }

    // ── Dispatch ────────────────────────────────────────────────────────────

    fn run_first(&mut self, app: &mut A) -> MenuStatus {
        let (status, requests) = self.dispatch(app, &UiEvent::quiet(self.now), true);
        self.apply_all(app, requests);
        status
    }

    fn apply_all(&mut self, app: &mut A, requests: Vec<NavRequest, MAX_REQUESTS>) {
        for request in requests {
            self.apply(app, request);
        }
    }

    /// Call the active screen and absorb its side effects, except for
    /// navigation requests which are returned.
    fn dispatch(
        &mut self,
        app: &mut A,
        event: &UiEvent,
        first_run: bool,
    ) -> (MenuStatus, Vec<NavRequest, MAX_REQUESTS>) {
        let Some(id) = self.current() else {
            return (MenuStatus::empty(), Vec::new());
        };
        let depth = self.depth();
        let mut cx = Context {
            app,
            screen: id,
            depth,
            first_run,
            item_index: self.item_index,
            last_item_index: 0,
            qso: self.qso,
            now: self.now,
            effects: Effects::new(),
        };

        debug_assert!(self.registry.contains(id), "unknown screen {}", id.0);
        let Some(entry) = self.registry.entry_mut(id) else {
            return (MenuStatus::empty(), Vec::new());
        };
        cx.last_item_index = entry.last_item_index;
        let status = entry.screen.handle_event(&mut cx, event, first_run);

        let item_index = cx.item_index;
        let effects = cx.effects;
        self.item_index = item_index;
        if let Some(exit) = effects.exit {
            if let Some(top) = self.stack.last_mut() {
                top.exit = Some(exit);
            }
        }
        if let Some(function) = effects.quick_key_action {
            self.quick_keys.record(id, function);
        }
        if let Some(enabled) = effects.alpha_mode {
            self.alpha_request = Some(enabled);
            self.alpha_active = enabled;
        }
        (status, effects.requests)
    }

    // ── Per-tick driver ─────────────────────────────────────────────────────

    /// Feed one tick's event to the active screen.
    pub fn tick(&mut self, app: &mut A, event: UiEvent) -> TickOutcome {
        self.now = event.time;
        let mut outcome = TickOutcome {
            wake_backlight: event.has_event,
            ..TickOutcome::default()
        };

        if let Some(revert) = self.quick_keys.tick() {
            if self.depth() == revert.depth && self.current() == Some(revert.screen) {
                #[cfg(feature = "defmt")]
                defmt::debug!("quick key replay on {} not confirmed, reverting", revert.screen);
                self.pop(app);
            }
        }

        let gesture = if self.alpha_active {
            QuickKeyGesture::None
        } else {
            QuickKeyGesture::of(&event)
        };
        match gesture {
            QuickKeyGesture::Capture(digit) => {
                self.quick_keys.arm_capture(digit);
                outcome.alpha_mode = self.alpha_request.take();
                return outcome;
            }
            QuickKeyGesture::Replay(digit) => {
                if let Some(binding) = self.quick_keys.binding(digit) {
                    outcome.status = self.replay(app, binding.screen, binding.function);
                }
                outcome.alpha_mode = self.alpha_request.take();
                return outcome;
            }
            QuickKeyGesture::None => {}
        }

        let event = self.remap_rotary(event);
        let (status, requests) = self.dispatch(app, &event, false);
        self.apply_all(app, requests);

        if status.contains(MenuStatus::SUCCESS) && event.is_user() {
            self.quick_keys.confirm();
        }
        self.qso = QsoFlags::empty();

        outcome.status = status;
        outcome.tone = select_tone(status, &event, self.item_index);
        outcome.alpha_mode = self.alpha_request.take();
        outcome
    }

    fn replay(&mut self, app: &mut A, screen: ScreenId, function: u16) -> MenuStatus {
        if !self.registry.contains(screen) {
            return MenuStatus::empty();
        }
        let opened = if self.current() == Some(screen) {
            false
        } else {
            let depth = self.depth();
            self.push(app, screen);
            if self.depth() == depth || self.current() != Some(screen) {
                return MenuStatus::empty();
            }
            true
        };

        let event = UiEvent::function(function, self.now);
        let (status, requests) = self.dispatch(app, &event, false);
        self.apply_all(app, requests);

        if opened && self.current() == Some(screen) {
            self.quick_keys.start_revert(screen, self.depth());
        }
        status
    }

    fn remap_rotary(&mut self, mut event: UiEvent) -> UiEvent {
        let Some(key) = event.key.key.filter(|k| k.is_rotary()) else {
            return event;
        };
        let Some(entry) = self.current().and_then(|id| self.registry.entry_mut(id)) else {
            return event;
        };
        let increment = key == Key::RotaryIncrement;
        let mapped = match entry.screen.rotary_mapping() {
            RotaryMapping::Raw => key,
            RotaryMapping::UpDown if increment => Key::Down,
            RotaryMapping::UpDown => Key::Up,
            RotaryMapping::LeftRight if increment => Key::Right,
            RotaryMapping::LeftRight => Key::Left,
        };
        event.key = KeyEvent {
            key: Some(mapped),
            modifiers: event.key.modifiers,
        };
        event
    }
}

//! Scripted screens shared by the navigator integration tests.
#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
#![allow(dead_code)]
#![allow(unused_macros)]

use input::{Key, KeyModifiers};
use ui::{Context, MenuStatus, RotaryMapping, Screen, ScreenId, UiEvent};

/// Build a navigator rooted at `ROOT` from `id => &mut screen` pairs.
macro_rules! navigator {
    ($($id:expr => $screen:expr),+ $(,)?) => {{
        let mut registry = ui::Registry::<common::App>::new();
        $( registry.register($id, $screen).unwrap(); )+
        ui::Navigator::new(registry, common::ROOT).unwrap()
    }};
}

pub const ROOT: ScreenId = ScreenId(0);
pub const A: ScreenId = ScreenId(1);
pub const B: ScreenId = ScreenId(2);
pub const OPTIONS: ScreenId = ScreenId(3);

/// Function code the options screen binds to quick keys.
pub const STEP_UP: u16 = 1;

/// Application state the recording screens write into.
#[derive(Default)]
pub struct App {
    pub first_runs: Vec<ScreenId>,
    pub exits: Vec<u32>,
    pub events: Vec<(ScreenId, UiEvent)>,
    pub volume: u32,
    pub volume_committed: bool,
}

pub fn note_exit(app: &mut App, data: u32) {
    app.exits.push(data);
}

/// Restore the volume saved when the options screen opened, unless the
/// change was committed.
pub fn rollback_volume(app: &mut App, saved: u32) {
    app.exits.push(saved);
    if !app.volume_committed {
        app.volume = saved;
    }
}

/// Generic screen: records calls, optional exit callback, optional push on
/// Green, pop on Red, Down moves the selection.
pub struct Recorder {
    pub exit_data: Option<u32>,
    pub green_pushes: Option<ScreenId>,
    pub status: MenuStatus,
    pub mapping: RotaryMapping,
    pub late_exit: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            exit_data: None,
            green_pushes: None,
            status: MenuStatus::empty(),
            mapping: RotaryMapping::UpDown,
            late_exit: false,
        }
    }

    pub fn with_exit(mut self, data: u32) -> Self {
        self.exit_data = Some(data);
        self
    }

    pub fn pushing(mut self, id: ScreenId) -> Self {
        self.green_pushes = Some(id);
        self
    }

    pub fn returning(mut self, status: MenuStatus) -> Self {
        self.status = status;
        self
    }
}

impl Screen<App> for Recorder {
    fn handle_event(&mut self, cx: &mut Context<'_, App>, event: &UiEvent, first_run: bool) -> MenuStatus {
        let id = cx.screen_id();
        if first_run {
            cx.app().first_runs.push(id);
            if let Some(data) = self.exit_data {
                cx.register_exit_callback(note_exit, data);
            }
            return MenuStatus::empty();
        }
        cx.app().events.push((id, *event));
        if self.late_exit {
            cx.register_exit_callback(note_exit, 999);
        }
        if event.key.is(Key::Down, KeyModifiers::PRESS) {
            let next = cx.item_index() + 1;
            cx.set_item_index(next);
        }
        if event.key.is(Key::Green, KeyModifiers::PRESS) {
            if let Some(target) = self.green_pushes {
                cx.push(target);
            }
        }
        if event.key.is(Key::Red, KeyModifiers::PRESS) {
            cx.pop();
        }
        self.status
    }

    fn rotary_mapping(&self) -> RotaryMapping {
        self.mapping
    }
}

/// Volume options screen: Right steps the volume and is quick-key bindable,
/// Green confirms, Red leaves. Leaving without confirmation rolls back.
pub struct VolumeOptions;

impl VolumeOptions {
    pub fn new() -> Self {
        Self
    }
}

impl Screen<App> for VolumeOptions {
    fn handle_event(&mut self, cx: &mut Context<'_, App>, event: &UiEvent, first_run: bool) -> MenuStatus {
        if first_run {
            cx.app().volume_committed = false;
            let saved = cx.app().volume;
            cx.register_exit_callback(rollback_volume, saved);
            return MenuStatus::LIST_TYPE;
        }
        if event.function == STEP_UP {
            cx.app().volume += 1;
            return MenuStatus::LIST_TYPE;
        }
        if event.key.is(Key::Right, KeyModifiers::PRESS) {
            cx.app().volume += 1;
            cx.record_quick_key_action(STEP_UP);
            return MenuStatus::LIST_TYPE;
        }
        if event.key.is(Key::Green, KeyModifiers::PRESS) {
            cx.app().volume_committed = true;
            return MenuStatus::SUCCESS;
        }
        if event.key.is(Key::Red, KeyModifiers::PRESS) {
            cx.pop();
        }
        MenuStatus::LIST_TYPE
    }

    fn rotary_mapping(&self) -> RotaryMapping {
        RotaryMapping::LeftRight
    }
}

pub fn press(key: Key, time: u32) -> UiEvent {
    UiEvent::key(key, KeyModifiers::DOWN | KeyModifiers::PRESS, time)
}

pub fn long_press(key: Key, time: u32) -> UiEvent {
    UiEvent::key(key, KeyModifiers::LONG | KeyModifiers::DOWN, time)
}

/// `key` pressed while SK2 is held.
pub fn sk2_press(key: Key, time: u32) -> UiEvent {
    let mut event = press(key, time);
    event.buttons = input::ButtonMask::SK2;
    event.sources |= ui::EventSources::BUTTON;
    event
}

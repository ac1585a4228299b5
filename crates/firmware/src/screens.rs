//! Demo screens driving the navigator on the target.
//!
//! - [`HomeScreen`] (root): channel display, direct channel entry, PTT
//! - [`OptionsScreen`]: volume / squelch list, quick-key bindable, rolled back
//!   unless confirmed
//! - [`NameEntryScreen`]: contact name entry through the alpha multi-tap

use heapless::String;
use input::{ButtonMask, Key, KeyModifiers};
use ui::{Context, MenuStatus, QsoFlags, Registry, RegistryError, RotaryMapping, Screen, ScreenId, UiEvent};

/// Root screen.
pub const HOME: ScreenId = ScreenId(0);
/// Volume and squelch options.
pub const OPTIONS: ScreenId = ScreenId(1);
/// Contact name entry.
pub const NAME_ENTRY: ScreenId = ScreenId(2);

/// Quick-key function codes of [`OptionsScreen`].
pub mod function {
    /// Volume one step up.
    pub const VOLUME_UP: u16 = 1;
    /// Volume one step down.
    pub const VOLUME_DOWN: u16 = 2;
    /// Squelch one step up.
    pub const SQUELCH_UP: u16 = 3;
    /// Squelch one step down.
    pub const SQUELCH_DOWN: u16 = 4;
}

/// Highest channel number.
pub const CHANNEL_COUNT: u16 = 1024;
/// Highest volume step.
pub const MAX_VOLUME: u8 = 15;
/// Highest squelch level.
pub const MAX_SQUELCH: u8 = 9;
/// Longest contact name.
pub const NAME_LEN: usize = 16;

const ENTRY_DIGITS: usize = 4;

/// Radio state the demo screens operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Radio {
    /// Current channel, 1-based.
    pub channel: u16,
    /// Audio volume step.
    pub volume: u8,
    /// Squelch level.
    pub squelch: u8,
    /// PTT is held.
    pub transmitting: bool,
    /// Caller banner requested by the last QSO update.
    pub caller_banner: bool,
    /// Contact name.
    pub contact_name: String<NAME_LEN>,
    options_confirmed: bool,
}

impl Radio {
    /// Power-on state.
    pub const fn new() -> Self {
        Self {
            channel: 1,
            volume: 8,
            squelch: 3,
            transmitting: false,
            caller_banner: false,
            contact_name: String::new(),
            options_confirmed: false,
        }
    }
}

impl Default for Radio {
    fn default() -> Self {
        Self::new()
    }
}

fn pressed(event: &UiEvent, key: Key) -> bool {
    event.key.is(key, KeyModifiers::PRESS)
}

/// Root screen.
#[derive(Debug, Default)]
pub struct HomeScreen {
    entry: String<ENTRY_DIGITS>,
}

impl HomeScreen {
    /// Empty entry buffer.
    pub const fn new() -> Self {
        Self { entry: String::new() }
    }

    /// Digits typed so far.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    fn step_channel(radio: &mut Radio, up: bool) {
        radio.channel = match (up, radio.channel) {
            (true, c) if c >= CHANNEL_COUNT => 1,
            (true, c) => c.saturating_add(1),
            (false, c) if c <= 1 => CHANNEL_COUNT,
            (false, c) => c.saturating_sub(1),
        };
    }

    fn commit_entry(&mut self, radio: &mut Radio) -> MenuStatus {
        let parsed = self.entry.parse::<u16>().ok();
        self.entry.clear();
        match parsed {
            Some(ch) if (1..=CHANNEL_COUNT).contains(&ch) => {
                radio.channel = ch;
                MenuStatus::SUCCESS
            }
            _ => MenuStatus::ERROR,
        }
    }
}

impl Screen<Radio> for HomeScreen {
    fn handle_event(&mut self, cx: &mut Context<'_, Radio>, event: &UiEvent, first_run: bool) -> MenuStatus {
        if cx.qso_flags().contains(QsoFlags::CALLER_DATA) {
            cx.app().caller_banner = true;
        }
        if first_run {
            self.entry.clear();
            return MenuStatus::empty();
        }
        // Held bits are sampled every tick, even while a combo hides the
        // button change events. Replayed functions carry no buttons.
        if !event.sources.contains(ui::EventSources::FUNCTION) {
            cx.app().transmitting = event.buttons.contains(ButtonMask::PTT);
        }
        if event.sources.contains(ui::EventSources::BUTTON)
            && event.buttons.contains(ButtonMask::SK1_SHORT_UP)
        {
            cx.push(NAME_ENTRY);
        }

        let Some(key) = event.key.key else {
            return MenuStatus::empty();
        };
        if !event.key.modifiers.contains(KeyModifiers::PRESS) {
            return MenuStatus::empty();
        }
        if let Some(digit) = key.digit() {
            let c = char::from(b'0'.saturating_add(digit));
            return if self.entry.push(c).is_ok() {
                MenuStatus::INPUT_TYPE
            } else {
                MenuStatus::ERROR
            };
        }
        match key {
            Key::Green if self.entry.is_empty() => {
                cx.push(OPTIONS);
                MenuStatus::empty()
            }
            Key::Green => self.commit_entry(cx.app()),
            Key::Red => {
                self.entry.clear();
                cx.app().caller_banner = false;
                MenuStatus::empty()
            }
            Key::Up | Key::RotaryIncrement => {
                Self::step_channel(cx.app(), true);
                MenuStatus::empty()
            }
            Key::Down | Key::RotaryDecrement => {
                Self::step_channel(cx.app(), false);
                MenuStatus::empty()
            }
            _ => MenuStatus::empty(),
        }
    }

    fn rotary_mapping(&self) -> RotaryMapping {
        RotaryMapping::Raw
    }
}

const OPTION_ITEMS: usize = 2;
const ITEM_VOLUME: usize = 0;

fn pack_options(radio: &Radio) -> u32 {
    u32::from_le_bytes([radio.volume, radio.squelch, 0, 0])
}

/// Exit callback of [`OptionsScreen`]: undo unconfirmed changes.
pub fn restore_options(radio: &mut Radio, saved: u32) {
    if radio.options_confirmed {
        return;
    }
    let [volume, squelch, _, _] = saved.to_le_bytes();
    radio.volume = volume;
    radio.squelch = squelch;
    #[cfg(feature = "defmt")]
    defmt::debug!("options rolled back to volume {} squelch {}", volume, squelch);
}

/// Volume / squelch list.
#[derive(Debug, Default)]
pub struct OptionsScreen;

impl OptionsScreen {
    /// Create the screen.
    pub const fn new() -> Self {
        Self
    }

    fn apply(radio: &mut Radio, code: u16) -> bool {
        match code {
            function::VOLUME_UP if radio.volume < MAX_VOLUME => radio.volume = radio.volume.saturating_add(1),
            function::VOLUME_DOWN => radio.volume = radio.volume.saturating_sub(1),
            function::SQUELCH_UP if radio.squelch < MAX_SQUELCH => radio.squelch = radio.squelch.saturating_add(1),
            function::SQUELCH_DOWN => radio.squelch = radio.squelch.saturating_sub(1),
            function::VOLUME_UP | function::SQUELCH_UP => {}
            _ => return false,
        }
        true
    }
}

impl Screen<Radio> for OptionsScreen {
    fn handle_event(&mut self, cx: &mut Context<'_, Radio>, event: &UiEvent, first_run: bool) -> MenuStatus {
        if first_run {
            cx.app().options_confirmed = false;
            let saved = pack_options(cx.app());
            cx.register_exit_callback(restore_options, saved);
            return MenuStatus::LIST_TYPE;
        }
        if event.sources.contains(ui::EventSources::FUNCTION) {
            return if Self::apply(cx.app(), event.function) {
                MenuStatus::LIST_TYPE
            } else {
                MenuStatus::ERROR
            };
        }

        let item = cx.item_index();
        let step = if pressed(event, Key::Right) {
            Some(true)
        } else if pressed(event, Key::Left) {
            Some(false)
        } else {
            None
        };
        if let Some(up) = step {
            let code = match (item == ITEM_VOLUME, up) {
                (true, true) => function::VOLUME_UP,
                (true, false) => function::VOLUME_DOWN,
                (false, true) => function::SQUELCH_UP,
                (false, false) => function::SQUELCH_DOWN,
            };
            Self::apply(cx.app(), code);
            cx.record_quick_key_action(code);
        } else if pressed(event, Key::Down) {
            let next = item.saturating_add(1);
            cx.set_item_index(if next >= OPTION_ITEMS { 0 } else { next });
        } else if pressed(event, Key::Up) {
            cx.set_item_index(item.checked_sub(1).unwrap_or(OPTION_ITEMS.saturating_sub(1)));
        } else if pressed(event, Key::Green) {
            cx.app().options_confirmed = true;
            cx.pop();
            return MenuStatus::LIST_TYPE | MenuStatus::SUCCESS;
        } else if pressed(event, Key::Red) {
            cx.pop();
        }
        MenuStatus::LIST_TYPE
    }

    fn rotary_mapping(&self) -> RotaryMapping {
        RotaryMapping::LeftRight
    }
}

/// Contact name entry using the alpha multi-tap.
#[derive(Debug, Default)]
pub struct NameEntryScreen {
    name: String<NAME_LEN>,
}

impl NameEntryScreen {
    /// Create the screen.
    pub const fn new() -> Self {
        Self { name: String::new() }
    }

    /// Name typed so far.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn leave(cx: &mut Context<'_, Radio>) {
        cx.set_alpha_mode(false);
        cx.pop();
    }
}

impl Screen<Radio> for NameEntryScreen {
    fn handle_event(&mut self, cx: &mut Context<'_, Radio>, event: &UiEvent, first_run: bool) -> MenuStatus {
        if first_run {
            self.name.clone_from(&cx.app().contact_name);
            cx.set_alpha_mode(true);
            return MenuStatus::INPUT_TYPE;
        }
        match event.key.key {
            Some(Key::Char(c)) if event.is_press() => {
                if self.name.push(c).is_err() {
                    return MenuStatus::ERROR;
                }
            }
            Some(Key::Left) if event.is_press() => {
                self.name.pop();
            }
            Some(Key::Green) if event.is_press() => {
                cx.app().contact_name.clone_from(&self.name);
                Self::leave(cx);
                return MenuStatus::SUCCESS;
            }
            Some(Key::Red) if event.is_press() => Self::leave(cx),
            _ => {}
        }
        MenuStatus::INPUT_TYPE
    }
}

/// The demo screens, owned in one place so a registry can borrow them all.
#[derive(Debug, Default)]
pub struct Screens {
    /// Root screen
    pub home: HomeScreen,
    /// Options
    pub options: OptionsScreen,
    /// Name entry
    pub name_entry: NameEntryScreen,
}

impl Screens {
    /// Fresh screens.
    pub const fn new() -> Self {
        Self {
            home: HomeScreen::new(),
            options: OptionsScreen::new(),
            name_entry: NameEntryScreen::new(),
        }
    }

    /// Registry over every demo screen.
    pub fn registry(&mut self) -> Result<Registry<'_, Radio>, RegistryError> {
        let Self {
            home,
            options,
            name_entry,
        } = self;
        Registry::new()
            .with(HOME, home)?
            .with(OPTIONS, options)?
            .with(NAME_ENTRY, name_entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_wraps_both_ways() {
        let mut radio = Radio::new();
        HomeScreen::step_channel(&mut radio, false);
        assert_eq!(radio.channel, CHANNEL_COUNT);
        HomeScreen::step_channel(&mut radio, true);
        assert_eq!(radio.channel, 1);
    }

    #[test]
    fn test_restore_skips_confirmed_changes() {
        let mut radio = Radio::new();
        let saved = pack_options(&radio);
        radio.volume = 12;
        radio.options_confirmed = true;
        restore_options(&mut radio, saved);
        assert_eq!(radio.volume, 12);
        radio.options_confirmed = false;
        restore_options(&mut radio, saved);
        assert_eq!(radio.volume, 8);
    }

    #[test]
    fn test_volume_clamps_at_max() {
        let mut radio = Radio::new();
        radio.volume = MAX_VOLUME;
        assert!(OptionsScreen::apply(&mut radio, function::VOLUME_UP));
        assert_eq!(radio.volume, MAX_VOLUME);
        assert!(!OptionsScreen::apply(&mut radio, 99));
    }
}

//! Long / extra-long staging of the side buttons.
#![allow(clippy::arithmetic_side_effects)]

use input::buttons::ButtonStage;
use input::{ButtonClassifier, ButtonEvent, ButtonMask};
use platform::{Button, ButtonLevels, KeypadTimings};

const T: KeypadTimings = KeypadTimings::DEFAULT;

fn ptt() -> ButtonLevels {
    ButtonLevels::RELEASED.with(Button::Ptt)
}

#[test]
fn long_and_extra_long_fire_once_each_then_extra_long_sticks() {
    let mut c = ButtonClassifier::new();
    let long = T.long_ticks() as usize;
    let extra = T.extra_long_ticks() as usize;
    let total = 1 + long + extra + 50;

    let mut long_ticks = Vec::new();
    let mut extra_ticks = Vec::new();
    let mut stages = Vec::new();
    for tick in 0..total {
        let poll = c.poll(ptt(), false, T);
        assert!(poll.mask.is_held(Button::Ptt));
        if poll.mask.contains(ButtonMask::PTT_LONG_DOWN) {
            long_ticks.push(tick);
        }
        if poll.mask.contains(ButtonMask::PTT_EXTRA_LONG_DOWN) {
            extra_ticks.push(tick);
        }
        let stage = c.stage(Button::Ptt);
        if stages.last() != Some(&stage) {
            stages.push(stage);
        }
    }

    assert_eq!(
        stages,
        vec![ButtonStage::Pressed, ButtonStage::Long, ButtonStage::ExtraLong]
    );
    assert_eq!(long_ticks, vec![long]);
    let first_extra = long + extra;
    assert_eq!(extra_ticks.first(), Some(&first_extra));
    assert_eq!(extra_ticks.len(), total - first_extra, "extra-long every tick");

    let release = c.poll(ButtonLevels::RELEASED, false, T);
    assert!(!release.mask.contains(ButtonMask::PTT_SHORT_UP));
    assert_eq!(release.mask, ButtonMask::empty());
    assert_eq!(release.event, ButtonEvent::Change);
}

#[test]
fn release_after_long_has_no_short_up() {
    let mut c = ButtonClassifier::new();
    for _ in 0..=T.long_ticks() {
        c.poll(ptt(), false, T);
    }
    assert_eq!(c.stage(Button::Ptt), ButtonStage::Long);
    let release = c.poll(ButtonLevels::RELEASED, false, T);
    assert!(release.mask.transitions().is_empty());
}

#[test]
fn extra_long_change_reported_every_tick() {
    let mut c = ButtonClassifier::new();
    let until_extra = T.long_ticks() + T.extra_long_ticks();
    for _ in 0..until_extra {
        c.poll(ptt(), false, T);
    }
    for _ in 0..10 {
        let poll = c.poll(ptt(), false, T);
        assert_eq!(poll.event, ButtonEvent::Change);
        assert!(poll.mask.contains(ButtonMask::PTT_EXTRA_LONG_DOWN));
    }
}

#[test]
fn quick_combo_sk2_digit_is_silent_on_release() {
    let mut c = ButtonClassifier::new();
    let sk2 = ButtonLevels::RELEASED.with(Button::Sk2);
    c.poll(sk2, false, T);
    // Key held for a while with SK2 down, long enough to cross LONG.
    for _ in 0..(T.long_ticks() + 10) {
        let poll = c.poll(sk2, true, T);
        assert!(poll.mask.transitions().is_empty());
        assert_eq!(poll.event, ButtonEvent::None);
    }
    let release = c.poll(ButtonLevels::RELEASED, false, T);
    assert_eq!(release.mask, ButtonMask::empty());
    assert_eq!(release.event, ButtonEvent::None);
}

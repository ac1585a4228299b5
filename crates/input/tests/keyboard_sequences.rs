//! Scripted scancode sequences through the keyboard state machine.
#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use input::keymap::scancode_for;
use input::{EventSignal, Key, KeyEvent, KeyModifiers, Keyboard};
use platform::{KeypadTimings, RotaryDirection, Scancode};

const T: KeypadTimings = KeypadTimings::DEFAULT;

fn code(key: Key) -> Scancode {
    scancode_for(key).unwrap()
}

/// Feed `script` one sample per tick, returning (tick, event) for every
/// non-empty event.
fn feed(kb: &mut Keyboard, script: &[(Scancode, usize)]) -> Vec<(usize, KeyEvent)> {
    let mut out = Vec::new();
    let mut tick = 0;
    for &(sc, count) in script {
        for _ in 0..count {
            let poll = kb.poll(sc, None, T);
            if poll.signal == EventSignal::Change {
                out.push((tick, poll.event));
            }
            tick += 1;
        }
    }
    out
}

fn events(kb: &mut Keyboard, script: &[(Scancode, usize)]) -> Vec<KeyEvent> {
    feed(kb, script).into_iter().map(|(_, e)| e).collect()
}

// ── Press / release ──────────────────────────────────────────────────────────

#[test]
fn short_press_yields_one_down_press_and_one_up() {
    let mut kb = Keyboard::new();
    let k = code(Key::Num7);
    let got = events(&mut kb, &[(Scancode::NONE, 5), (k, 25), (Scancode::NONE, 5)]);
    assert_eq!(
        got,
        vec![
            KeyEvent::new(Key::Num7, KeyModifiers::DOWN | KeyModifiers::PRESS),
            KeyEvent::new(Key::Num7, KeyModifiers::UP),
        ]
    );
    assert!(got.iter().all(|e| !e.modifiers.contains(KeyModifiers::LONG)));
}

#[test]
fn second_key_during_hold_is_ignored() {
    let mut kb = Keyboard::new();
    let got = events(
        &mut kb,
        &[(code(Key::Green), 30), (code(Key::Red), 30), (Scancode::NONE, 2)],
    );
    assert_eq!(got.len(), 2);
    assert!(got.iter().all(|e| e.key == Some(Key::Green)));
}

#[test]
fn code_change_at_threshold_is_noise() {
    let mut kb = Keyboard::new();
    let got = events(
        &mut kb,
        &[(code(Key::Num1), 10), (code(Key::Num2), 40), (Scancode::NONE, 3)],
    );
    assert!(got.is_empty(), "bounce must be discarded silently: {got:?}");
}

#[test]
fn two_sample_glitch_is_not_a_press() {
    let mut kb = Keyboard::new();
    let k = code(Key::Num5);
    let got = events(
        &mut kb,
        &[(k, 1), (Scancode::NONE, 20), (k, 1), (Scancode::NONE, 10)],
    );
    assert!(got.is_empty(), "glitch must not press: {got:?}");
}

#[test]
fn chattering_key_presses_once_it_settles() {
    let mut kb = Keyboard::new();
    let k = code(Key::Num8);
    let got = events(
        &mut kb,
        &[
            (k, 3),
            (Scancode::NONE, 2),
            (k, 7),
            (Scancode::NONE, 1),
            (k, 30),
            (Scancode::NONE, 2),
        ],
    );
    assert_eq!(
        got,
        vec![
            KeyEvent::new(Key::Num8, KeyModifiers::DOWN | KeyModifiers::PRESS),
            KeyEvent::new(Key::Num8, KeyModifiers::UP),
        ]
    );
}

// ── Long press and repeat ────────────────────────────────────────────────────

/// Tick index of the DOWN|PRESS event for a key pressed at tick 0.
const PRESS_TICK: usize = 22;

#[test]
fn long_press_then_repeat_cadence_for_navigation_key() {
    let mut kb = Keyboard::new();
    let long = T.long_ticks() as usize;
    let repeat = T.repeat_ticks() as usize;
    let hold = PRESS_TICK + long + 3 * repeat + 1;
    let got = feed(&mut kb, &[(code(Key::Down), hold)]);

    let (t0, first) = got[0];
    assert_eq!(t0, PRESS_TICK);
    assert_eq!(first.modifiers, KeyModifiers::DOWN | KeyModifiers::PRESS);

    let (t1, long_ev) = got[1];
    assert_eq!(t1, PRESS_TICK + long);
    assert_eq!(long_ev.modifiers, KeyModifiers::LONG | KeyModifiers::DOWN);

    let press_ticks: Vec<usize> = got[2..]
        .iter()
        .filter(|(_, e)| e.modifiers.contains(KeyModifiers::PRESS))
        .map(|&(t, _)| t)
        .collect();
    let expected: Vec<usize> = (1..=3).map(|n| PRESS_TICK + long + n * repeat).collect();
    assert_eq!(press_ticks, expected);

    // Every tick after the long threshold carries LONG.
    assert!(got[2..].iter().all(|(_, e)| e.modifiers.contains(KeyModifiers::LONG)));
    assert_eq!(got.len(), 2 + 3 * repeat);
}

#[test]
fn repeat_never_adds_press_for_digits() {
    let mut kb = Keyboard::new();
    let hold = PRESS_TICK + 2000;
    let got = events(&mut kb, &[(code(Key::Num4), hold), (Scancode::NONE, 1)]);
    let presses = got
        .iter()
        .filter(|e| e.modifiers.contains(KeyModifiers::PRESS))
        .count();
    assert_eq!(presses, 1, "only the initial press");
    assert_eq!(
        *got.last().unwrap(),
        KeyEvent::new(Key::Num4, KeyModifiers::LONG | KeyModifiers::UP)
    );
}

#[test]
fn long_threshold_follows_settings() {
    let mut kb = Keyboard::new();
    let fast = KeypadTimings::try_new(1, 1).unwrap();
    let mut long_at = None;
    for tick in 0..400 {
        let poll = kb.poll(code(Key::Red), None, fast);
        if poll.event.modifiers == KeyModifiers::LONG | KeyModifiers::DOWN {
            long_at = Some(tick);
            break;
        }
    }
    assert_eq!(long_at, Some(PRESS_TICK + 100));
}

// ── Rotary priority ──────────────────────────────────────────────────────────

#[test]
fn rotary_wins_over_held_key() {
    let mut kb = Keyboard::new();
    let k = code(Key::Num8);
    events(&mut kb, &[(k, PRESS_TICK + 1)]);
    let state_before = kb.state();
    let poll = kb.poll(k, Some(RotaryDirection::Increment), T);
    assert_eq!(
        poll.event,
        KeyEvent::new(Key::RotaryIncrement, KeyModifiers::UP | KeyModifiers::PRESS)
    );
    assert_eq!(kb.state(), state_before);
    // The release is still seen afterwards.
    let poll = kb.poll(Scancode::NONE, None, T);
    assert_eq!(poll.event, KeyEvent::new(Key::Num8, KeyModifiers::UP));
}

#[test]
fn rotary_during_debounce_delays_acceptance() {
    let mut kb = Keyboard::new();
    let k = code(Key::Num8);
    kb.poll(k, None, T);
    kb.poll(k, Some(RotaryDirection::Decrement), T);
    // Rotary tick did not count towards the debounce threshold.
    let got = feed(&mut kb, &[(k, PRESS_TICK)]);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].0, PRESS_TICK - 1);
}

// ── Alpha multi-tap ──────────────────────────────────────────────────────────

fn tap(key: Key) -> [(Scancode, usize); 2] {
    [(code(key), 30), (Scancode::NONE, 30)]
}

fn previews(got: &[KeyEvent]) -> Vec<char> {
    got.iter()
        .filter(|e| e.modifiers == KeyModifiers::PREVIEW)
        .filter_map(|e| match e.key {
            Some(Key::Char(c)) => Some(c),
            _ => None,
        })
        .collect()
}

fn commits(got: &[KeyEvent]) -> Vec<char> {
    got.iter()
        .filter(|e| e.modifiers == KeyModifiers::PRESS)
        .filter_map(|e| match e.key {
            Some(Key::Char(c)) => Some(c),
            _ => None,
        })
        .collect()
}

#[test]
fn multi_tap_cycles_then_commits_on_timeout() {
    let mut kb = Keyboard::new();
    kb.set_alpha_mode(true);
    let mut script = Vec::new();
    for _ in 0..3 {
        script.extend(tap(Key::Num2));
    }
    let got = events(&mut kb, &script);
    assert_eq!(previews(&got), vec!['a', 'b', 'c']);
    assert!(commits(&got).is_empty(), "nothing committed before the timeout");

    let got = events(&mut kb, &[(Scancode::NONE, 1000)]);
    assert_eq!(commits(&got), vec!['c']);
    assert_eq!(kb.alpha_preview(), None);
}

#[test]
fn multi_tap_commits_when_other_digit_pressed() {
    let mut kb = Keyboard::new();
    kb.set_alpha_mode(true);
    let mut script = Vec::new();
    script.extend(tap(Key::Num2));
    script.extend(tap(Key::Num2));
    script.extend(tap(Key::Num3));
    let got = events(&mut kb, &script);
    assert_eq!(commits(&got), vec!['b']);
    assert_eq!(previews(&got), vec!['a', 'b', 'd']);
    // The commit is emitted before the new preview.
    let commit_pos = got.iter().position(|e| e.key == Some(Key::Char('b')) && e.modifiers == KeyModifiers::PRESS);
    let preview_pos = got.iter().position(|e| e.key == Some(Key::Char('d')));
    assert!(commit_pos < preview_pos);
    assert_eq!(kb.alpha_preview(), Some('d'));
}

#[test]
fn multi_tap_timeout_starts_fresh_sequence() {
    let mut kb = Keyboard::new();
    kb.set_alpha_mode(true);
    let mut script = Vec::new();
    script.extend(tap(Key::Num5));
    script.push((Scancode::NONE, 1200));
    script.extend(tap(Key::Num5));
    let got = events(&mut kb, &script);
    assert_eq!(commits(&got), vec!['j']);
    assert_eq!(previews(&got), vec!['j', 'j']);
}

#[test]
fn non_alpha_key_commits_and_passes_through() {
    let mut kb = Keyboard::new();
    kb.set_alpha_mode(true);
    let mut script = Vec::new();
    script.extend(tap(Key::Num9));
    script.extend(tap(Key::Green));
    let got = events(&mut kb, &script);
    assert_eq!(commits(&got), vec!['w']);
    assert!(got.contains(&KeyEvent::new(Key::Green, KeyModifiers::DOWN | KeyModifiers::PRESS)));
}

#[test]
fn alpha_off_reports_plain_digits() {
    let mut kb = Keyboard::new();
    let got = events(&mut kb, &tap(Key::Num2));
    assert_eq!(got[0], KeyEvent::new(Key::Num2, KeyModifiers::DOWN | KeyModifiers::PRESS));
    assert!(previews(&got).is_empty());
}

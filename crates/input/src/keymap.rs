//! Scancode to key translation for the 5 × 4 keypad matrix.
//!
//! The sampler reports `row * 4 + column + 1`, zero meaning no key.
//!
//! ```text
//!          col0    col1   col2   col3
//! row0     GREEN   UP     DOWN   RED
//! row1     1       2      3      LEFT
//! row2     4       5      6      RIGHT
//! row3     7       8      9      FRONT_UP
//! row4     *       0      #      FRONT_DOWN
//! ```

use platform::Scancode;

use crate::key::Key;

/// Matrix rows.
pub const ROWS: usize = 5;
/// Matrix columns.
pub const COLS: usize = 4;

const KEYMAP: [Key; ROWS * COLS] = [
    Key::Green,
    Key::Up,
    Key::Down,
    Key::Red,
    Key::Num1,
    Key::Num2,
    Key::Num3,
    Key::Left,
    Key::Num4,
    Key::Num5,
    Key::Num6,
    Key::Right,
    Key::Num7,
    Key::Num8,
    Key::Num9,
    Key::FrontUp,
    Key::Star,
    Key::Num0,
    Key::Hash,
    Key::FrontDown,
];

/// Scancode for the key at `row`, `col`. `None` outside the matrix.
#[must_use]
pub fn scancode_at(row: usize, col: usize) -> Option<Scancode> {
    if row >= ROWS || col >= COLS {
        return None;
    }
    let index = row.checked_mul(COLS)?.checked_add(col)?.checked_add(1)?;
    u8::try_from(index).ok().map(Scancode::new)
}

/// Key for a scancode. `None` for "no key" and for codes the matrix cannot
/// produce.
#[must_use]
pub fn key_for(code: Scancode) -> Option<Key> {
    let index = usize::from(code.get()).checked_sub(1)?;
    KEYMAP.get(index).copied()
}

/// Scancode that produces `key`, if it is a matrix key.
#[must_use]
pub fn scancode_for(key: Key) -> Option<Scancode> {
    let index = KEYMAP.iter().position(|&k| k == key)?;
    u8::try_from(index.checked_add(1)?).ok().map(Scancode::new)
}

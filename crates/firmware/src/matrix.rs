//! GPIO keypad matrix and side-button sampler.
//!
//! # Wiring
//!
//! Rows are push-pull outputs idling high. Columns are inputs with pull-ups.
//! A row is selected by driving it low; a closed key then pulls its column
//! low. Side buttons (PTT, SK1, SK2) are active-low inputs.
//!
//! Rows are scanned top to bottom and the first closed key wins, matching
//! the one-active-key model of the keyboard classifier.
//!
//! [`HardwareInput`] wraps the scanner and the button pins and implements
//! [`platform::RawInput`]. Pin errors are logged and reported as "nothing
//! pressed" so a flaky line can never produce a phantom key.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use input::keymap::{scancode_at, COLS, ROWS};
use platform::{Button, ButtonLevels, RawInput, Scancode};

/// Time for a driven row to settle before the columns are read.
pub const ROW_SETTLE_US: u32 = 5;

/// GPIO failure while sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixError {
    /// Driving a row line failed.
    #[error("row {0} drive failed")]
    RowDrive(usize),
    /// Reading a column line failed.
    #[error("column {0} read failed")]
    ColumnRead(usize),
    /// Reading a side button failed.
    #[error("side button read failed")]
    Button,
}

/// Row-drive / column-sense keypad scanner.
pub struct MatrixScanner<R, C, D> {
    rows: [R; ROWS],
    cols: [C; COLS],
    delay: D,
}

impl<R, C, D> MatrixScanner<R, C, D>
where
    R: OutputPin,
    C: InputPin,
    D: DelayNs,
{
    /// Take ownership of the matrix pins. Rows should already idle high.
    pub fn new(rows: [R; ROWS], cols: [C; COLS], delay: D) -> Self {
        Self { rows, cols, delay }
    }

    /// Scan the matrix once.
    ///
    /// Returns the scancode of the first closed key, or [`Scancode::NONE`].
    pub fn scan(&mut self) -> Result<Scancode, MatrixError> {
        for (r, row) in self.rows.iter_mut().enumerate() {
            row.set_low().map_err(|_| MatrixError::RowDrive(r))?;
            self.delay.delay_us(ROW_SETTLE_US);
            let hit = first_low(&mut self.cols);
            // Release the row even if a column read failed.
            row.set_high().map_err(|_| MatrixError::RowDrive(r))?;

            if let Some(c) = hit? {
                return Ok(scancode_at(r, c).unwrap_or(Scancode::NONE));
            }
        }
        Ok(Scancode::NONE)
    }

    /// Give the pins back.
    pub fn release(self) -> ([R; ROWS], [C; COLS], D) {
        (self.rows, self.cols, self.delay)
    }
}

fn first_low<C: InputPin>(cols: &mut [C; COLS]) -> Result<Option<usize>, MatrixError> {
    for (c, col) in cols.iter_mut().enumerate() {
        if col.is_low().map_err(|_| MatrixError::ColumnRead(c))? {
            return Ok(Some(c));
        }
    }
    Ok(None)
}

/// Active-low side button pins.
pub struct SideButtons<P> {
    /// Push-to-talk
    pub ptt: P,
    /// Side key 1
    pub sk1: P,
    /// Side key 2
    pub sk2: P,
}

impl<P: InputPin> SideButtons<P> {
    /// Sample all three buttons.
    pub fn levels(&mut self) -> Result<ButtonLevels, MatrixError> {
        let mut levels = ButtonLevels::RELEASED;
        for (button, pin) in [
            (Button::Ptt, &mut self.ptt),
            (Button::Sk1, &mut self.sk1),
            (Button::Sk2, &mut self.sk2),
        ] {
            if pin.is_low().map_err(|_| MatrixError::Button)? {
                levels = levels.with(button);
            }
        }
        Ok(levels)
    }
}

/// [`RawInput`] backed by the GPIO matrix and side-button pins.
pub struct HardwareInput<R, C, D, P> {
    matrix: MatrixScanner<R, C, D>,
    buttons: SideButtons<P>,
}

impl<R, C, D, P> HardwareInput<R, C, D, P>
where
    R: OutputPin,
    C: InputPin,
    D: DelayNs,
    P: InputPin,
{
    /// Combine a matrix scanner and the side buttons.
    pub fn new(matrix: MatrixScanner<R, C, D>, buttons: SideButtons<P>) -> Self {
        Self { matrix, buttons }
    }
}

impl<R, C, D, P> RawInput for HardwareInput<R, C, D, P>
where
    R: OutputPin,
    C: InputPin,
    D: DelayNs,
    P: InputPin,
{
    fn read_key_scancode(&mut self) -> Scancode {
        match self.matrix.scan() {
            Ok(code) => code,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("keypad scan failed: {}", _e);
                Scancode::NONE
            }
        }
    }

    fn read_button_levels(&mut self) -> ButtonLevels {
        match self.buttons.levels() {
            Ok(levels) => levels,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("button sample failed: {}", _e);
                ButtonLevels::RELEASED
            }
        }
    }
}

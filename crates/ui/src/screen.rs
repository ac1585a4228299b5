//! Screen contract and the registry that maps screen IDs to handlers.

use heapless::Vec;
use thiserror_no_std::Error;

use crate::event::UiEvent;
use crate::navigation::Context;
use crate::status::MenuStatus;

/// Most screens a registry can hold.
pub const MAX_SCREENS: usize = 32;

/// Numeric screen identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenId(pub u8);

/// How the rotary encoder is presented to a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RotaryMapping {
    /// Deliver rotary keys unchanged.
    Raw,
    /// Clockwise is `Down`, counter-clockwise is `Up`.
    #[default]
    UpDown,
    /// Clockwise is `Right`, counter-clockwise is `Left`.
    LeftRight,
}

/// A menu screen.
///
/// `A` is the application state exit callbacks and handlers operate on.
pub trait Screen<A> {
    /// Handle one event. `first_run` is set when the screen becomes active
    /// (pushed, or uncovered by a pop).
    fn handle_event(&mut self, cx: &mut Context<'_, A>, event: &UiEvent, first_run: bool)
        -> MenuStatus;

    /// Rotary translation for this screen.
    fn rotary_mapping(&self) -> RotaryMapping {
        RotaryMapping::UpDown
    }
}

/// Registry construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// More than [`MAX_SCREENS`] screens.
    #[error("screen registry full")]
    Full,
    /// The ID is already registered.
    #[error("screen {0} registered twice")]
    Duplicate(u8),
    /// The ID was never registered.
    #[error("screen {0} not registered")]
    Unknown(u8),
}

pub(crate) struct Entry<'s, A> {
    pub(crate) id: ScreenId,
    pub(crate) screen: &'s mut dyn Screen<A>,
    pub(crate) last_item_index: usize,
}

/// Screen ID to handler mapping, built once at start-up.
pub struct Registry<'s, A> {
    entries: Vec<Entry<'s, A>, MAX_SCREENS>,
}

impl<'s, A> Registry<'s, A> {
    /// Empty registry.
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register `screen` under `id`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Duplicate`] if `id` is taken, [`RegistryError::Full`]
    /// past [`MAX_SCREENS`].
    pub fn register(&mut self, id: ScreenId, screen: &'s mut dyn Screen<A>) -> Result<(), RegistryError> {
        if self.contains(id) {
            return Err(RegistryError::Duplicate(id.0));
        }
        self.entries
            .push(Entry {
                id,
                screen,
                last_item_index: 0,
            })
            .map_err(|_| RegistryError::Full)
    }

    /// Builder form of [`register`](Self::register).
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub fn with(mut self, id: ScreenId, screen: &'s mut dyn Screen<A>) -> Result<Self, RegistryError> {
        self.register(id, screen)?;
        Ok(self)
    }

    /// `true` if `id` is registered.
    pub fn contains(&self, id: ScreenId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of registered screens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Item index `id` had when it was last left.
    pub fn last_item_index(&self, id: ScreenId) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.last_item_index)
    }

    pub(crate) fn entry_mut(&mut self, id: ScreenId) -> Option<&mut Entry<'s, A>> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub(crate) fn remember_item_index(&mut self, id: ScreenId, index: usize) {
        if let Some(entry) = self.entry_mut(id) {
            entry.last_item_index = index;
        }
    }
}

impl<A> Default for Registry<'_, A> {
    fn default() -> Self {
        Self::new()
    }
}

//! Screen registry
//!
//! Ordered, capacity-bounded mapping from screen names to indicator
//! segments. Order is insertion order and survives removals.

use heapless::{String, Vec};

use crate::config::MAX_NAME_LEN;

/// Name of a screen as registered by the host
pub type ScreenName = String<MAX_NAME_LEN>;

/// A named screen and the indicator it lights
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub name: ScreenName,
    pub indicator: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// Every slot is taken and the name is not registered
    CapacityExceeded,
    /// Name longer than [`MAX_NAME_LEN`]
    NameTooLong,
    EmptyName,
}

impl core::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegistryError::CapacityExceeded => write!(f, "screen list full"),
            RegistryError::NameTooLong => {
                write!(f, "screen name longer than {} bytes", MAX_NAME_LEN)
            }
            RegistryError::EmptyName => write!(f, "screen name is empty"),
        }
    }
}

/// Screen table with room for `N` screens
#[derive(Debug, Clone, Default)]
pub struct ScreenRegistry<const N: usize> {
    screens: Vec<Screen, N>,
}

impl<const N: usize> ScreenRegistry<N> {
    pub const fn new() -> Self {
        Self { screens: Vec::new() }
    }

    /// Register a screen or move an existing one to another indicator
    ///
    /// Existing screens are updated in place and keep their position.
    pub fn add(&mut self, name: &str, indicator: i32) -> Result<(), RegistryError> {
        if let Some(screen) = self.screens.iter_mut().find(|s| s.name.as_str() == name) {
            screen.indicator = indicator;
            return Ok(());
        }

        let name = screen_name(name)?;
        self.screens
            .push(Screen { name, indicator })
            .map_err(|_| RegistryError::CapacityExceeded)
    }

    /// Remove a screen, closing the gap
    ///
    /// Returns `false` if no screen had that name.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(position) = self.screens.iter().position(|s| s.name.as_str() == name) else {
            return false;
        };
        self.screens.remove(position);
        true
    }

    /// Look up the indicator of a screen
    pub fn resolve(&self, name: &str) -> Option<i32> {
        self.screens
            .iter()
            .find(|s| s.name.as_str() == name)
            .map(|s| s.indicator)
    }

    /// Registered screens in order
    pub fn list(&self) -> &[Screen] {
        &self.screens
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

fn screen_name(name: &str) -> Result<ScreenName, RegistryError> {
    if name.is_empty() {
        return Err(RegistryError::EmptyName);
    }
    let mut screen_name = ScreenName::new();
    screen_name
        .push_str(name)
        .map_err(|()| RegistryError::NameTooLong)?;
    Ok(screen_name)
}

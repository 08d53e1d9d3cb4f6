//! Persistent configuration
//!
//! The screen table and the target color are stored as one JSON record:
//!
//! ```json
//! {"screens":{"chrome":3,"term":1},"color":{"hue":78.0,"saturation":1.0,"intensity":128}}
//! ```
//!
//! On flash the record is prefixed by a magic header and the JSON length.
//! It is rewritten as a whole on every save.

use core::fmt::{self, Write};

use embedded_storage::nor_flash::NorFlash;
use heapless::LinearMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::color::Hsi;
use crate::config::MAX_NAME_LEN;
use crate::registry::{ScreenName, ScreenRegistry};

const MAGIC_HEADER: u16 = 0xBEEF;
const MAGIC_HEADER_SIZE: usize = MAGIC_HEADER.to_le_bytes().len();
const HEADER_SIZE: usize = MAGIC_HEADER_SIZE + 2;

/// Longest JSON form of a screen name: quotes plus `\uXXXX` per byte
const QUOTED_NAME_LEN: usize = MAX_NAME_LEN * 6 + 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Flash read, erase or write failed
    Driver,
    /// Stored record is corrupt
    InvalidData,
    /// Record does not fit the storage buffer
    Overflow,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Driver => write!(f, "flash driver error"),
            StorageError::InvalidData => write!(f, "stored configuration is corrupt"),
            StorageError::Overflow => write!(f, "configuration does not fit storage"),
        }
    }
}

/// Persisted configuration for `N` screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredConfig<const N: usize> {
    /// Screen name → indicator index, in registry order
    #[serde(default)]
    pub screens: LinearMap<ScreenName, i32, N>,
    /// Target indicator color
    #[serde(default)]
    pub color: Hsi,
}

impl<const N: usize> Default for StoredConfig<N> {
    fn default() -> Self {
        Self {
            screens: LinearMap::new(),
            color: Hsi::default(),
        }
    }
}

impl<const N: usize> StoredConfig<N> {
    /// Snapshot the persisted parts of the application state
    pub fn capture(registry: &ScreenRegistry<N>, color: Hsi) -> Self {
        let mut screens = LinearMap::new();
        for screen in registry.list() {
            if screens.insert(screen.name.clone(), screen.indicator).is_err() {
                break;
            }
        }
        Self { screens, color }
    }

    /// Rebuild the screen table in stored order
    pub fn registry(&self) -> ScreenRegistry<N> {
        let mut registry = ScreenRegistry::new();
        for (name, indicator) in self.screens.iter() {
            if let Err(error) = registry.add(name, *indicator) {
                debug!("storage: skipping screen {}: {}", name.as_str(), error);
            }
        }
        registry
    }

    /// Stored color with out of range values fixed up
    pub fn color(&self) -> Hsi {
        Hsi::normalized(
            self.color.hue,
            self.color.saturation,
            i32::from(self.color.intensity),
        )
    }
}

/// Formats the record as indented JSON
impl<const N: usize> fmt::Display for StoredConfig<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{\n  \"screens\": {")?;
        for (index, (name, indicator)) in self.screens.iter().enumerate() {
            f.write_str(if index == 0 { "\n    " } else { ",\n    " })?;
            write_json_string(f, name)?;
            write!(f, ": {}", indicator)?;
        }
        if !self.screens.is_empty() {
            f.write_str("\n  ")?;
        }
        write!(
            f,
            "}},\n  \"color\": {{\n    \"hue\": {},\n    \"saturation\": {},\n    \"intensity\": {}\n  }}\n}}",
            self.color.hue, self.color.saturation, self.color.intensity
        )
    }
}

/// Quoted and escaped exactly as in the stored record
fn write_json_string(f: &mut impl Write, text: &str) -> fmt::Result {
    let quoted = serde_json_core::to_string::<_, QUOTED_NAME_LEN>(&text).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

/// Load/save interface for the configuration record
pub trait ConfigStore<const N: usize> {
    /// Read the stored record, `Ok(None)` if nothing was ever saved
    fn load(&mut self) -> Result<Option<StoredConfig<N>>, StorageError>;

    /// Replace the stored record
    fn save(&mut self, config: &StoredConfig<N>) -> Result<(), StorageError>;
}

/// JSON record on NOR flash
///
/// `SIZE` is the record buffer size and must be a multiple of the flash
/// read and write sizes. The record occupies the erase blocks starting at
/// `offset`.
pub struct FlashConfigStore<F: NorFlash, const SIZE: usize> {
    flash: F,
    offset: u32,
}

impl<F: NorFlash, const SIZE: usize> FlashConfigStore<F, SIZE> {
    pub const fn new(flash: F, offset: u32) -> Self {
        Self { flash, offset }
    }

    pub fn into_inner(self) -> F {
        self.flash
    }

    pub const fn flash(&self) -> &F {
        &self.flash
    }

    fn erase_end(&self) -> Result<u32, StorageError> {
        let len = SIZE.div_ceil(F::ERASE_SIZE) * F::ERASE_SIZE;
        u32::try_from(len)
            .ok()
            .and_then(|len| self.offset.checked_add(len))
            .ok_or(StorageError::Overflow)
    }
}

impl<F: NorFlash, const SIZE: usize, const N: usize> ConfigStore<N> for FlashConfigStore<F, SIZE> {
    fn load(&mut self) -> Result<Option<StoredConfig<N>>, StorageError> {
        let mut buffer = [0u8; SIZE];
        self.flash
            .read(self.offset, &mut buffer)
            .map_err(|_| StorageError::Driver)?;

        let Some(&[m0, m1, l0, l1]) = buffer.first_chunk::<HEADER_SIZE>() else {
            return Err(StorageError::Overflow);
        };
        if u16::from_le_bytes([m0, m1]) != MAGIC_HEADER {
            info!("storage: no configuration record");
            return Ok(None);
        }

        let len = usize::from(u16::from_le_bytes([l0, l1]));
        let body = buffer
            .get(HEADER_SIZE..HEADER_SIZE + len)
            .ok_or(StorageError::InvalidData)?;
        let mut unescaped = [0u8; MAX_NAME_LEN];
        let (config, _) =
            serde_json_core::from_slice_escaped::<StoredConfig<N>>(body, &mut unescaped)
                .map_err(|_| StorageError::InvalidData)?;

        info!("storage: loaded {} screens", config.screens.len());
        Ok(Some(config))
    }

    fn save(&mut self, config: &StoredConfig<N>) -> Result<(), StorageError> {
        let mut buffer = [0xFFu8; SIZE];
        let body = buffer
            .get_mut(HEADER_SIZE..)
            .ok_or(StorageError::Overflow)?;
        let body_len =
            serde_json_core::to_slice(config, body).map_err(|_| StorageError::Overflow)?;
        let len = u16::try_from(body_len).map_err(|_| StorageError::Overflow)?;

        buffer[..MAGIC_HEADER_SIZE].copy_from_slice(&MAGIC_HEADER.to_le_bytes());
        buffer[MAGIC_HEADER_SIZE..HEADER_SIZE].copy_from_slice(&len.to_le_bytes());

        let erase_end = self.erase_end()?;
        self.flash
            .erase(self.offset, erase_end)
            .map_err(|_| StorageError::Driver)?;

        let write_len = (HEADER_SIZE + body_len)
            .div_ceil(F::WRITE_SIZE)
            .saturating_mul(F::WRITE_SIZE)
            .min(SIZE);
        self.flash
            .write(self.offset, &buffer[..write_len])
            .map_err(|_| StorageError::Driver)?;

        info!("storage: saved {} screens ({} bytes)", config.screens.len(), body_len);
        Ok(())
    }
}

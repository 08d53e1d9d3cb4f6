#![allow(dead_code)]

use embedded_storage::nor_flash::{
    ErrorType, NorFlash, NorFlashErrorKind, ReadNorFlash,
};
use monitor_indicator::{ConfigStore, OutputDriver, Pixel, StorageError, StoredConfig};

pub const FLASH_SIZE: usize = 4096;

/// RAM backed NOR flash
pub struct MemFlash {
    pub data: [u8; FLASH_SIZE],
    pub fail_writes: bool,
    pub erases: usize,
}

impl MemFlash {
    pub fn new() -> Self {
        Self {
            data: [0xFF; FLASH_SIZE],
            fail_writes: false,
            erases: 0,
        }
    }
}

impl ErrorType for MemFlash {
    type Error = NorFlashErrorKind;
}

impl ReadNorFlash for MemFlash {
    const READ_SIZE: usize = 1;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let start = offset as usize;
        let end = start + bytes.len();
        if end > FLASH_SIZE {
            return Err(NorFlashErrorKind::OutOfBounds);
        }
        bytes.copy_from_slice(&self.data[start..end]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        FLASH_SIZE
    }
}

impl NorFlash for MemFlash {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = 1024;

    fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(NorFlashErrorKind::Other);
        }
        let (from, to) = (from as usize, to as usize);
        if to > FLASH_SIZE || from % Self::ERASE_SIZE != 0 || to % Self::ERASE_SIZE != 0 {
            return Err(NorFlashErrorKind::NotAligned);
        }
        self.data[from..to].fill(0xFF);
        self.erases += 1;
        Ok(())
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(NorFlashErrorKind::Other);
        }
        let start = offset as usize;
        let end = start + bytes.len();
        if end > FLASH_SIZE || start % Self::WRITE_SIZE != 0 || bytes.len() % Self::WRITE_SIZE != 0
        {
            return Err(NorFlashErrorKind::NotAligned);
        }
        self.data[start..end].copy_from_slice(bytes);
        Ok(())
    }
}

/// In-memory config store that counts saves
pub struct MemoryStore<const N: usize> {
    pub record: Option<StoredConfig<N>>,
    pub saves: usize,
    pub fail: bool,
}

impl<const N: usize> MemoryStore<N> {
    pub fn new() -> Self {
        Self {
            record: None,
            saves: 0,
            fail: false,
        }
    }

    pub fn with_record(record: StoredConfig<N>) -> Self {
        Self {
            record: Some(record),
            ..Self::new()
        }
    }
}

impl<const N: usize> ConfigStore<N> for MemoryStore<N> {
    fn load(&mut self) -> Result<Option<StoredConfig<N>>, StorageError> {
        if self.fail {
            return Err(StorageError::Driver);
        }
        Ok(self.record.clone())
    }

    fn save(&mut self, config: &StoredConfig<N>) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Driver);
        }
        self.record = Some(config.clone());
        self.saves += 1;
        Ok(())
    }
}

/// Output driver that keeps the last frame
pub struct RecordingDriver<P: Pixel> {
    pub frames: usize,
    pub last: Vec<P>,
}

impl<P: Pixel> RecordingDriver<P> {
    pub fn new() -> Self {
        Self {
            frames: 0,
            last: Vec::new(),
        }
    }
}

impl<P: Pixel> OutputDriver<P> for RecordingDriver<P> {
    fn write(&mut self, colors: &[P]) {
        self.frames += 1;
        self.last = colors.to_vec();
    }
}

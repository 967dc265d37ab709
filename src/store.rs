use core::ops::DerefMut;

use crate::config::{Fill, SECTOR_SIZE};
use crate::io::Sector;

/// Contents of the single file, lives only as long as the process does
pub struct PayloadStore<B> {
    buffer: B,
    fill: Fill,
    initialized: bool,
}

impl<B: DerefMut<Target = [u8]>> PayloadStore<B> {
    /// Caller guarantees buffer length is a multiple of sector size
    pub(crate) fn new(buffer: B, fill: Fill) -> Self {
        Self { buffer, fill, initialized: false }
    }

    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        match self.fill {
            Fill::Zero => self.buffer.fill(0),
            Fill::Pattern(pattern) => {
                for (byte, &value) in self.buffer.iter_mut().zip(pattern.iter().cycle()) {
                    *byte = value;
                }
            }
        }
        self.initialized = true;
        debug!("Payload of {} bytes initialized", self.buffer.len());
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn read(&self, index: u32, sector: &mut Sector) {
        let offset = index as usize * SECTOR_SIZE;
        sector.copy_from_slice(&self.buffer[offset..offset + SECTOR_SIZE]);
    }

    pub fn write(&mut self, index: u32, sector: &Sector) {
        if !self.initialized {
            warn!("Payload sector {} written before initialize", index);
        }
        let offset = index as usize * SECTOR_SIZE;
        self.buffer[offset..offset + SECTOR_SIZE].copy_from_slice(sector);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}

#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

#[macro_use]
extern crate hex_literal;
extern crate heapless;
#[macro_use]
extern crate log;

pub mod config;
mod endian;
pub mod error;
pub mod geometry;
pub mod io;
pub mod metadata;
pub mod region;
pub mod store;
pub mod types;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::ops::DerefMut;

#[cfg(all(feature = "async", not(feature = "std")))]
use alloc::boxed::Box;
#[cfg(feature = "async")]
use async_trait::async_trait;
use memoffset::offset_of;

pub use config::{Config, DateTime, Fill};
use error::ConfigError;
pub use geometry::Geometry;
use io::Sector;
pub use metadata::Metadata;
use region::boot::{BootSector, SIGNATURE};
pub use region::Region;
use store::PayloadStore;
use types::SectorID;

/// Single file FAT12 volume, metadata is read only and the payload lives in `B`
pub struct PseudoFAT<B> {
    geometry: Geometry,
    metadata: Metadata,
    store: PayloadStore<B>,
}

impl<B: DerefMut<Target = [u8]>> PseudoFAT<B> {
    pub fn new(config: &Config, buffer: B) -> Result<Self, ConfigError> {
        let geometry = Geometry::new(config)?;
        debug!("Volume geometry: {:?}", geometry);
        let expected = geometry.payload_len() as usize;
        if buffer.len() != expected {
            return Err(ConfigError::PayloadBuffer { expected, actual: buffer.len() });
        }
        if matches!(config.fill, Fill::Pattern(pattern) if pattern.is_empty()) {
            return Err(ConfigError::EmptyFillPattern);
        }
        let metadata = Metadata::new(config, &geometry)?;
        let store = PayloadStore::new(buffer, config.fill);
        Ok(Self { geometry, metadata, store })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn payload(&self) -> &[u8] {
        self.store.as_bytes()
    }

    pub fn initialize(&mut self) {
        self.store.initialize()
    }

    pub fn read_sector(&self, id: SectorID, sector: &mut Sector) {
        sector.fill(0);
        let region = self.geometry.classify(id);
        trace!("Read sector {} in {:?}", id, region);
        match region {
            Region::Boot => {
                sector.copy_from_slice(self.metadata.boot_sector.as_bytes());
                let offset = offset_of!(BootSector, signature);
                sector[offset..offset + SIGNATURE.len()].copy_from_slice(&SIGNATURE);
            }
            Region::FAT { sector: index, .. } => {
                sector.copy_from_slice(self.metadata.fat.sector(index));
            }
            Region::RootDirectory(0) => {
                sector.copy_from_slice(self.metadata.root_directory.sector());
            }
            Region::Payload(index) => self.store.read(index, sector),
            Region::RootDirectory(_) | Region::Unallocated => (),
        }
    }

    pub fn write_sector(&mut self, id: SectorID, sector: &Sector) {
        match self.geometry.classify(id) {
            Region::Payload(index) => {
                trace!("Write sector {} at payload sector {}", id, index);
                self.store.write(index, sector)
            }
            region => trace!("Discard write to sector {} in {:?}", id, region),
        }
    }
}

impl PseudoFAT<Vec<u8>> {
    /// Allocates the payload on heap
    pub fn allocate(config: &Config) -> Result<Self, ConfigError> {
        let geometry = Geometry::new(config)?;
        Self::new(config, vec![0u8; geometry.payload_len() as usize])
    }
}

#[cfg_attr(feature = "async", async_trait(?Send))]
#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl<B: DerefMut<Target = [u8]>> io::BlockDevice for PseudoFAT<B> {
    type Error = Infallible;

    fn num_sectors(&self) -> u32 {
        self.geometry.total_sectors
    }

    async fn initialize(&mut self) -> Result<(), Infallible> {
        PseudoFAT::initialize(self);
        Ok(())
    }

    async fn read(&mut self, id: SectorID, sector: &mut Sector) -> Result<(), Infallible> {
        self.read_sector(id, sector);
        Ok(())
    }

    async fn write(&mut self, id: SectorID, sector: &Sector) -> Result<(), Infallible> {
        self.write_sector(id, sector);
        Ok(())
    }
}

#[cfg(feature = "std")]
pub mod std;

#[cfg(all(feature = "async", not(feature = "std")))]
use alloc::boxed::Box;
use core::fmt::Debug;

#[cfg(feature = "async")]
use async_trait::async_trait;

use crate::config::SECTOR_SIZE;
use crate::types::SectorID;

pub type Sector = [u8; SECTOR_SIZE];

/// Sector level access as seen by a mass storage transport
#[cfg_attr(feature = "async", async_trait(?Send))]
#[cfg_attr(not(feature = "async"), deasync::deasync)]
pub trait BlockDevice {
    type Error: Debug;

    /// Capacity advertised to the host, in sectors of [`SECTOR_SIZE`]
    fn num_sectors(&self) -> u32;
    /// Must be called once before the first read or write
    async fn initialize(&mut self) -> Result<(), Self::Error>;
    /// Fully populates `sector`, including for addresses past the end
    async fn read(&mut self, id: SectorID, sector: &mut Sector) -> Result<(), Self::Error>;
    async fn write(&mut self, id: SectorID, sector: &Sector) -> Result<(), Self::Error>;
}

use crate::config::Config;
use crate::error::ConfigError;
use crate::geometry::Geometry;
use crate::region::boot::BootSector;
use crate::region::fat::FAT;
use crate::region::root::RootDirectory;

/// Immutable images served for every metadata sector
#[derive(Clone, Debug)]
pub struct Metadata {
    pub boot_sector: BootSector,
    pub fat: FAT,
    pub root_directory: RootDirectory,
}

impl Metadata {
    pub fn new(config: &Config, geometry: &Geometry) -> Result<Self, ConfigError> {
        let boot_sector = BootSector::new(config, geometry)?;
        let fat = FAT::new(geometry, config.media);
        let root_directory = RootDirectory::new(config, geometry)?;
        Ok(Self { boot_sector, fat, root_directory })
    }
}

use crate::config::{Config, SECTOR_SIZE};
use crate::error::ConfigError;
use crate::region::Region;
use crate::types::{ClusterID, SectorID};

pub const DIR_ENTRY_SIZE: u32 = 32;

/// FAT12 can address at most 4084 data clusters, beyond that it is FAT16
pub const MAX_CLUSTERS: u32 = 4084;

/// Sector layout of the emulated volume
///
/// ```text
/// | boot | reserved | FAT * n | root directory | free clusters | payload |
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub number_of_fats: u8,
    pub root_entry_count: u16,
    /// Sectors occupied by one FAT copy
    pub fat_sectors: u16,
    pub root_dir_sectors: u32,
    pub first_data_sector: u32,
    pub first_cluster: ClusterID,
    /// Data clusters of the volume, free ones before the file included
    pub cluster_count: u32,
    pub payload_start: u32,
    /// Exclusive
    pub payload_end: u32,
    pub total_sectors: u32,
}

const fn ceil(numerator: u32, denominator: u32) -> u32 {
    (numerator + denominator - 1) / denominator
}

impl Geometry {
    pub const fn new(config: &Config) -> Result<Self, ConfigError> {
        let sector_size = config.bytes_per_sector;
        if sector_size as usize != SECTOR_SIZE {
            return Err(ConfigError::SectorSize(sector_size));
        }
        let sectors_per_cluster = config.sectors_per_cluster;
        if !sectors_per_cluster.is_power_of_two() || sectors_per_cluster > 128 {
            return Err(ConfigError::SectorsPerCluster(sectors_per_cluster));
        }
        if config.reserved_sectors == 0 {
            return Err(ConfigError::ReservedSectors);
        }
        if config.number_of_fats == 0 {
            return Err(ConfigError::NumberOfFATs);
        }
        // Also stored in the low byte of FAT entry 0
        if !matches!(config.media, 0xF0 | 0xF8..=0xFF) {
            return Err(ConfigError::Media(config.media));
        }
        let num_entries = if config.volume_label_entry { 2 } else { 1 };
        if config.root_entry_count < num_entries {
            return Err(ConfigError::RootEntryCount(config.root_entry_count));
        }
        if config.first_cluster < ClusterID::FIRST.id() {
            return Err(ConfigError::FirstCluster(config.first_cluster));
        }
        let (backing, reserved) = (config.backing_size, config.reserved_size);
        if reserved > backing {
            return Err(ConfigError::ReservedSize { backing, reserved });
        }

        let payload_len = config.payload_len();
        if payload_len == 0 {
            return Err(ConfigError::EmptyPayload);
        }
        if payload_len % SECTOR_SIZE as u32 != 0 {
            return Err(ConfigError::PayloadNotSectorAligned(payload_len));
        }
        let cluster_size = SECTOR_SIZE as u32 * sectors_per_cluster as u32;
        if payload_len % cluster_size != 0 {
            return Err(ConfigError::PayloadNotClusterAligned(payload_len));
        }

        let first_cluster = ClusterID::new(config.first_cluster);
        let free_clusters = first_cluster.offset() as u32;
        let cluster_count = free_clusters + payload_len / cluster_size;
        if cluster_count > MAX_CLUSTERS {
            return Err(ConfigError::TooManyClusters(cluster_count));
        }

        // Entry 0 and 1 are reserved, each entry takes one and a half byte
        let fat_bytes = ceil((cluster_count + 2) * 3, 2);
        let fat_sectors = ceil(fat_bytes, SECTOR_SIZE as u32);
        let root_dir_bytes = config.root_entry_count as u32 * DIR_ENTRY_SIZE;
        let root_dir_sectors = ceil(root_dir_bytes, SECTOR_SIZE as u32);
        let first_data_sector = config.reserved_sectors as u32
            + config.number_of_fats as u32 * fat_sectors
            + root_dir_sectors;
        let payload_start = first_data_sector + free_clusters * sectors_per_cluster as u32;
        let payload_end = payload_start + payload_len / SECTOR_SIZE as u32;
        if payload_end > u16::MAX as u32 {
            return Err(ConfigError::TotalSectors(payload_end));
        }

        Ok(Self {
            sectors_per_cluster,
            reserved_sectors: config.reserved_sectors,
            number_of_fats: config.number_of_fats,
            root_entry_count: config.root_entry_count,
            fat_sectors: fat_sectors as u16,
            root_dir_sectors,
            first_data_sector,
            first_cluster,
            cluster_count,
            payload_start,
            payload_end,
            total_sectors: payload_end,
        })
    }

    /// Rejects an invalid configuration at compile time when used in a `const` item
    pub const fn checked(config: &Config) -> Self {
        match Self::new(config) {
            Ok(geometry) => geometry,
            Err(_) => panic!("configuration is not a valid FAT12 volume"),
        }
    }

    pub const fn fat_start(&self) -> u32 {
        self.reserved_sectors as u32
    }

    pub const fn root_dir_start(&self) -> u32 {
        self.fat_start() + self.number_of_fats as u32 * self.fat_sectors as u32
    }

    pub const fn payload_sectors(&self) -> u32 {
        self.payload_end - self.payload_start
    }

    pub const fn payload_len(&self) -> u32 {
        self.payload_sectors() * SECTOR_SIZE as u32
    }

    pub const fn payload_clusters(&self) -> u32 {
        self.payload_sectors() / self.sectors_per_cluster as u32
    }

    /// Sectors of the whole FAT region, all copies included
    pub const fn fat_region_sectors(&self) -> u32 {
        self.root_dir_start() - self.fat_start()
    }

    pub fn classify(&self, id: SectorID) -> Region {
        let lba = id.lba();
        if lba == SectorID::BOOT.lba() {
            return Region::Boot;
        }
        if lba < self.fat_start() {
            return Region::Unallocated;
        }
        if lba < self.root_dir_start() {
            let offset = lba - self.fat_start();
            let copy = (offset / self.fat_sectors as u32) as u8;
            let sector = (offset % self.fat_sectors as u32) as u16;
            return Region::FAT { copy, sector };
        }
        if lba < self.first_data_sector {
            return Region::RootDirectory(lba - self.root_dir_start());
        }
        if (self.payload_start..self.payload_end).contains(&lba) {
            return Region::Payload(lba - self.payload_start);
        }
        Region::Unallocated
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::checked(&Config::DEFAULT)
    }
}

#[cfg(test)]
mod test {
    use super::Geometry;
    use crate::config::Config;
    use crate::error::ConfigError;
    use crate::region::Region;
    use crate::types::SectorID;

    const GEOMETRY: Geometry = Geometry::checked(&Config::DEFAULT);

    #[test]
    fn test_default() {
        assert_eq!(GEOMETRY.fat_sectors, 1);
        assert_eq!(GEOMETRY.root_dir_sectors, 32);
        assert_eq!(GEOMETRY.first_data_sector, 35);
        assert_eq!(GEOMETRY.payload_start, 35);
        assert_eq!(GEOMETRY.payload_end, 147);
        assert_eq!(GEOMETRY.total_sectors, 147);
        assert_eq!(GEOMETRY.cluster_count, 28);
        assert_eq!(GEOMETRY, Geometry::default());
    }

    #[test]
    fn test_regions_add_up() {
        let configs = [
            Config::DEFAULT,
            Config { number_of_fats: 1, ..Config::DEFAULT },
            Config { number_of_fats: 3, root_entry_count: 16, ..Config::DEFAULT },
            Config { backing_size: 1024 * 1024, reserved_size: 0, ..Config::DEFAULT },
            Config { sectors_per_cluster: 1, root_entry_count: 100, ..Config::DEFAULT },
        ];
        for config in configs.iter() {
            let geometry = Geometry::new(config).unwrap();
            let fat_sectors = geometry.number_of_fats as u32 * geometry.fat_sectors as u32;
            let sum = 1 + fat_sectors + geometry.root_dir_sectors + geometry.payload_sectors();
            assert_eq!(sum, geometry.total_sectors);
            assert_eq!(geometry.payload_sectors() * 512, config.payload_len());
            assert_eq!(geometry.fat_region_sectors(), fat_sectors);
        }
    }

    #[test]
    fn test_fat_spans_sectors() {
        let config = Config { backing_size: 1024 * 1024, reserved_size: 0, ..Config::DEFAULT };
        let geometry = Geometry::new(&config).unwrap();
        // 512 clusters, 514 entries of 1.5 bytes
        assert_eq!(geometry.cluster_count, 512);
        assert_eq!(geometry.fat_sectors, 2);
        assert_eq!(geometry.first_data_sector, 1 + 4 + 32);
    }

    #[test]
    fn test_free_clusters_before_payload() {
        let config = Config { first_cluster: 3, ..Config::DEFAULT };
        let geometry = Geometry::new(&config).unwrap();
        assert_eq!(geometry.first_data_sector, 35);
        assert_eq!(geometry.payload_start, 39);
        assert_eq!(geometry.total_sectors, 151);
        assert_eq!(geometry.cluster_count, 29);
        assert_eq!(geometry.payload_clusters(), 28);
    }

    #[test]
    fn test_classify() {
        let config = Config { first_cluster: 3, reserved_sectors: 2, ..Config::DEFAULT };
        let geometry = Geometry::new(&config).unwrap();
        let classify = |lba: u32| geometry.classify(SectorID::new(lba));
        assert_eq!(classify(0), Region::Boot);
        assert_eq!(classify(1), Region::Unallocated);
        assert_eq!(classify(2), Region::FAT { copy: 0, sector: 0 });
        assert_eq!(classify(3), Region::FAT { copy: 1, sector: 0 });
        assert_eq!(classify(4), Region::RootDirectory(0));
        assert_eq!(classify(35), Region::RootDirectory(31));
        for lba in 36..40 {
            assert_eq!(classify(lba), Region::Unallocated);
        }
        assert_eq!(classify(40), Region::Payload(0));
        assert_eq!(classify(151), Region::Payload(111));
        assert_eq!(classify(152), Region::Unallocated);
        assert_eq!(classify(u32::MAX), Region::Unallocated);
    }

    #[test]
    fn test_rejected() {
        let cases = [
            (Config { bytes_per_sector: 4096, ..Config::DEFAULT }, ConfigError::SectorSize(4096)),
            (Config { sectors_per_cluster: 3, ..Config::DEFAULT }, ConfigError::SectorsPerCluster(3)),
            (Config { sectors_per_cluster: 0, ..Config::DEFAULT }, ConfigError::SectorsPerCluster(0)),
            (Config { reserved_sectors: 0, ..Config::DEFAULT }, ConfigError::ReservedSectors),
            (Config { number_of_fats: 0, ..Config::DEFAULT }, ConfigError::NumberOfFATs),
            (Config { media: 0x00, ..Config::DEFAULT }, ConfigError::Media(0x00)),
            (Config { media: 0xF7, ..Config::DEFAULT }, ConfigError::Media(0xF7)),
            (Config { root_entry_count: 0, ..Config::DEFAULT }, ConfigError::RootEntryCount(0)),
            (Config { first_cluster: 1, ..Config::DEFAULT }, ConfigError::FirstCluster(1)),
            (Config { reserved_size: 64 * 1024, ..Config::DEFAULT }, ConfigError::EmptyPayload),
            (
                Config { reserved_size: 8 * 1024 + 100, ..Config::DEFAULT },
                ConfigError::PayloadNotSectorAligned(56 * 1024 - 100),
            ),
            (
                Config { reserved_size: 8 * 1024 + 512, ..Config::DEFAULT },
                ConfigError::PayloadNotClusterAligned(56 * 1024 - 512),
            ),
        ];
        for (config, error) in cases.iter() {
            assert_eq!(Geometry::new(config), Err(*error));
        }

        let config = Config { reserved_size: 65 * 1024, ..Config::DEFAULT };
        let error = ConfigError::ReservedSize { backing: 64 * 1024, reserved: 65 * 1024 };
        assert_eq!(Geometry::new(&config), Err(error));

        let config = Config { volume_label_entry: true, root_entry_count: 1, ..Config::DEFAULT };
        assert_eq!(Geometry::new(&config), Err(ConfigError::RootEntryCount(1)));

        for media in [0xF0, 0xF8, 0xF9, 0xFF] {
            assert!(Geometry::new(&Config { media, ..Config::DEFAULT }).is_ok());
        }
    }

    #[test]
    fn test_limits() {
        let config = Config {
            backing_size: 4085 * 512,
            reserved_size: 0,
            sectors_per_cluster: 1,
            ..Config::DEFAULT
        };
        assert_eq!(Geometry::new(&config), Err(ConfigError::TooManyClusters(4085)));

        // 2048 clusters of 32 sectors, 7 sectors per FAT
        let config = Config {
            backing_size: 2048 * 32 * 512,
            reserved_size: 0,
            sectors_per_cluster: 32,
            ..Config::DEFAULT
        };
        let total = 1 + 2 * 7 + 32 + 2048 * 32;
        assert_eq!(Geometry::new(&config), Err(ConfigError::TotalSectors(total)));
    }
}

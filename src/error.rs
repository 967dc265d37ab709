use displaydoc::Display;
use thiserror::Error;

/// Configuration that cannot be expressed as a single file FAT12 volume
#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Sector size {0} not supported, only 512 is
    SectorSize(u16),
    /// Sectors per cluster {0} is not a power of two in 1..=128
    SectorsPerCluster(u8),
    /// At least the boot sector must be reserved
    ReservedSectors,
    /// At least one FAT copy is required
    NumberOfFATs,
    /// Media descriptor {0:#x} is neither 0xF0 nor in 0xF8..=0xFF
    Media(u8),
    /// Root directory of {0} entries cannot hold the volume entries
    RootEntryCount(u16),
    /// Reserved size {reserved} exceeds backing size {backing}
    ReservedSize { backing: u32, reserved: u32 },
    /// Payload is empty
    EmptyPayload,
    /// Payload length {0} is not a multiple of the sector size
    PayloadNotSectorAligned(u32),
    /// Payload length {0} is not a multiple of the cluster size
    PayloadNotClusterAligned(u32),
    /// First cluster {0} is below cluster 2
    FirstCluster(u16),
    /// {0} clusters cannot be addressed by FAT12
    TooManyClusters(u32),
    /// {0} sectors overflow the 16 bits total sectors field
    TotalSectors(u32),
    /// Payload buffer of {actual} bytes, expecting {expected}
    PayloadBuffer { expected: usize, actual: usize },
    /// Fill pattern is empty
    EmptyFillPattern,
    /// Invalid OEM name
    OEMName,
    /// Invalid volume label
    VolumeLabel,
    /// Invalid filesystem type
    FilesystemType,
    /// Invalid 8.3 file name
    FileName,
    /// Timestamp not representable by FAT
    Timestamp,
}

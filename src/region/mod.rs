/// Boot sector, volume configuration parameters
/// 1 sector at LBA 0, followed by ([`reserved_sectors`][link] - 1) zeroed sectors
///
/// [link]: crate::geometry::Geometry
pub mod boot;

/// FAT region, one contiguous cluster chain served for every copy
/// ([`fat_sectors`][link] * [`number_of_fats`][link]) sectors
///
/// [link]: crate::geometry::Geometry
pub mod fat;

/// Root directory region, the file entry and optionally the volume label entry
pub mod root;

/// Area of the volume an LBA falls into
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Region {
    Boot,
    /// `sector` is relative to the start of FAT copy `copy`
    FAT { copy: u8, sector: u16 },
    /// Sector relative to the root directory start
    RootDirectory(u32),
    /// Sector relative to the payload start
    Payload(u32),
    /// Reserved sectors, free clusters and anything past the volume end
    Unallocated,
}

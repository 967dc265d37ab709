use derive_more::{Display, From, Into};

/// Logical block address of a 512 bytes sector
#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Ord, PartialOrd, PartialEq)]
pub struct SectorID(u32);

impl SectorID {
    pub const BOOT: Self = Self(0);

    pub const fn new(lba: u32) -> Self {
        Self(lba)
    }

    pub const fn lba(self) -> u32 {
        self.0
    }
}

impl<I: Into<u32>> core::ops::AddAssign<I> for SectorID {
    fn add_assign(&mut self, rhs: I) {
        self.0 += rhs.into()
    }
}

/// FAT12 cluster number, only the low 12 bits are meaningful
#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Ord, PartialOrd, PartialEq)]
pub struct ClusterID(u16);

impl ClusterID {
    pub const FIRST: Self = Self(2);

    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u16 {
        self.0
    }

    /// Index of the cluster counting from the first data cluster
    pub const fn offset(self) -> u16 {
        self.0 - Self::FIRST.0
    }
}

impl core::ops::Add<u16> for ClusterID {
    type Output = Self;

    fn add(self, rhs: u16) -> Self {
        Self(self.0 + rhs)
    }
}

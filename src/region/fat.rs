use alloc::vec;
use alloc::vec::Vec;

use crate::config::SECTOR_SIZE;
use crate::geometry::Geometry;
use crate::types::ClusterID;

/// 12 bits FAT entry
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    Free,
    Next(ClusterID),
    BadCluster,
    Last,
}

impl TryFrom<u16> for Entry {
    type Error = u16;
    fn try_from(value: u16) -> Result<Self, u16> {
        match value {
            0 => Ok(Self::Free),
            2..=0xFEF => Ok(Self::Next(ClusterID::new(value))),
            0xFF7 => Ok(Self::BadCluster),
            0xFF8..=0xFFF => Ok(Self::Last),
            _ => Err(value),
        }
    }
}

impl From<Entry> for u16 {
    fn from(entry: Entry) -> u16 {
        match entry {
            Entry::Free => 0,
            Entry::Next(cluster_id) => cluster_id.id() & 0xFFF,
            Entry::BadCluster => 0xFF7,
            Entry::Last => 0xFFF,
        }
    }
}

/// One FAT copy, packed two entries per three bytes
#[derive(Clone, Debug)]
pub struct FAT(Vec<u8>);

impl FAT {
    pub fn new(geometry: &Geometry, media: u8) -> Self {
        let mut fat = Self(vec![0u8; geometry.fat_sectors as usize * SECTOR_SIZE]);
        // Entry 0 carries the media descriptor, entry 1 the end of chain marker
        fat.set(0, 0xF00 | media as u16);
        fat.set(1, Entry::Last.into());

        let first = geometry.first_cluster;
        let num_clusters = geometry.payload_clusters() as u16;
        for i in 0..num_clusters {
            let cluster_id = first + i;
            let entry = match i + 1 < num_clusters {
                true => Entry::Next(cluster_id + 1),
                false => Entry::Last,
            };
            fat.set(cluster_id.id() as usize, entry.into());
        }
        debug!("FAT chain {}..={} of {} clusters", first, first + (num_clusters - 1), num_clusters);
        fat
    }

    fn set(&mut self, index: usize, value: u16) {
        let offset = index * 3 / 2;
        let bytes = &mut self.0[offset..offset + 2];
        if index % 2 == 0 {
            bytes[0] = value as u8;
            bytes[1] = (bytes[1] & 0xF0) | ((value >> 8) as u8 & 0x0F);
        } else {
            bytes[0] = (bytes[0] & 0x0F) | ((value as u8 & 0x0F) << 4);
            bytes[1] = (value >> 4) as u8;
        }
    }

    pub fn get(&self, index: usize) -> u16 {
        let offset = index * 3 / 2;
        let word = u16::from_le_bytes([self.0[offset], self.0[offset + 1]]);
        match index % 2 == 0 {
            true => word & 0xFFF,
            false => word >> 4,
        }
    }

    pub fn entry(&self, cluster_id: ClusterID) -> Result<Entry, u16> {
        Entry::try_from(self.get(cluster_id.id() as usize))
    }

    pub fn sector(&self, index: u16) -> &[u8] {
        let offset = index as usize * SECTOR_SIZE;
        &self.0[offset..offset + SECTOR_SIZE]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

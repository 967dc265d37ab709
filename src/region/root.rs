use core::mem::{size_of, transmute};

use bitfield::bitfield;
use derive_more::Into;

use crate::config::{Config, DateTime, SECTOR_SIZE};
use crate::endian::Little as LE;
use crate::error::ConfigError;
use crate::geometry::{Geometry, DIR_ENTRY_SIZE};
use crate::region::boot::padded;
use crate::types::ClusterID;

bitfield! {
    #[derive(Copy, Clone, Debug, Default, Into, PartialEq, Eq)]
    pub struct Date(u16);
    year_offset, set_year_offset: 15, 9;
    pub month, set_month: 8, 5;
    pub day, set_day: 4, 0;
}

impl Date {
    pub fn year(&self) -> u16 {
        self.year_offset() + 1980
    }

    pub fn set_year(&mut self, year: u16) {
        self.set_year_offset(year.saturating_sub(1980))
    }
}

bitfield! {
    #[derive(Copy, Clone, Debug, Default, Into, PartialEq, Eq)]
    pub struct Time(u16);
    pub hour, set_hour: 15, 11;
    pub minute, set_minute: 10, 5;
    pub double_second, set_double_second: 4, 0;
}

impl Time {
    pub fn second(&self) -> u16 {
        self.double_second() * 2
    }

    pub fn set_second(&mut self, second: u16) {
        self.set_double_second(second / 2)
    }
}

impl From<&DateTime> for Date {
    fn from(datetime: &DateTime) -> Self {
        let mut date = Self::default();
        date.set_year(datetime.year);
        date.set_month(datetime.month as u16);
        date.set_day(datetime.day as u16);
        date
    }
}

impl From<&DateTime> for Time {
    fn from(datetime: &DateTime) -> Self {
        let mut time = Self::default();
        time.set_hour(datetime.hour as u16);
        time.set_minute(datetime.minute as u16);
        time.set_second(datetime.second as u16);
        time
    }
}

pub fn datetime(date: Date, time: Time) -> DateTime {
    DateTime {
        year: date.year(),
        month: date.month() as u8,
        day: date.day() as u8,
        hour: time.hour() as u8,
        minute: time.minute() as u8,
        second: time.second() as u8,
    }
}

bitfield! {
    #[derive(Copy, Clone, Default, Debug, Into, PartialEq, Eq)]
    pub struct Attributes(u8);
    pub read_only, set_read_only: 0;
    pub hidden, set_hidden: 1;
    pub system, set_system: 2;
    pub volume_id, set_volume_id: 3;
    pub directory, set_directory: 4;
    pub archive, set_archive: 5;
}

/// Short name directory entry
#[derive(Copy, Clone, Debug, Default)]
#[repr(C, packed(1))]
pub struct DirectoryEntry {
    pub name: [u8; 11],
    pub attributes: u8,
    _nt_reserved: u8,
    pub create_time_tenth: u8,
    pub create_time: LE<u16>,
    pub create_date: LE<u16>,
    pub last_access_date: LE<u16>,
    pub first_cluster_high: LE<u16>,
    pub write_time: LE<u16>,
    pub write_date: LE<u16>,
    pub first_cluster_low: LE<u16>,
    pub file_size: LE<u32>,
}

const _: () = assert!(size_of::<DirectoryEntry>() == DIR_ENTRY_SIZE as usize);

fn trimmed(bytes: &[u8]) -> &str {
    core::str::from_utf8(bytes).unwrap_or_default().trim_end()
}

/// `NAME.EXT` into the space padded 11 bytes form
fn short_name(name: &str) -> Option<[u8; 11]> {
    let (base, extension) = name.split_once('.').unwrap_or((name, ""));
    if base.is_empty() || base.starts_with(' ') || extension.contains('.') {
        return None;
    }
    let base: [u8; 8] = padded(base)?;
    let extension: [u8; 3] = padded(extension)?;
    let mut bytes = [0u8; 11];
    bytes[..8].copy_from_slice(&base);
    bytes[8..].copy_from_slice(&extension);
    let forbidden = b"\"*+,./:;<=>?[\\]|";
    if bytes.iter().any(|b| forbidden.contains(b)) {
        return None;
    }
    Some(bytes)
}

impl DirectoryEntry {
    fn new(name: [u8; 11], attributes: Attributes, created: &DateTime) -> Self {
        let date: LE<u16> = u16::from(Date::from(created)).into();
        let time: LE<u16> = u16::from(Time::from(created)).into();
        Self {
            name,
            attributes: attributes.into(),
            create_time: time,
            create_date: date,
            last_access_date: date,
            write_time: time,
            write_date: date,
            ..Default::default()
        }
    }

    pub fn file(config: &Config, geometry: &Geometry) -> Result<Self, ConfigError> {
        let name = short_name(config.file_name).ok_or(ConfigError::FileName)?;
        let mut attributes = Attributes::default();
        attributes.set_archive(true);
        let mut entry = Self::new(name, attributes, &config.created);
        entry.first_cluster_low = geometry.first_cluster.id().into();
        entry.file_size = geometry.payload_len().into();
        Ok(entry)
    }

    pub fn volume_label(config: &Config) -> Result<Self, ConfigError> {
        let label = padded(config.volume_label).ok_or(ConfigError::VolumeLabel)?;
        let mut attributes = Attributes::default();
        attributes.set_volume_id(true);
        Ok(Self::new(label, attributes, &config.created))
    }

    pub fn attributes(&self) -> Attributes {
        Attributes(self.attributes)
    }

    /// Name in `NAME.EXT` form, trailing spaces removed
    pub fn name(&self) -> heapless::String<12> {
        let name = self.name;
        let mut string = heapless::String::new();
        if self.attributes().volume_id() {
            string.push_str(trimmed(&name)).ok();
            return string;
        }
        string.push_str(trimmed(&name[..8])).ok();
        let extension = trimmed(&name[8..]);
        if !extension.is_empty() {
            string.push('.').ok();
            string.push_str(extension).ok();
        }
        string
    }

    pub fn first_cluster(&self) -> ClusterID {
        ClusterID::new({ self.first_cluster_low }.to_ne())
    }

    pub fn file_size(&self) -> u32 {
        { self.file_size }.to_ne()
    }

    pub fn created(&self) -> DateTime {
        datetime(Date({ self.create_date }.to_ne()), Time({ self.create_time }.to_ne()))
    }

    pub fn modified(&self) -> DateTime {
        datetime(Date({ self.write_date }.to_ne()), Time({ self.write_time }.to_ne()))
    }

    pub fn as_bytes(&self) -> &[u8; DIR_ENTRY_SIZE as usize] {
        unsafe { transmute(self) }
    }
}

/// First root directory sector, the remaining ones stay zero
#[derive(Clone, Debug)]
pub struct RootDirectory {
    file: DirectoryEntry,
    volume_label: Option<DirectoryEntry>,
    sector: [u8; SECTOR_SIZE],
}

impl RootDirectory {
    pub fn new(config: &Config, geometry: &Geometry) -> Result<Self, ConfigError> {
        if !config.created.is_representable() {
            return Err(ConfigError::Timestamp);
        }
        let file = DirectoryEntry::file(config, geometry)?;
        let mut sector = [0u8; SECTOR_SIZE];
        let size = DIR_ENTRY_SIZE as usize;
        sector[..size].copy_from_slice(file.as_bytes());
        let mut volume_label = None;
        if config.volume_label_entry {
            let entry = DirectoryEntry::volume_label(config)?;
            sector[size..size * 2].copy_from_slice(entry.as_bytes());
            volume_label = Some(entry);
        }
        debug!("File {} on cluster {} size {}", file.name(), file.first_cluster(), file.file_size());
        Ok(Self { file, volume_label, sector })
    }

    pub fn file(&self) -> &DirectoryEntry {
        &self.file
    }

    pub fn volume_label(&self) -> Option<&DirectoryEntry> {
        self.volume_label.as_ref()
    }

    pub fn sector(&self) -> &[u8; SECTOR_SIZE] {
        &self.sector
    }
}

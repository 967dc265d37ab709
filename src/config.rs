/// Calendar timestamp recorded in the directory entry
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self { year, month, day, hour, minute, second }
    }

    /// FAT stores years 1980..=2107 and seconds with two seconds granularity
    pub const fn is_representable(&self) -> bool {
        let date = matches!(self.year, 1980..=2107)
            && matches!(self.month, 1..=12)
            && matches!(self.day, 1..=31);
        let time = self.hour < 24 && self.minute < 60 && self.second < 60;
        date && time && self.second % 2 == 0
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDateTime> for DateTime {
    fn from(datetime: chrono::NaiveDateTime) -> Self {
        use chrono::{Datelike, Timelike};
        Self {
            year: datetime.year().clamp(1980, 2107) as u16,
            month: datetime.month() as u8,
            day: datetime.day() as u8,
            hour: datetime.hour() as u8,
            minute: datetime.minute() as u8,
            second: (datetime.second() & !1) as u8,
        }
    }
}

/// Content of the payload right after initialization
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fill {
    Zero,
    /// Repeated from the first payload byte to the last
    Pattern(&'static [u8]),
}

/// Build time parameters of the emulated volume
///
/// Payload occupies whatever the component does not reserve from the backing store,
/// i.e. `backing_size - reserved_size` bytes.
#[derive(Copy, Clone, Debug)]
pub struct Config {
    /// Total addressable backing size in bytes
    pub backing_size: u32,
    /// Bytes of the backing store kept by this component
    pub reserved_size: u32,
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    /// Including the boot sector
    pub reserved_sectors: u16,
    pub number_of_fats: u8,
    pub root_entry_count: u16,
    /// Cluster where the file starts, clusters before it stay free
    pub first_cluster: u16,
    pub media: u8,
    pub sectors_per_track: u16,
    pub number_of_heads: u16,
    pub hidden_sectors: u32,
    pub drive_number: u8,
    pub oem_name: &'static str,
    pub volume_id: u32,
    pub volume_label: &'static str,
    pub filesystem_type: &'static str,
    /// 8.3 name, e.g. `FIRMWARE.TXT`
    pub file_name: &'static str,
    pub created: DateTime,
    pub fill: Fill,
    /// Emit a volume label entry after the file entry
    pub volume_label_entry: bool,
    /// Place the "not a bootable disk" stub into the boot sector
    pub boot_stub: bool,
}

pub const SECTOR_SIZE: usize = 512;
pub const FIXED_DISK: u8 = 0xF8;
pub const HARD_DISK: u8 = 0x80;

impl Config {
    pub const DEFAULT: Self = Self {
        backing_size: 64 * 1024,
        reserved_size: 8 * 1024,
        bytes_per_sector: SECTOR_SIZE as u16,
        sectors_per_cluster: 4,
        reserved_sectors: 1,
        number_of_fats: 2,
        root_entry_count: 512,
        first_cluster: 2,
        media: FIXED_DISK,
        sectors_per_track: 32,
        number_of_heads: 64,
        hidden_sectors: 0,
        drive_number: HARD_DISK,
        oem_name: "mkfs.fat",
        volume_id: 0x02DDA5BD,
        volume_label: "BLUEPILL",
        filesystem_type: "FAT12",
        file_name: "FIRMWARE.TXT",
        created: DateTime::new(2018, 12, 25, 17, 11, 32),
        fill: Fill::Pattern(b"USB Mass Storage Class example. "),
        volume_label_entry: false,
        boot_stub: false,
    };

    pub const fn payload_len(&self) -> u32 {
        self.backing_size.saturating_sub(self.reserved_size)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

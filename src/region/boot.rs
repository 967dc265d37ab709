// Boot sector with BIOS parameter block

use core::mem::{size_of, transmute};

use crate::config::{Config, SECTOR_SIZE};
use crate::endian::Little as LE;
use crate::error::ConfigError;
use crate::geometry::Geometry;

pub const SIGNATURE: [u8; 2] = hex!("55 AA");
pub const EXTENDED_BOOT_SIGNATURE: u8 = 0x29;

const JUMP_BOOT: [u8; 3] = hex!("EB 3C 90");

// Prints the message at 0x7C5B then waits a key and reboots
const STUB_CODE: [u8; 29] = hex!(
    "0E 1F BE 5B 7C AC 22 C0 74 0B 56 B4 0E BB 07 00"
    "CD 10 5E EB F0 32 E4 CD 16 CD 19 EB FE"
);
const STUB_MESSAGE: &[u8] = b"This is not a bootable disk.  \
    Please insert a bootable floppy and\r\n\
    press any key to try again ... \r\n\0";

#[derive(Copy, Clone, Debug)]
#[repr(C, packed(1))]
pub struct BootSector {
    pub jump_boot: [u8; 3],
    pub oem_name: [u8; 8],
    pub bytes_per_sector: LE<u16>,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: LE<u16>,
    pub number_of_fats: u8,
    pub root_entry_count: LE<u16>,
    pub total_sectors_16: LE<u16>,
    pub media: u8,
    pub fat_size_16: LE<u16>, // unit sector
    pub sectors_per_track: LE<u16>,
    pub number_of_heads: LE<u16>,
    pub hidden_sectors: LE<u32>,
    pub total_sectors_32: LE<u32>, // 0 when total_sectors_16 suffices
    pub drive_number: u8,
    _reserved: u8,
    pub boot_signature: u8,
    pub volume_id: LE<u32>,
    pub volume_label: [u8; 11],
    pub filesystem_type: [u8; 8],
    pub boot_code: [u8; 448],
    pub signature: [u8; 2],
}

const _: () = assert!(size_of::<BootSector>() == SECTOR_SIZE);

/// Left aligned, space padded upper case ASCII
pub(crate) fn padded<const N: usize>(text: &str) -> Option<[u8; N]> {
    if text.len() > N {
        return None;
    }
    let mut bytes = [b' '; N];
    for (i, &byte) in text.as_bytes().iter().enumerate() {
        if !matches!(byte, 0x20..=0x7E) || byte.is_ascii_lowercase() {
            return None;
        }
        bytes[i] = byte;
    }
    Some(bytes)
}

impl BootSector {
    pub fn new(config: &Config, geometry: &Geometry) -> Result<Self, ConfigError> {
        // OEM name is informational, mkfs.fat writes it in lower case
        let oem = config.oem_name;
        if oem.len() > 8 || !oem.bytes().all(|b| matches!(b, 0x20..=0x7E)) {
            return Err(ConfigError::OEMName);
        }
        let mut oem_name = [b' '; 8];
        oem_name[..oem.len()].copy_from_slice(oem.as_bytes());
        let volume_label = padded(config.volume_label).ok_or(ConfigError::VolumeLabel)?;
        let filesystem_type = padded(config.filesystem_type).ok_or(ConfigError::FilesystemType)?;

        let mut boot_code = [0u8; 448];
        if config.boot_stub {
            boot_code[..STUB_CODE.len()].copy_from_slice(&STUB_CODE);
            let message = &mut boot_code[STUB_CODE.len()..];
            message[..STUB_MESSAGE.len()].copy_from_slice(STUB_MESSAGE);
        }

        Ok(Self {
            jump_boot: JUMP_BOOT,
            oem_name,
            bytes_per_sector: (SECTOR_SIZE as u16).into(),
            sectors_per_cluster: geometry.sectors_per_cluster,
            reserved_sectors: geometry.reserved_sectors.into(),
            number_of_fats: geometry.number_of_fats,
            root_entry_count: geometry.root_entry_count.into(),
            total_sectors_16: (geometry.total_sectors as u16).into(),
            media: config.media,
            fat_size_16: geometry.fat_sectors.into(),
            sectors_per_track: config.sectors_per_track.into(),
            number_of_heads: config.number_of_heads.into(),
            hidden_sectors: config.hidden_sectors.into(),
            total_sectors_32: 0u32.into(),
            drive_number: config.drive_number,
            _reserved: 0,
            boot_signature: EXTENDED_BOOT_SIGNATURE,
            volume_id: config.volume_id.into(),
            volume_label,
            filesystem_type,
            boot_code,
            signature: SIGNATURE,
        })
    }

    pub fn as_bytes(&self) -> &[u8; SECTOR_SIZE] {
        unsafe { transmute(self) }
    }
}

#[cfg(test)]
mod test {
    use memoffset::offset_of;

    use super::BootSector;
    use crate::config::Config;
    use crate::error::ConfigError;
    use crate::geometry::Geometry;

    #[test]
    fn test_layout() {
        assert_eq!(offset_of!(BootSector, bytes_per_sector), 11);
        assert_eq!(offset_of!(BootSector, total_sectors_16), 19);
        assert_eq!(offset_of!(BootSector, fat_size_16), 22);
        assert_eq!(offset_of!(BootSector, hidden_sectors), 28);
        assert_eq!(offset_of!(BootSector, drive_number), 36);
        assert_eq!(offset_of!(BootSector, volume_id), 39);
        assert_eq!(offset_of!(BootSector, volume_label), 43);
        assert_eq!(offset_of!(BootSector, filesystem_type), 54);
        assert_eq!(offset_of!(BootSector, boot_code), 62);
        assert_eq!(offset_of!(BootSector, signature), 510);
    }

    #[test]
    fn test_golden() {
        let config = Config { first_cluster: 3, ..Config::DEFAULT };
        let geometry = Geometry::new(&config).unwrap();
        let boot_sector = BootSector::new(&config, &geometry).unwrap();
        let bytes = boot_sector.as_bytes();
        let expected = hex!(
            "EB 3C 90 6D 6B 66 73 2E 66 61 74 00 02 04 01 00"
            "02 00 02 97 00 F8 01 00 20 00 40 00 00 00 00 00"
            "00 00 00 00 80 00 29 BD A5 DD 02 42 4C 55 45 50"
            "49 4C 4C 20 20 20 46 41 54 31 32 20 20 20"
        );
        assert_eq!(&bytes[..62], &expected[..]);
        assert!(bytes[62..510].iter().all(|&b| b == 0));
        assert_eq!(bytes[510..], hex!("55 AA"));
        assert_eq!({ boot_sector.total_sectors_16 }.to_ne(), 151);
        assert_eq!({ boot_sector.total_sectors_32 }.to_ne(), 0);
    }

    #[test]
    fn test_boot_stub() {
        let config = Config { boot_stub: true, ..Config::DEFAULT };
        let geometry = Geometry::new(&config).unwrap();
        let boot_sector = BootSector::new(&config, &geometry).unwrap();
        let bytes = boot_sector.as_bytes();
        assert_eq!(bytes[62..65], hex!("0E 1F BE"));
        assert_eq!(&bytes[91..119], b"This is not a bootable disk.");
        let end = 91 + super::STUB_MESSAGE.len();
        assert_eq!(&bytes[end - 4..end], b" \r\n\0");
        assert!(bytes[end..510].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_labels() {
        let geometry = Geometry::default();
        let build = |config: Config| BootSector::new(&config, &geometry).map(|_| ());
        let config = Config { volume_label: "NO NAME", ..Config::DEFAULT };
        assert_eq!(build(config), Ok(()));
        let config = Config { volume_label: "bluepill", ..Config::DEFAULT };
        assert_eq!(build(config), Err(ConfigError::VolumeLabel));
        let config = Config { volume_label: "TWELVE CHARS", ..Config::DEFAULT };
        assert_eq!(build(config), Err(ConfigError::VolumeLabel));
        let config = Config { filesystem_type: "FAT12 FAT", ..Config::DEFAULT };
        assert_eq!(build(config), Err(ConfigError::FilesystemType));
        let config = Config { oem_name: "mkfs.fat.", ..Config::DEFAULT };
        assert_eq!(build(config), Err(ConfigError::OEMName));
    }
}

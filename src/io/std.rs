use std::fs;
use std::io::{self, Write};
use std::path::Path;

use super::{BlockDevice, Sector};
use crate::config::SECTOR_SIZE;
use crate::types::SectorID;

fn device_error<E: core::fmt::Debug>(error: E) -> io::Error {
    io::Error::other(format!("{:?}", error))
}

/// Writes every sector of the device, i.e. a raw disk image
#[cfg_attr(not(feature = "async"), deasync::deasync)]
pub async fn export<D: BlockDevice, W: Write>(device: &mut D, writer: &mut W) -> io::Result<u64> {
    let mut sector: Sector = [0u8; SECTOR_SIZE];
    let num_sectors = device.num_sectors();
    for lba in 0..num_sectors {
        device.read(SectorID::new(lba), &mut sector).await.map_err(device_error)?;
        writer.write_all(&sector)?;
    }
    writer.flush()?;
    debug!("Exported {} sectors", num_sectors);
    Ok(num_sectors as u64 * SECTOR_SIZE as u64)
}

/// Exports the device into a newly created image file
#[cfg_attr(not(feature = "async"), deasync::deasync)]
pub async fn export_file<D: BlockDevice, P: AsRef<Path>>(device: &mut D, path: P) -> io::Result<u64> {
    let mut file = io::BufWriter::new(fs::File::create(path)?);
    export(device, &mut file).await
}

#[cfg(all(test, not(feature = "async")))]
mod test {
    use super::export;
    use crate::config::Config;
    use crate::PseudoFAT;

    #[test]
    fn test_export() {
        let mut disk = PseudoFAT::allocate(&Config::DEFAULT).unwrap();
        disk.initialize();
        let mut image = Vec::new();
        let size = export(&mut disk, &mut image).unwrap();
        assert_eq!(size, 147 * 512);
        assert_eq!(image.len(), 147 * 512);
        assert_eq!(image[510..512], hex!("55 AA"));
        assert_eq!(image[512..1024], image[1024..1536]);
        assert_eq!(&image[3 * 512..3 * 512 + 11], b"FIRMWARETXT");
        assert_eq!(&image[35 * 512..35 * 512 + 4], b"USB ");
    }
}

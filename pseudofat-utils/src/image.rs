use std::fs;
use std::io;
use std::io::Read;

use pseudofat::io::std::export_file;
use pseudofat::types::SectorID;
use pseudofat::PseudoFAT;

fn load(disk: &mut PseudoFAT<Vec<u8>>, path: &str) -> io::Result<()> {
    let geometry = *disk.geometry();
    let mut file = fs::File::open(path)?;
    let metadata = file.metadata()?;
    if metadata.len() > geometry.payload_len() as u64 {
        let message = format!("Payload exceeds {} bytes", geometry.payload_len());
        return Err(io::Error::new(io::ErrorKind::InvalidInput, message));
    }
    let mut id = SectorID::new(geometry.payload_start);
    let mut buf = Vec::with_capacity(512);
    loop {
        buf.clear();
        let size = (&mut file).take(512).read_to_end(&mut buf)?;
        if size == 0 {
            break;
        }
        let mut sector = [0u8; 512];
        // Last sector keeps the initial fill after end of input
        disk.read_sector(id, &mut sector);
        sector[..size].copy_from_slice(&buf);
        disk.write_sector(id, &sector);
        id += 1u32;
    }
    log::info!("Loaded {} bytes from {}", metadata.len(), path);
    Ok(())
}

pub fn image(disk: &mut PseudoFAT<Vec<u8>>, output: &str, payload: Option<&str>) -> io::Result<()> {
    if let Some(path) = payload {
        load(disk, path)?;
    }
    let size = export_file(disk, output)?;
    log::info!("Exported {} bytes to {}", size, output);
    Ok(())
}

use std::io;
use std::io::Write;

use pseudofat::types::SectorID;
use pseudofat::PseudoFAT;

/// Follows the root directory entry rather than reading the payload buffer directly
pub fn cat(disk: &PseudoFAT<Vec<u8>>) -> io::Result<()> {
    let geometry = disk.geometry();
    let file = disk.metadata().root_directory.file();
    let cluster = file.first_cluster().offset() as u32;
    let mut id = SectorID::new(geometry.first_data_sector + cluster * geometry.sectors_per_cluster as u32);
    let mut remain = file.file_size() as usize;
    let mut stdout = io::stdout().lock();
    let mut buf = [0u8; 512];
    while remain > 0 {
        disk.read_sector(id, &mut buf);
        let size = remain.min(buf.len());
        stdout.write_all(&buf[..size])?;
        remain -= size;
        id += 1u32;
    }
    stdout.flush()
}

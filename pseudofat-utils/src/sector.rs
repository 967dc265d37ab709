use std::io;

use pretty_hex::PrettyHex;
use pseudofat::types::SectorID;
use pseudofat::PseudoFAT;

pub fn sector(disk: &PseudoFAT<Vec<u8>>, lba: u32) -> io::Result<()> {
    let id = SectorID::new(lba);
    println!("{:?}", disk.geometry().classify(id));
    let mut sector = [0u8; 512];
    disk.read_sector(id, &mut sector);
    println!("{:?}", sector.hex_dump());
    Ok(())
}

use std::io;

use pseudofat::PseudoFAT;

pub fn info(disk: &PseudoFAT<Vec<u8>>) -> io::Result<()> {
    let geometry = disk.geometry();
    let metadata = disk.metadata();
    let boot = &metadata.boot_sector;
    let (oem_name, label) = (boot.oem_name, boot.volume_label);
    println!("OEM name:            {}", String::from_utf8_lossy(&oem_name).trim_end());
    println!("Volume label:        {}", String::from_utf8_lossy(&label).trim_end());
    println!("Total sectors:       {}", geometry.total_sectors);
    println!("Sectors per cluster: {}", geometry.sectors_per_cluster);
    println!("Clusters:            {}", geometry.cluster_count);
    println!(
        "FAT:                 {} * {} sectors at {}",
        geometry.number_of_fats,
        geometry.fat_sectors,
        geometry.fat_start()
    );
    println!(
        "Root directory:      {} sectors at {}",
        geometry.root_dir_sectors,
        geometry.root_dir_start()
    );
    println!("Payload:             {}..{}", geometry.payload_start, geometry.payload_end);

    let root = &metadata.root_directory;
    if let Some(entry) = root.volume_label() {
        println!("Label entry:         {}", entry.name());
    }
    let file = root.file();
    let created = file.created();
    print!("File:                {} {:8}", file.name(), file.file_size());
    print!(" {:04}-{:02}-{:02}", created.year, created.month, created.day);
    println!(" {:02}:{:02}:{:02}", created.hour, created.minute, created.second);
    println!("First cluster:       {}", file.first_cluster());
    Ok(())
}

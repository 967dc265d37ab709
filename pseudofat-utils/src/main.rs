mod cat;
mod image;
mod info;
mod sector;

use clap::Parser;
use pseudofat::{Config, DateTime, Fill, PseudoFAT};

#[derive(Debug, clap::Args)]
struct Sector {
    /// Logical block address to dump
    lba: u32,
}

#[derive(Debug, clap::Args)]
struct Image {
    /// Specify output image path
    output: String,
    /// Load file contents into payload before export
    #[clap(short, long)]
    payload: Option<String>,
    /// Stamp the file with current local time
    #[clap(long)]
    now: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// Print geometry and metadata summary
    Info,
    /// Hex dump a sector as read by host
    Sector(Sector),
    /// Print file contents on the standard output
    Cat,
    /// Export the volume as a raw disk image
    Image(Image),
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long)]
    quiet: bool,
    #[clap(short, action = clap::ArgAction::Count)]
    verbosity: u8,
    /// Cluster number of the file, clusters before it are left free
    #[clap(long, default_value_t = 2)]
    first_cluster: u16,
    /// Add a volume label entry to root directory
    #[clap(long)]
    volume_label_entry: bool,
    /// Fill payload with zeros instead of the text pattern
    #[clap(long)]
    zero: bool,
    #[clap(subcommand)]
    action: Action,
}

fn main() {
    let args = Args::parse();
    let level = match (args.quiet, args.verbosity) {
        (true, _) => log::LevelFilter::Off,
        (_, 0) => log::LevelFilter::Info,
        (_, 1) => log::LevelFilter::Debug,
        (_, _) => log::LevelFilter::Trace,
    };
    log::set_max_level(level);
    env_logger::builder().filter(None, level).target(env_logger::Target::Stdout).init();

    let mut config = Config {
        first_cluster: args.first_cluster,
        volume_label_entry: args.volume_label_entry,
        ..Config::DEFAULT
    };
    if args.zero {
        config.fill = Fill::Zero;
    }
    if let Action::Image(Image { now: true, .. }) = args.action {
        let now: DateTime = chrono::Local::now().naive_local().into();
        config.created = now;
    }

    let mut disk = match PseudoFAT::allocate(&config) {
        Ok(disk) => disk,
        Err(error) => {
            eprintln!("Invalid configuration: {}", error);
            std::process::exit(1);
        }
    };
    disk.initialize();

    let result = match args.action {
        Action::Info => info::info(&disk),
        Action::Sector(args) => sector::sector(&disk, args.lba),
        Action::Cat => cat::cat(&disk),
        Action::Image(args) => image::image(&mut disk, &args.output, args.payload.as_deref()),
    };
    if let Some(error) = result.err() {
        eprintln!("{:?}", error);
        std::process::exit(1);
    }
}

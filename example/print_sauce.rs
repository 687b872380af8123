use clap::Parser;
use sauce_codec::{SauceError, file};
use std::path::PathBuf;
use std::process;

/// Print SAUCE metadata from files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to read SAUCE information from
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Show comments if present
    #[arg(short, long)]
    comments: bool,

    /// Show raw technical details
    #[arg(short = 'r', long)]
    raw: bool,
}

fn main() {
    let args = Args::parse();

    let block = match file::sauce(&args.file) {
        Ok(block) => block,
        Err(SauceError::NoSauce) => {
            println!("No SAUCE record found in '{}'", args.file.display());
            process::exit(0);
        }
        Err(err) => {
            eprintln!("Error reading '{}': {}", args.file.display(), err);
            process::exit(1);
        }
    };

    println!("SAUCE Information for '{}'", args.file.display());
    println!("{}", "=".repeat(60));

    for detail in block.details() {
        println!("{:<16} {}", detail.name, detail.value);
    }

    if args.comments && !block.comments().is_empty() {
        println!();
        println!("Comments ({}):", block.comments().len());
        println!("{}", "-".repeat(40));
        for (i, comment) in block.comments().iter().enumerate() {
            println!("{:3}: {}", i + 1, comment);
        }
    }

    if args.raw {
        let header = block.header();
        println!();
        println!("Raw SAUCE Data:");
        println!("{}", "-".repeat(40));
        println!("DataType:       {}", header.data_type);
        println!("FileType:       {}", header.file_type);
        println!("TInfo1:         {}", header.t_info1);
        println!("TInfo2:         {}", header.t_info2);
        println!("TInfo3:         {}", header.t_info3);
        println!("TInfo4:         {}", header.t_info4);
        println!(
            "TFlags:         0b{:08b} (0x{:02X})",
            header.t_flags, header.t_flags
        );
        if let Some(info_s) = &header.t_info_s {
            println!("TInfoS:         {:?}", info_s);
        }
        println!("Block Size:     {} bytes", block.len());
    }
}

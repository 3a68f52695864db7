use clap::{value_parser, Arg, ArgAction, Command as ClapCommand};
use std::process;
use log::error;

use photometa::commands::{CommandFactory, PhotometaCommandFactory};
use photometa::utils::logger::init_logger;

fn main() {
    let matches = ClapCommand::new("photometa")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read Exif and XMP metadata from JPEG files without decoding image data")
        .arg(
            Arg::new("files")
                .help("Input JPEG files")
                .value_name("FILE")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tags")
                .short('t')
                .long("tags")
                .help("List every resolved tag")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("xmp")
                .short('x')
                .long("xmp")
                .help("Summarise the XMP packet")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("trace-markers")
                .long("trace-markers")
                .help("Log every JPEG marker the scanner visits")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-directories")
                .long("max-directories")
                .help("Maximum number of IFDs resolved per file")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .required(false),
        )
        .arg(
            Arg::new("no-maker-notes")
                .long("no-maker-notes")
                .help("Do not walk maker-note directories")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_logger(matches.get_flag("verbose"), matches.get_flag("trace-markers"));

    let factory = PhotometaCommandFactory::new();

    match factory.create_command(&matches) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}

//! Command-line argument definitions

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Build the argument parser for the `segpack` binary
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("segpack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Package segmentation masks as transparent per-region cutouts in a zip archive")
        .arg(
            Arg::new("input")
                .help("Input image file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("masks")
                .short('m')
                .long("masks")
                .help("Directory with one mask image per region (default: <input-stem>_masks)")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("compression")
                .long("compression")
                .help("Archive entry compression (stored, deflate, zstd)")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .help("Archive entry name prefix (default: seg_)")
                .value_name("PREFIX")
                .required(false),
        )
        .arg(
            Arg::new("skip-invalid")
                .long("skip-invalid")
                .help("Skip regions whose bounding box falls outside the image instead of failing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("label-image")
                .long("label-image")
                .help("Also write the flattened label image as <input-stem>_labels.png")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("progress")
                .long("progress")
                .help("Show a progress bar while extracting regions")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write log output to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
}

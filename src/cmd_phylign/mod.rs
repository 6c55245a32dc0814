//! Subcommand modules for the `phylign` binary.

use clap::*;
use phylign::libs::align::{AlignMode, AlignParams};
use phylign::libs::sub_matrix::SubMatrix;

pub mod align;
pub mod nj;
pub mod score;
pub mod submat;
pub mod tree;

/// Options shared by every command that runs the aligner.
pub fn align_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("mode")
            .long("mode")
            .num_args(1)
            .default_value("global")
            .value_parser(["global", "local", "affine"])
            .help("Alignment algorithm"),
    )
    .arg(
        Arg::new("matrix")
            .long("matrix")
            .short('m')
            .num_args(1)
            .default_value("blosum62")
            .help("Substitution matrix: blosum62, dna, or a matrix file"),
    )
    .arg(
        Arg::new("gap")
            .long("gap")
            .num_args(1)
            .default_value("-1")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i32))
            .help("Linear gap penalty (global, local)"),
    )
    .arg(
        Arg::new("open")
            .long("open")
            .num_args(1)
            .default_value("-4")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i32))
            .help("Gap open penalty (affine)"),
    )
    .arg(
        Arg::new("extend")
            .long("extend")
            .num_args(1)
            .default_value("-1")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i32))
            .help("Gap extension penalty (affine)"),
    )
}

pub fn align_params(args: &ArgMatches) -> anyhow::Result<(SubMatrix, AlignParams)> {
    let matrix = SubMatrix::from_name(args.get_one::<String>("matrix").unwrap())?;
    let mode: AlignMode = args.get_one::<String>("mode").unwrap().parse()?;

    let params = AlignParams {
        mode,
        gap: *args.get_one::<i32>("gap").unwrap(),
        gap_open: *args.get_one::<i32>("open").unwrap(),
        gap_extend: *args.get_one::<i32>("extend").unwrap(),
    };

    Ok((matrix, params))
}

pub fn parallel_arg() -> Arg {
    Arg::new("parallel")
        .long("parallel")
        .short('p')
        .num_args(1)
        .default_value("1")
        .value_parser(value_parser!(usize))
        .help("Number of threads for parallel processing. 0 uses all cores")
}

pub fn outfile_arg() -> Arg {
    Arg::new("outfile")
        .short('o')
        .long("outfile")
        .num_args(1)
        .default_value("stdout")
        .help("Output filename. [stdout] for screen")
}

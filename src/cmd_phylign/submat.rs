use clap::*;
use phylign::libs::sub_matrix::SubMatrix;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("submat")
        .about("Validate and print a substitution matrix")
        .after_help(
            r###"
Loads a substitution matrix and prints it in canonical layout.

Notes:
* Built-in presets: blosum62, dna (case-insensitive).
* Any other value is read as a file in BLAST/BLOSUM layout:
  a header of symbols, then one row per symbol (row labels optional).
* Lines starting with '#' are comments.
* The table must be square and symmetric.

Examples:
1. Print the BLOSUM62 preset:
   phylign submat blosum62

2. Check a custom matrix:
   phylign submat tests/matrix/tiny.txt
"###,
        )
        .arg(
            Arg::new("matrix")
                .required(true)
                .index(1)
                .help("Preset name or matrix file"),
        )
        .arg(super::outfile_arg())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let name = args.get_one::<String>("matrix").unwrap();
    let outfile = args.get_one::<String>("outfile").unwrap();

    let matrix = SubMatrix::from_name(name)?;

    let mut writer = phylign::writer(outfile)?;
    writer.write_all(matrix.to_text().as_bytes())?;

    Ok(())
}

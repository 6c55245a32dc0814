use clap::*;
use phylign::libs::align::align;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("align")
        .about("Align two sequences")
        .after_help(
            r###"
Aligns two sequences given on the command line and prints
<aligned1> TAB <aligned2> TAB <score>

Modes:
* global - Needleman-Wunsch, linear gap penalty (--gap)
* local  - Smith-Waterman, linear gap penalty (--gap); only the best
           matching substrings are printed
* affine - Gotoh global alignment, gap costs --open + --extend

Notes:
* Penalties are negative numbers added to the score.
* Residues are matched case-insensitively; every residue must be in the matrix.
* Ties prefer a match/mismatch column, then a gap in the second sequence,
  then a gap in the first.

Examples:
1. Protein global alignment with BLOSUM62:
   phylign align HEAGAWGHEE PAWHEAE

2. Local DNA alignment:
   phylign align TTTTACGTACGTTTTT GGACGTACGGG --matrix dna --mode local

3. Affine gaps:
   phylign align AAAATTTTCCCC AAAACCCC --matrix dna --mode affine --open -4 --extend -1
"###,
        )
        .arg(
            Arg::new("seq1")
                .required(true)
                .index(1)
                .help("First sequence"),
        )
        .arg(
            Arg::new("seq2")
                .required(true)
                .index(2)
                .help("Second sequence"),
        )
        .arg(super::outfile_arg());

    super::align_args(cmd)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let seq1 = args.get_one::<String>("seq1").unwrap();
    let seq2 = args.get_one::<String>("seq2").unwrap();
    let outfile = args.get_one::<String>("outfile").unwrap();

    let (matrix, params) = super::align_params(args)?;

    let aln = align(&params, &matrix, seq1.as_bytes(), seq2.as_bytes())?;

    let mut writer = phylign::writer(outfile)?;
    writer.write_fmt(format_args!(
        "{}\t{}\t{}\n",
        aln.aligned_a, aln.aligned_b, aln.score
    ))?;

    Ok(())
}

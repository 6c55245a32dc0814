use clap::*;
use phylign::libs::score_matrix::ScoreMatrixBuilder;
use phylign::libs::seq::read_fasta;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("score")
        .about("All-pairs alignment scores of a FASTA file")
        .after_help(
            r###"
Aligns every pair of sequences and writes the score matrix in relaxed PHYLIP.

Notes:
* The diagonal holds each sequence's self-alignment score.
* --distance converts scores to distances:
  d(i,j) = (S(i,i) + S(j,j)) / 2 - S(i,j), negative values become 0
* Sequence names must be unique.
* Any failing pair (e.g. an unknown residue) aborts the whole run.
* Results do not depend on --parallel.

Examples:
1. Protein scores with BLOSUM62:
   phylign score tests/fasta/globins.fa

2. Distances with affine gaps on 4 threads:
   phylign score tests/fasta/globins.fa --mode affine --distance --parallel 4
"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input FASTA file. [stdin] for standard input"),
        )
        .arg(
            Arg::new("distance")
                .long("distance")
                .short('d')
                .action(ArgAction::SetTrue)
                .help("Output distances instead of scores"),
        )
        .arg(super::parallel_arg())
        .arg(super::outfile_arg());

    super::align_args(cmd)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let outfile = args.get_one::<String>("outfile").unwrap();
    let is_distance = args.get_flag("distance");
    let opt_parallel = *args.get_one::<usize>("parallel").unwrap();

    let (matrix, params) = super::align_params(args)?;
    let seqs = read_fasta(infile)?;

    let scores = ScoreMatrixBuilder::new(&matrix, &params)
        .threads(opt_parallel)
        .build(&seqs)?;

    let text = if is_distance {
        scores.to_distance()?.to_phylip()
    } else {
        scores.to_phylip()
    };

    let mut writer = phylign::writer(outfile)?;
    writer.write_all(text.as_bytes())?;

    Ok(())
}

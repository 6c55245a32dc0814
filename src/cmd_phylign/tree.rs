use clap::*;
use phylign::libs::phylo::build;
use phylign::libs::phylo::writer::write_newick_with_format;
use phylign::libs::score_matrix::ScoreMatrixBuilder;
use phylign::libs::seq::read_fasta;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("tree")
        .about("Build a Neighbor-Joining tree from sequences")
        .after_help(
            r###"
Runs the whole pipeline on a FASTA file:
all-pairs alignment scores -> distances -> Neighbor-Joining -> Newick

Notes:
* Distances are d(i,j) = (S(i,i) + S(j,j)) / 2 - S(i,j).
* Equivalent to `phylign score --distance | phylign nj stdin`.
* PHYLIGN_LOG=warn (default) reports clamped negative branch lengths.

Examples:
1. Protein tree:
   phylign tree tests/fasta/globins.fa

2. Affine gaps, 4 threads, indented output:
   phylign tree tests/fasta/globins.fa --mode affine --parallel 4 --indent "  "
"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input FASTA file. [stdin] for standard input"),
        )
        .arg(super::nj::indent_arg())
        .arg(super::parallel_arg())
        .arg(super::outfile_arg());

    super::align_args(cmd)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let outfile = args.get_one::<String>("outfile").unwrap();
    let indent = args.get_one::<String>("indent").map_or("", String::as_str);
    let opt_parallel = *args.get_one::<usize>("parallel").unwrap();

    let (matrix, params) = super::align_params(args)?;
    let seqs = read_fasta(infile)?;

    let scores = ScoreMatrixBuilder::new(&matrix, &params)
        .threads(opt_parallel)
        .build(&seqs)?;
    let tree = build::nj(&scores.to_distance()?)?;

    let mut writer = phylign::writer(outfile)?;
    writer.write_all((write_newick_with_format(&tree, indent) + "\n").as_bytes())?;

    Ok(())
}

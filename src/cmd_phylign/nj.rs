use clap::*;
use phylign::libs::phylo::build;
use phylign::libs::phylo::matrix::DistanceMatrix;
use phylign::libs::phylo::writer::write_newick_with_format;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("nj")
        .about("Construct a phylogenetic tree using Neighbor-Joining")
        .after_help(
            r###"
Constructs a phylogenetic tree from a distance matrix using the Neighbor-Joining (NJ) algorithm.

Notes:
* Input: relaxed PHYLIP distance matrix (count line, then name + N values per row).
* Output: Newick tree. The last join is written as a three-way root.
* Negative branch lengths are clamped to 0 with a warning.
* Ties in the Q criterion go to the first pair in input order.

Examples:
1. Build tree from matrix:
   phylign nj tests/phylip/wiki5.phy -o tree.nwk

2. Pipe matrix to tree:
   phylign score tests/fasta/globins.fa --distance | phylign nj stdin

3. Indented output:
   phylign nj tests/phylip/wiki5.phy --indent "  "
"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input PHYLIP matrix file. [stdin] for standard input"),
        )
        .arg(indent_arg())
        .arg(super::outfile_arg())
}

pub fn indent_arg() -> Arg {
    Arg::new("indent")
        .long("indent")
        .num_args(1)
        .help("Indent the Newick output with this string, e.g. two spaces")
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let outfile = args.get_one::<String>("outfile").unwrap();
    let indent = args.get_one::<String>("indent").map_or("", String::as_str);

    let matrix = DistanceMatrix::from_relaxed_phylip(infile)?;
    let tree = build::nj(&matrix)?;

    let mut writer = phylign::writer(outfile)?;
    writer.write_all((write_newick_with_format(&tree, indent) + "\n").as_bytes())?;

    Ok(())
}

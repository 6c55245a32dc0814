extern crate clap;
use clap::*;
use tracing_subscriber::EnvFilter;

mod cmd_phylign;

fn main() -> anyhow::Result<()> {
    // PHYLIGN_LOG=debug shows per-join and per-batch progress
    let log_level = std::env::var("PHYLIGN_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&log_level))
        .with_writer(std::io::stderr)
        .init();

    let app = Command::new("phylign")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`phylign` - Pairwise alignment and Neighbor-Joining trees")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_phylign::submat::make_subcommand())
        .subcommand(cmd_phylign::align::make_subcommand())
        .subcommand(cmd_phylign::score::make_subcommand())
        .subcommand(cmd_phylign::nj::make_subcommand())
        .subcommand(cmd_phylign::tree::make_subcommand())
        .after_help(
            r###"Subcommands:

* Alignment:
    * submat - Validate and print a substitution matrix
    * align  - Align two sequences (global, local or affine)
    * score  - All-pairs alignment scores of a FASTA file

* Phylogeny:
    * nj     - Neighbor-Joining tree from a PHYLIP distance matrix
    * tree   - FASTA -> scores -> distances -> Newick

Log level is read from PHYLIGN_LOG (default: warn).

"###,
        );

    match app.get_matches().subcommand() {
        Some(("submat", sub_matches)) => cmd_phylign::submat::execute(sub_matches),
        Some(("align", sub_matches)) => cmd_phylign::align::execute(sub_matches),
        Some(("score", sub_matches)) => cmd_phylign::score::execute(sub_matches),
        Some(("nj", sub_matches)) => cmd_phylign::nj::execute(sub_matches),
        Some(("tree", sub_matches)) => cmd_phylign::tree::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}

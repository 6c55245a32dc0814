use assert_cmd::Command;

#[test]
fn command_tree_dna() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("phylign")?;
    let output = cmd
        .arg("tree")
        .arg("stdin")
        .arg("--matrix")
        .arg("dna")
        .write_stdin(">s1\nACGT\n>s2\nACGA\n>s3\nTCGA\n")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout, "(s1:2,s2:0,s3:2);\n");

    Ok(())
}

#[test]
fn command_tree_matches_score_then_nj() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("phylign")?;
    let output = cmd
        .arg("score")
        .arg("tests/fasta/globins.fa")
        .arg("--distance")
        .output()?;
    let phylip = String::from_utf8(output.stdout)?;

    let mut cmd = Command::cargo_bin("phylign")?;
    let output = cmd.arg("nj").arg("stdin").write_stdin(phylip).output()?;
    let piped = String::from_utf8(output.stdout)?;

    let mut cmd = Command::cargo_bin("phylign")?;
    let output = cmd
        .arg("tree")
        .arg("tests/fasta/globins.fa")
        .arg("--parallel")
        .arg("2")
        .output()?;
    let direct = String::from_utf8(output.stdout)?;

    assert_eq!(piped, direct);
    for name in ["HBA_HUMAN", "HBB_HUMAN", "MYG_PHYCA", "GLB5_PETMA"] {
        assert_eq!(direct.matches(name).count(), 1);
    }
    assert!(direct.ends_with(";\n"));

    Ok(())
}

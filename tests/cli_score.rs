use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn command_score_globins() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("phylign")?;
    let output = cmd.arg("score").arg("tests/fasta/globins.fa").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "4");
    assert!(lines[1].starts_with("HBA_HUMAN\t"));
    assert!(lines[4].starts_with("GLB5_PETMA\t"));

    // symmetric
    let rows: Vec<Vec<i32>> = lines[1..]
        .iter()
        .map(|l| l.split('\t').skip(1).map(|v| v.parse().unwrap()).collect())
        .collect();
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(rows[i][j], rows[j][i]);
        }
    }

    Ok(())
}

#[test]
fn command_score_distance() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("phylign")?;
    let output = cmd
        .arg("score")
        .arg("stdin")
        .arg("--matrix")
        .arg("dna")
        .arg("--distance")
        .write_stdin(">s1\nACGT\n>s2\nACGA\n>s3\nTCGA\n")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout, "3\ns1\t0\t2\t4\ns2\t2\t0\t2\ns3\t4\t2\t0\n");

    Ok(())
}

#[test]
fn command_score_parallel() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("phylign")?;
    let output = cmd
        .arg("score")
        .arg("tests/fasta/globins.fa")
        .arg("--mode")
        .arg("affine")
        .output()?;
    let single = String::from_utf8(output.stdout)?;

    let mut cmd = Command::cargo_bin("phylign")?;
    let output = cmd
        .arg("score")
        .arg("tests/fasta/globins.fa")
        .arg("--mode")
        .arg("affine")
        .arg("--parallel")
        .arg("4")
        .output()?;
    let multi = String::from_utf8(output.stdout)?;

    assert_eq!(single, multi);

    Ok(())
}

#[test]
fn command_score_errors() -> anyhow::Result<()> {
    // protein residues are not in the DNA alphabet
    let mut cmd = Command::cargo_bin("phylign")?;
    cmd.arg("score")
        .arg("tests/fasta/globins.fa")
        .arg("--matrix")
        .arg("dna")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed"));

    let mut cmd = Command::cargo_bin("phylign")?;
    cmd.arg("score")
        .arg("stdin")
        .write_stdin(">only\nACGT\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2"));

    let mut cmd = Command::cargo_bin("phylign")?;
    cmd.arg("score")
        .arg("stdin")
        .write_stdin(">x\nACGT\n>x\nACGA\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate"));

    Ok(())
}

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn command_align_global() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("phylign")?;
    let output = cmd
        .arg("align")
        .arg("AC")
        .arg("AC")
        .arg("--matrix")
        .arg("tests/matrix/tiny.txt")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout, "AC\tAC\t4\n");

    Ok(())
}

#[test]
fn command_align_local() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("phylign")?;
    let output = cmd
        .arg("align")
        .arg("AC")
        .arg("CA")
        .arg("--matrix")
        .arg("tests/matrix/tiny.txt")
        .arg("--mode")
        .arg("local")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout, "A\tA\t2\n");

    let mut cmd = Command::cargo_bin("phylign")?;
    let output = cmd
        .arg("align")
        .arg("TTTTACGTACGTTTTT")
        .arg("GGACGTACGGG")
        .arg("--matrix")
        .arg("dna")
        .arg("--mode")
        .arg("local")
        .arg("--gap")
        .arg("-2")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout, "ACGTACG\tACGTACG\t7\n");

    Ok(())
}

#[test]
fn command_align_affine() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("phylign")?;
    let output = cmd
        .arg("align")
        .arg("AAAATTTTCCCC")
        .arg("AAAACCCC")
        .arg("--matrix")
        .arg("dna")
        .arg("--mode")
        .arg("affine")
        .arg("--open")
        .arg("-4")
        .arg("--extend")
        .arg("-1")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout, "AAAATTTTCCCC\tAAAA----CCCC\t1\n");

    // the same pair with a linear penalty
    let mut cmd = Command::cargo_bin("phylign")?;
    let output = cmd
        .arg("align")
        .arg("AAAATTTTCCCC")
        .arg("AAAACCCC")
        .arg("--matrix")
        .arg("dna")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.ends_with("\t4\n"));

    Ok(())
}

#[test]
fn command_align_protein() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("phylign")?;
    let output = cmd.arg("align").arg("HEAGAWGHEE").arg("heagawghee").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // case-insensitive scoring, original case kept
    let fields: Vec<&str> = stdout.trim_end().split('\t').collect();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0], "HEAGAWGHEE");
    assert_eq!(fields[1], "heagawghee");
    // BLOSUM62 diagonal: H8 E5 A4 G6 A4 W11 G6 H8 E5 E5
    assert_eq!(fields[2], "62");

    Ok(())
}

#[test]
fn command_align_errors() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("phylign")?;
    cmd.arg("align")
        .arg("ACGX")
        .arg("ACGT")
        .arg("--matrix")
        .arg("dna")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown symbol 'X'"));

    let mut cmd = Command::cargo_bin("phylign")?;
    cmd.arg("align")
        .arg("ACGT")
        .arg("ACGT")
        .arg("--mode")
        .arg("msa")
        .assert()
        .failure();

    let mut cmd = Command::cargo_bin("phylign")?;
    cmd.arg("align")
        .arg("ACGT")
        .arg("ACGT")
        .arg("--matrix")
        .arg("tests/matrix/no-such.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such.txt"));

    Ok(())
}

use std::io::{BufRead, BufReader, BufWriter, Read, Write};

/// Open `input` for buffered reading.
///
/// `stdin` reads standard input; files ending in `.gz` are decompressed on the fly.
///
/// ```
/// use std::io::BufRead;
/// let reader = phylign::reader("tests/phylip/wiki5.phy").unwrap();
/// let lines: Vec<_> = reader.lines().collect();
/// assert_eq!(lines.len(), 6);
///
/// assert!(phylign::reader("tests/phylip/no-such-file.phy").is_err());
/// ```
pub fn reader(input: &str) -> std::io::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path).map_err(|why| {
            std::io::Error::new(
                why.kind(),
                format!("could not open {}: {}", path.display(), why),
            )
        })?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

/// Open `output` for buffered writing. `stdout` writes to the screen.
pub fn writer(output: &str) -> std::io::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        Box::new(BufWriter::new(std::fs::File::create(output)?))
    };

    Ok(writer)
}

/// Slurp the whole of `input` into a string.
pub fn read_to_string(input: &str) -> std::io::Result<String> {
    let mut reader = reader(input)?;
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Ok(content)
}

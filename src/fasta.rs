//! FASTA reader for chromosome sequences, plain or gzip-compressed.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::chromosome::Chromosome;
use crate::error::Error;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read every record of a FASTA file as a chromosome, in file order.
/// Gzip input is recognized by its magic bytes, not by the file extension.
pub fn read_chromosomes(path: &Path) -> Result<Vec<Chromosome>, Error> {
    let file = File::open(path)?;
    let chromosomes = read_fasta(file)?;
    log::debug!(
        "read {} sequences from {}",
        chromosomes.len(),
        path.display()
    );
    Ok(chromosomes)
}

/// Read FASTA from any source, decompressing on the fly when it is gzip.
pub fn read_fasta<R: Read>(reader: R) -> Result<Vec<Chromosome>, Error> {
    let mut reader = BufReader::new(reader);
    let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
    if is_gzip {
        parse_fasta(BufReader::new(MultiGzDecoder::new(reader)))
    } else {
        parse_fasta(reader)
    }
}

fn parse_fasta<R: BufRead>(reader: R) -> Result<Vec<Chromosome>, Error> {
    let mut chromosomes = Vec::new();
    let mut current_name: Option<String> = None;
    let mut current_sequence: Vec<u8> = Vec::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        if let Some(header) = line.strip_prefix('>') {
            if let Some(name) = current_name.take() {
                chromosomes.push(Chromosome::new(name, std::mem::take(&mut current_sequence))?);
            }
            current_name = Some(sequence_name(header, line_number + 1)?);
        } else if line.is_empty() || line.starts_with(';') {
            continue;
        } else if current_name.is_some() {
            current_sequence.extend(line.bytes().filter(|b| !b.is_ascii_whitespace()));
        } else {
            return Err(Error::Parse(format!(
                "line {}: sequence data before the first FASTA header",
                line_number + 1
            )));
        }
    }

    if let Some(name) = current_name {
        chromosomes.push(Chromosome::new(name, current_sequence)?);
    }
    Ok(chromosomes)
}

/// The sequence name is the first whitespace-delimited token of the header.
fn sequence_name(header: &str, line_number: usize) -> Result<String, Error> {
    header
        .split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| Error::Parse(format!("line {line_number}: empty FASTA header")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::{Cursor, Write};

    fn make_gz(content: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(content).unwrap();
        encoder.finish().unwrap()
    }

    const FASTA: &[u8] = b">chr1 Homo sapiens chromosome 1\nACGTacgt\nNNNN\n\n>chr2\nTTTT\nAAAA\n>chrM\nGGG\n";

    #[test]
    fn plain_fasta() {
        let chrs = read_fasta(Cursor::new(FASTA)).unwrap();
        let names: Vec<&str> = chrs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["chr1", "chr2", "chrM"]);
        assert_eq!(chrs[0].sequence(), b"ACGTACGTNNNN");
        assert_eq!(chrs[1].sequence(), b"TTTTAAAA");
        assert_eq!(chrs[2].length, 3);
    }

    #[test]
    fn gzip_fasta_is_detected() {
        let chrs = read_fasta(Cursor::new(make_gz(FASTA))).unwrap();
        assert_eq!(chrs.len(), 3);
        assert_eq!(chrs[0].sequence(), b"ACGTACGTNNNN");
    }

    #[test]
    fn windows_line_endings() {
        let chrs = read_fasta(Cursor::new(b">chr1\r\nAC\r\nGT\r\n".as_slice())).unwrap();
        assert_eq!(chrs[0].sequence(), b"ACGT");
    }

    #[test]
    fn empty_record_and_empty_input() {
        let chrs = read_fasta(Cursor::new(b">empty\n>chr1\nA\n".as_slice())).unwrap();
        assert_eq!(chrs[0].length, 0);
        assert_eq!(chrs[1].sequence(), b"A");
        assert!(read_fasta(Cursor::new(b"".as_slice())).unwrap().is_empty());
    }

    #[test]
    fn malformed_input() {
        assert!(read_fasta(Cursor::new(b"ACGT\n>chr1\nA\n".as_slice())).is_err());
        assert!(read_fasta(Cursor::new(b">\nACGT\n".as_slice())).is_err());
        assert!(read_fasta(Cursor::new(b">  \nACGT\n".as_slice())).is_err());
    }

    #[test]
    fn reads_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&make_gz(FASTA)).unwrap();
        let chrs = read_chromosomes(f.path()).unwrap();
        assert_eq!(chrs.len(), 3);
    }
}

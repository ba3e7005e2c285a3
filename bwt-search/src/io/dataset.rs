use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, Write};

use crate::search::PatternHits;

/// 按行组织的查询数据：
/// 第一行为参考串，第二行为空白分隔的模式串，可选第三行为允许的错配数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub reference: Vec<u8>,
    pub patterns: Vec<Vec<u8>>,
    pub max_mismatches: Option<usize>,
}

pub fn read_dataset<R: BufRead>(reader: R) -> Result<Dataset> {
    let mut lines = reader.lines().filter(|l| l.as_ref().map_or(true, |s| !s.trim().is_empty()));

    let reference = lines
        .next()
        .ok_or_else(|| anyhow!("dataset is empty"))??
        .trim()
        .as_bytes()
        .to_vec();
    let patterns = match lines.next() {
        Some(line) => read_patterns_line(&line?),
        None => Vec::new(),
    };
    let max_mismatches = match lines.next() {
        Some(line) => {
            let line = line?;
            let m = line
                .trim()
                .parse::<usize>()
                .with_context(|| format!("invalid mismatch count '{}'", line.trim()))?;
            Some(m)
        }
        None => None,
    };
    Ok(Dataset { reference, patterns, max_mismatches })
}

/// 读取模式串：每行可含多个空白分隔的模式串
pub fn read_patterns<R: BufRead>(reader: R) -> Result<Vec<Vec<u8>>> {
    let mut patterns = Vec::new();
    for line in reader.lines() {
        patterns.extend(read_patterns_line(&line?));
    }
    Ok(patterns)
}

fn read_patterns_line(line: &str) -> Vec<Vec<u8>> {
    line.split_whitespace().map(|p| p.as_bytes().to_vec()).collect()
}

/// 每条模式串输出一行：`pattern: p1 p2 ...`
pub fn write_hits<W: Write>(out: &mut W, hits: &[PatternHits]) -> Result<()> {
    for h in hits {
        write!(out, "{}:", String::from_utf8_lossy(&h.pattern))?;
        for p in &h.positions {
            write!(out, " {}", p)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_full_dataset() {
        let data = b"ACATGCTACTTT\nATT GCC GCTA TCA\n1\n";
        let ds = read_dataset(Cursor::new(&data[..])).unwrap();
        assert_eq!(ds.reference, b"ACATGCTACTTT");
        assert_eq!(ds.patterns, vec![b"ATT".to_vec(), b"GCC".to_vec(), b"GCTA".to_vec(), b"TCA".to_vec()]);
        assert_eq!(ds.max_mismatches, Some(1));
    }

    #[test]
    fn parse_dataset_without_mismatches_and_with_crlf() {
        let data = b"\r\nAATCGGGTTCAATCGGGGT\r\nATCG GGGT\r\n";
        let ds = read_dataset(Cursor::new(&data[..])).unwrap();
        assert_eq!(ds.reference, b"AATCGGGTTCAATCGGGGT");
        assert_eq!(ds.patterns.len(), 2);
        assert_eq!(ds.max_mismatches, None);
    }

    #[test]
    fn bad_mismatch_line_is_an_error() {
        let data = b"ACGT\nAC\nmany\n";
        assert!(read_dataset(Cursor::new(&data[..])).is_err());
        assert!(read_dataset(Cursor::new(&b""[..])).is_err());
    }

    #[test]
    fn patterns_across_lines() {
        let data = b"AC GT\n\nTTA\n";
        let pats = read_patterns(Cursor::new(&data[..])).unwrap();
        assert_eq!(pats, vec![b"AC".to_vec(), b"GT".to_vec(), b"TTA".to_vec()]);
    }

    #[test]
    fn report_format() {
        let hits = vec![
            PatternHits { pattern: b"ATT".to_vec(), positions: vec![2, 7, 8, 9] },
            PatternHits { pattern: b"GGG".to_vec(), positions: vec![] },
        ];
        let mut out = Vec::new();
        write_hits(&mut out, &hits).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ATT: 2 7 8 9\nGGG:\n");
    }
}

use memmap2::Mmap;
use rayon::prelude::*;
use std::fs::File;
use std::io::Read;
use tracing::trace;

/// Errors raised while turning input text into a sample.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid number `{token}`: expected an integer or a real")]
    InvalidNumber { token: String },
    #[error("non-finite value `{token}` is not allowed")]
    NonFinite { token: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Values may be separated by any mix of whitespace and commas.
fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b','
}

/// Parses a file using mmap, splitting the work across rayon threads.
pub fn read_file_mmap(file: &File) -> Result<Vec<f64>, ParseError> {
    if file.metadata()?.len() == 0 {
        return Ok(Vec::new());
    }

    // SAFETY: the map is read-only and dropped before returning.
    let mmap = unsafe { Mmap::map(file)? };

    let num_threads = rayon::current_num_threads();
    let chunk_size = mmap.len().div_ceil(num_threads);

    // Chunk boundaries must align to separators to avoid splitting numbers mid-parse
    let mut boundaries = vec![0];
    for i in 1..num_threads {
        let mut pos = (i * chunk_size).max(*boundaries.last().unwrap_or(&0));
        if pos >= mmap.len() {
            break;
        }
        while pos < mmap.len() && !is_separator(mmap[pos]) {
            pos += 1;
        }
        if pos < mmap.len() {
            boundaries.push(pos + 1);
        }
    }
    boundaries.push(mmap.len());

    let chunks: Vec<_> = boundaries.windows(2).map(|w| (w[0], w[1])).collect();

    let results: Vec<Vec<f64>> = chunks
        .par_iter()
        .map(|&(start, end)| {
            trace!(start, end, "parsing chunk");
            parse_chunk(&mmap[start..end])
        })
        .collect::<Result<_, _>>()?;

    Ok(results.into_iter().flatten().collect())
}

/// Reads everything from `reader` (typically stdin) and parses it.
pub fn read_all<R: Read>(mut reader: R) -> Result<Vec<f64>, ParseError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    parse_chunk(&buf)
}

/// Parses a sample typed inline, e.g. `"12 13, 14 15"`.
pub fn parse_values(text: &str) -> Result<Vec<f64>, ParseError> {
    parse_chunk(text.as_bytes())
}

/// Parses separator-delimited numbers from a byte slice.
fn parse_chunk(chunk: &[u8]) -> Result<Vec<f64>, ParseError> {
    chunk
        .split(|&b| is_separator(b))
        .filter(|token| !token.is_empty())
        .map(parse_token)
        .collect()
}

/// Parses a single token as a finite decimal number.
fn parse_token(token: &[u8]) -> Result<f64, ParseError> {
    let text = String::from_utf8_lossy(token);
    let value = text
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber {
            token: text.to_string(),
        })?;

    if !value.is_finite() {
        return Err(ParseError::NonFinite {
            token: text.to_string(),
        });
    }
    Ok(value)
}

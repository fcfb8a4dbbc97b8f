use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use halz::core::DATA_SIZE;

/// Parses a command-line offset the way the original tool's `strtol(s, NULL,
/// 0)` call does: a `0x`/`0X` prefix selects hex, a bare leading `0` selects
/// octal, anything else is decimal.
pub(crate) fn parse_offset(text: &str) -> Result<u64, String> {
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, text),
    };

    let value = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else if digits.len() > 1 && digits.starts_with('0') {
        u64::from_str_radix(&digits[1..], 8)
    } else {
        digits.parse::<u64>()
    }
    .map_err(|e| format!("invalid offset {text:?}: {e}"))?;

    if sign < 0 {
        return Err(format!("invalid offset {text:?}: offsets cannot be negative"));
    }
    Ok(value)
}

/// Reads up to [`DATA_SIZE`] bytes from `path` starting at `offset`.
pub(crate) fn read_at_offset(path: &Path, offset: u64) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(offset))?;
    let mut buf = vec![0u8; DATA_SIZE];
    let mut total = 0;
    loop {
        match file.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    buf.truncate(total);
    Ok(buf)
}

/// Reads an entire file, rejecting anything over [`DATA_SIZE`] bytes.
pub(crate) fn read_whole_file(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    if buf.len() > DATA_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("file must be a maximum of {DATA_SIZE} bytes, got {}", buf.len()),
        ));
    }
    Ok(buf)
}

/// Reads an entire file with no size cap, for `sniff`'s whole-ROM scan.
pub(crate) fn read_whole_file_unbounded(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Builds the fixed [`DATA_SIZE`]-byte decode window `sniff` feeds to
/// `decode` at a given offset: the bytes available from `offset` onward,
/// truncated at `DATA_SIZE` and zero-padded at EOF. Mirrors the original
/// tool's `packed[DATA_SIZE]` stack buffer, which never sees bytes beyond
/// `offset + DATA_SIZE` even when the file has more data there.
pub(crate) fn window_at_offset(data: &[u8], offset: usize) -> [u8; DATA_SIZE] {
    let mut window = [0u8; DATA_SIZE];
    let available = data.len() - offset;
    let copy_len = available.min(DATA_SIZE);
    window[..copy_len].copy_from_slice(&data[offset..offset + copy_len]);
    window
}

/// Writes `data` at `offset` into an existing file, leaving the rest of the
/// file untouched (mirrors the original tool opening the ROM as `r+b`).
pub(crate) fn write_at_offset(path: &Path, offset: u64, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).open(path)?;
    file.seek(SeekFrom::Start(offset))?;
    file.write_all(data)
}

/// Writes `data` to a fresh file, truncating any existing contents.
pub(crate) fn write_new_file(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)
}

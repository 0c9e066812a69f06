use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Writes `contents` to a new file at `path`. Fails with
/// [`io::ErrorKind::AlreadyExists`] rather than truncating an existing file.
pub fn write_new(path: &Path, contents: &[u8]) -> io::Result<()> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?
        .write_all(contents)
}

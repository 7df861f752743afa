//! Write-transfer alignment precondition

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Pad the file at `path` with a single zero byte if its length is odd.
///
/// The transfer protocol moves 16-bit words, so write images must have an
/// even byte count. A missing file is not an error: callers pass paths
/// for regions whose backing file may not exist yet. Calling this twice
/// is a no-op the second time.
pub fn ensure_even_length(path: &Path) -> io::Result<()> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("{} does not exist, skipping alignment", path.display());
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if metadata.len() % 2 != 0 {
        log::debug!("padding {} to an even length", path.display());
        let mut file = OpenOptions::new().append(true).open(path)?;
        file.write_all(&[0])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("corelink-align-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_odd_file_gains_one_zero_byte() {
        let path = scratch("odd", b"abc");

        ensure_even_length(&path).unwrap();
        let padded = fs::read(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(padded, b"abc\0");
    }

    #[test]
    fn test_even_file_is_untouched() {
        let path = scratch("even", b"abcd");

        ensure_even_length(&path).unwrap();
        let contents = fs::read(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(contents, b"abcd");
    }

    #[test]
    fn test_alignment_is_idempotent() {
        let path = scratch("twice", b"abc");

        ensure_even_length(&path).unwrap();
        ensure_even_length(&path).unwrap();
        let contents = fs::read(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(contents, b"abc\0");
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join(format!(
            "corelink-align-{}-missing",
            std::process::id()
        ));
        assert!(ensure_even_length(&path).is_ok());
        assert!(!path.exists());
    }

    #[test]
    fn test_empty_file_is_untouched() {
        let path = scratch("empty", b"");

        ensure_even_length(&path).unwrap();
        let contents = fs::read(&path).unwrap();
        fs::remove_file(&path).ok();

        assert!(contents.is_empty());
    }
}

//! Common utilities

use std::path::Path;

use xxhash_rust::xxh3::xxh3_64;

use crate::core::error::SiteError;

/// Compute the XXH3 hash of bytes as 16 hex digits
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:016x}", xxh3_64(data))
}

/// Read a page as UTF-8 text
pub fn read_text(path: &Path) -> Result<String, SiteError> {
    std::fs::read_to_string(path).map_err(|source| SiteError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a page back in place. Not transactional: a crash mid-write may leave
/// a partial file, which a re-run repairs.
pub fn write_text(path: &Path, content: &str) -> Result<(), SiteError> {
    std::fs::write(path, content).map_err(|source| SiteError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_bytes() {
        let hash = hash_bytes(b"hello world");
        assert_eq!(hash.len(), 16); // 64-bit hex
        assert_eq!(hash, hash_bytes(b"hello world"));
        assert_ne!(hash, hash_bytes(b"hello world!"));
    }

    #[test]
    fn test_read_write_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("page.html");
        write_text(&path, "<html lang=\"ko\"></html>").unwrap();
        assert_eq!(read_text(&path).unwrap(), "<html lang=\"ko\"></html>");
    }

    #[test]
    fn test_read_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let err = read_text(&temp.path().join("missing.html")).unwrap_err();
        assert_eq!(err.code(), "read_failed");
    }
}

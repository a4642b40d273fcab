//! SHA-256 verification of downloaded disk images.

use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{InstallError, Result};

/// Computes the SHA-256 of a file as lowercase hex.
pub fn compute_sha256(path: &Path) -> Result<String> {
    let mut file = std::fs::File::open(path).map_err(|e| {
        InstallError::io(format!("Failed to open {} for checksum", path.display()), e)
    })?;

    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let n = file.read(&mut buffer).map_err(|e| {
            InstallError::io(format!("Failed to read {} for checksum", path.display()), e)
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Fails with [`InstallError::Verification`] unless `path` hashes to `expected`.
pub fn verify_checksum(path: &Path, expected: &str) -> Result<()> {
    let actual = compute_sha256(path)?;
    if actual != expected.trim().to_ascii_lowercase() {
        return Err(InstallError::Verification {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_SHA256: &str = "a948904f2f0f479b8f8197694b30184b0d2ed1c1cd2a1ec0fb85d299a192a447";

    #[test]
    fn test_compute_sha256_known_value() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("hello.txt");
        std::fs::write(&file, b"hello world\n").unwrap();
        assert_eq!(compute_sha256(&file).unwrap(), HELLO_SHA256);
    }

    #[test]
    fn test_verify_accepts_uppercase_expected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("hello.txt");
        std::fs::write(&file, b"hello world\n").unwrap();
        verify_checksum(&file, &HELLO_SHA256.to_ascii_uppercase()).unwrap();
    }

    #[test]
    fn test_verify_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("hello.txt");
        std::fs::write(&file, b"goodbye\n").unwrap();
        let err = verify_checksum(&file, HELLO_SHA256).unwrap_err();
        match err {
            InstallError::Verification { expected, actual, .. } => {
                assert_eq!(expected, HELLO_SHA256);
                assert_ne!(actual, HELLO_SHA256);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = compute_sha256(&dir.path().join("absent.dmg")).unwrap_err();
        assert!(matches!(err, InstallError::Io { .. }));
    }
}

use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

const CHUNK_SIZE: usize = 8192;

/// Compute the sha256 fingerprint of a file's content as lowercase hex.
///
/// The file is streamed in fixed-size chunks so memory use is independent of
/// file size. Binary-safe; IO failures surface to the caller.
pub async fn fingerprint_file(path: impl AsRef<Path>) -> std::io::Result<String> {
    let path = path.as_ref().to_path_buf();
    tokio::task::spawn_blocking(move || {
        let mut file = std::fs::File::open(&path)?;
        let mut hasher = Sha256::new();
        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            let read = file.read(&mut buf)?;
            if read == 0 {
                break;
            }
            hasher.update(&buf[..read]);
        }
        Ok(format!("{:x}", hasher.finalize()))
    })
    .await
    .map_err(|err| std::io::Error::other(format!("join fingerprint task: {err}")))?
}

/// Fingerprint of an in-memory byte slice, same format as [`fingerprint_file`].
#[must_use]
pub fn fingerprint_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

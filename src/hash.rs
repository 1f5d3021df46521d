//! BLAKE3 hashing of library contents

use blake3::Hasher;

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Calculate the BLAKE3 hash of a byte slice
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(bytes);
    format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex())
}

/// Calculate the BLAKE3 hash of a file read through `fs`
pub fn hash_file(fs: &dyn crate::fs::FileSystem, path: &std::path::Path) -> std::io::Result<String> {
    fs.read(path).map(|bytes| hash_bytes(&bytes))
}

use sha2::{Digest, Sha256};

pub const ASSET_PREFIX: &str = "assets";

pub fn asset_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Content-addressed key for a packaged function zip, so new code gets a new
/// key and CloudFormation sees the change.
pub fn asset_object_key(zip_bytes: &[u8]) -> String {
    format!("{ASSET_PREFIX}/{}.zip", asset_hash(zip_bytes))
}

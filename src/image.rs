//! Logo validation: confirms a path holds a PNG within the size and
//! dimension limits of the contract.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
const IHDR_TAG_OFFSET: usize = 12;
const IHDR_DATA_OFFSET: usize = 16;

pub const DEFAULT_MIN_DIMENSION: u32 = 64;
pub const DEFAULT_MAX_DIMENSION: u32 = 512;
pub const DEFAULT_MAX_BYTES: u64 = 100_000;

/// Size and dimension limits applied to every logo in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoPolicy {
    /// Smallest accepted width/height in pixels.
    #[serde(default = "default_min_dimension")]
    pub min_dimension: u32,
    /// Largest accepted width/height in pixels.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    /// Largest accepted file size in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

impl Default for LogoPolicy {
    fn default() -> Self {
        LogoPolicy {
            min_dimension: DEFAULT_MIN_DIMENSION,
            max_dimension: DEFAULT_MAX_DIMENSION,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

fn default_min_dimension() -> u32 {
    DEFAULT_MIN_DIMENSION
}

fn default_max_dimension() -> u32 {
    DEFAULT_MAX_DIMENSION
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_BYTES
}

/// Image validation capability consumed by the chain-logo check. Never
/// fails at the transport level; a rejection carries a human-readable
/// reason naming the offending path.
#[async_trait]
pub trait LogoValidator: Send + Sync {
    async fn validate(&self, path: &Path) -> Result<(), String>;
}

/// Validator that reads the file and probes the PNG header directly:
/// signature, IHDR tag, and the big-endian width/height fields.
#[derive(Debug, Clone, Default)]
pub struct PngLogoValidator {
    policy: LogoPolicy,
}

impl PngLogoValidator {
    pub fn new(policy: LogoPolicy) -> Self {
        PngLogoValidator { policy }
    }

    fn inspect(&self, path: &Path, bytes: &[u8]) -> Result<(), String> {
        if bytes.len() as u64 > self.policy.max_bytes {
            return Err(format!(
                "Logo '{}' is {} bytes, exceeding the {} byte limit",
                path.display(),
                bytes.len(),
                self.policy.max_bytes
            ));
        }
        let (width, height) = match png_dimensions(bytes) {
            Some(dims) => dims,
            None => return Err(format!("Logo '{}' is not a valid PNG image", path.display())),
        };
        let in_range = |px: u32| px >= self.policy.min_dimension && px <= self.policy.max_dimension;
        if !in_range(width) || !in_range(height) {
            return Err(format!(
                "Logo '{}' dimensions {}x{} are outside the allowed range {}..{} px",
                path.display(),
                width,
                height,
                self.policy.min_dimension,
                self.policy.max_dimension
            ));
        }
        Ok(())
    }
}

/// Width and height from a PNG header, or None when the bytes are not a
/// well-formed PNG prefix. The IHDR chunk is mandated to come first, so the
/// dimension fields sit at fixed offsets.
fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < IHDR_DATA_OFFSET + 8 || !bytes.starts_with(PNG_SIGNATURE) {
        return None;
    }
    if &bytes[IHDR_TAG_OFFSET..IHDR_TAG_OFFSET + 4] != b"IHDR" {
        return None;
    }
    let be_u32 = |offset: usize| {
        u32::from_be_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    };
    Some((be_u32(IHDR_DATA_OFFSET), be_u32(IHDR_DATA_OFFSET + 4)))
}

#[async_trait]
impl LogoValidator for PngLogoValidator {
    async fn validate(&self, path: &Path) -> Result<(), String> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                return Err(format!("Logo '{}' could not be read: {err}", path.display()));
            }
        };
        self.inspect(path, &bytes)
    }
}

/// Minimal PNG header bytes for a `width` x `height` image. Enough for
/// [png_dimensions]; the chunk CRC and image data are not included.
pub fn png_header(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(IHDR_DATA_OFFSET + 17);
    bytes.extend_from_slice(PNG_SIGNATURE);
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    // bit depth, color type, compression, filter, interlace
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    // placeholder CRC; the probe does not verify it
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes
}

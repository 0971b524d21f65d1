//! Transparent decompression of the input file.
//!
//! Compressed inputs are detected by file extension first, then by magic
//! bytes. Parts are always written as plain CSV, so only the reading side is
//! provided here.
//!
//! ## Built-in Codecs
//!
//! When enabled via feature flags:
//! - **Gzip** (`.gz`) - via `flate2` (feature: `compression-gzip`)
//! - **Zstd** (`.zst`) - via `zstd` (feature: `compression-zstd`)
//! - **Bzip2** (`.bz2`) - via `bzip2` (feature: `compression-bzip2`)
//! - **Xz** (`.xz`) - via `xz2` (feature: `compression-xz`)
//!
//! With no codec feature enabled, [`auto_detect_reader`] is a plain buffered
//! pass-through.

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// A decompression algorithm recognised on the input side.
pub trait CompressionCodec {
    /// Human-readable codec name (e.g. "gzip").
    fn name(&self) -> &'static str;

    /// Lowercase file extensions with the leading dot (e.g. `&[".gz"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Signature at the start of a compressed stream, if the format has one.
    fn magic_bytes(&self) -> Option<&'static [u8]>;

    /// Whether `head`, the first buffered bytes of the input, starts a
    /// stream of this format.
    fn matches_magic(&self, head: &[u8]) -> bool {
        self.magic_bytes().is_some_and(|magic| head.starts_with(magic))
    }

    /// Wrap `reader` so that reading from it yields decompressed bytes.
    fn wrap_reader(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>>;
}

/// The codecs compiled into this build.
#[must_use]
pub fn builtin_codecs() -> Vec<Box<dyn CompressionCodec>> {
    vec![
        #[cfg(feature = "compression-gzip")]
        Box::new(GzipCodec),
        #[cfg(feature = "compression-zstd")]
        Box::new(ZstdCodec),
        #[cfg(feature = "compression-bzip2")]
        Box::new(Bzip2Codec),
        #[cfg(feature = "compression-xz")]
        Box::new(XzCodec),
    ]
}

/// Find the codec whose extension ends `path` (case-insensitive).
fn detect_from_extension(path: &Path) -> Option<Box<dyn CompressionCodec>> {
    let path_str = path.to_string_lossy().to_lowercase();
    builtin_codecs()
        .into_iter()
        .find(|codec| codec.extensions().iter().any(|ext| path_str.ends_with(ext)))
}

/// Peek at the buffered stream and match codec signatures. Does not consume.
fn detect_from_magic<R: BufRead>(reader: &mut R) -> Option<Box<dyn CompressionCodec>> {
    let buf = reader.fill_buf().ok()?;
    if buf.is_empty() {
        return None;
    }
    builtin_codecs().into_iter().find(|codec| codec.matches_magic(buf))
}

/// Wrap `reader` with a decompressor when the input looks compressed.
///
/// Detection strategy:
/// 1. file extension of `path_hint`
/// 2. magic bytes at the start of the stream
/// 3. otherwise the stream is returned buffered and unchanged
///
/// # Errors
/// Returns an error if the selected codec fails to initialise.
pub fn auto_detect_reader<R: Read + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> Result<Box<dyn Read>> {
    if let Some(codec) = detect_from_extension(path_hint.as_ref()) {
        log::debug!("decompressing input with {} (by extension)", codec.name());
        return codec
            .wrap_reader(Box::new(BufReader::new(reader)))
            .with_context(|| format!("wrap reader with {} codec", codec.name()));
    }

    let mut buf_reader = BufReader::new(reader);
    if let Some(codec) = detect_from_magic(&mut buf_reader) {
        log::debug!("decompressing input with {} (by magic bytes)", codec.name());
        return codec
            .wrap_reader(Box::new(buf_reader))
            .with_context(|| format!("wrap reader with {} codec", codec.name()));
    }

    Ok(Box::new(buf_reader))
}

/// Drop a recognised compression suffix from a file name.
///
/// `"data.csv.gz"` becomes `"data.csv"`; names without a known suffix are
/// returned unchanged.
#[must_use]
pub fn strip_codec_extension(name: &str) -> &str {
    for codec in builtin_codecs() {
        for ext in codec.extensions() {
            let Some(split) = name.len().checked_sub(ext.len()) else {
                continue;
            };
            if split > 0 && name.is_char_boundary(split) && name[split..].eq_ignore_ascii_case(ext)
            {
                return &name[..split];
            }
        }
    }
    name
}

// ============================================================================
// Built-in Codec Implementations
// ============================================================================

#[cfg(feature = "compression-gzip")]
struct GzipCodec;

#[cfg(feature = "compression-gzip")]
impl CompressionCodec for GzipCodec {
    fn name(&self) -> &'static str {
        "gzip"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".gz", ".gzip"]
    }

    fn magic_bytes(&self) -> Option<&'static [u8]> {
        Some(&[0x1f, 0x8b])
    }

    fn wrap_reader(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
        // Multi-member aware, so concatenated gzip files decode fully.
        Ok(Box::new(flate2::read::MultiGzDecoder::new(reader)))
    }
}

#[cfg(feature = "compression-zstd")]
struct ZstdCodec;

#[cfg(feature = "compression-zstd")]
impl CompressionCodec for ZstdCodec {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".zst", ".zstd"]
    }

    fn magic_bytes(&self) -> Option<&'static [u8]> {
        Some(&[0x28, 0xb5, 0x2f, 0xfd])
    }

    fn wrap_reader(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
        zstd::stream::read::Decoder::new(reader).map(|d| Box::new(d) as Box<dyn Read>)
    }
}

#[cfg(feature = "compression-bzip2")]
struct Bzip2Codec;

#[cfg(feature = "compression-bzip2")]
impl CompressionCodec for Bzip2Codec {
    fn name(&self) -> &'static str {
        "bzip2"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".bz2", ".bzip2"]
    }

    fn magic_bytes(&self) -> Option<&'static [u8]> {
        Some(b"BZh")
    }

    // "BZh" is printable and can open a plain CSV, so the block size digit
    // and the first block (or end-of-stream) marker must follow it.
    fn matches_magic(&self, head: &[u8]) -> bool {
        const BLOCK: [u8; 6] = [0x31, 0x41, 0x59, 0x26, 0x53, 0x59];
        const END: [u8; 6] = [0x17, 0x72, 0x45, 0x38, 0x50, 0x90];
        match head {
            [b'B', b'Z', b'h', level, marker @ ..] if (b'1'..=b'9').contains(level) => {
                marker.starts_with(&BLOCK) || marker.starts_with(&END)
            }
            _ => false,
        }
    }

    fn wrap_reader(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
        Ok(Box::new(bzip2::read::MultiBzDecoder::new(reader)))
    }
}

#[cfg(feature = "compression-xz")]
struct XzCodec;

#[cfg(feature = "compression-xz")]
impl CompressionCodec for XzCodec {
    fn name(&self) -> &'static str {
        "xz"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".xz"]
    }

    fn magic_bytes(&self) -> Option<&'static [u8]> {
        Some(&[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00])
    }

    fn wrap_reader(&self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
        Ok(Box::new(xz2::read::XzDecoder::new_multi_decoder(reader)))
    }
}

use crate::token::{Result, TokenError};

/// Leading magic of binary token files (`*LZ4*`).
pub const LZ4_MAGIC: [u8; 5] = [0x2A, 0x4C, 0x5A, 0x34, 0x2A];
const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;

/// Fixed-size prefix of a binary token file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
	/// Declared size of the decompressed token payload.
	pub uncompressed_size: u32,
	/// Bytes of LZ4 block data following the header.
	pub compressed_size: usize,
}

impl ContainerHeader {
	/// Header length in bytes: magic plus size field.
	pub const SIZE: usize = 9;

	/// Parse the header from the beginning of `raw`.
	pub fn parse(raw: &[u8]) -> Result<Self> {
		if raw.len() < LZ4_MAGIC.len() {
			return Err(truncated(raw.len()));
		}
		if raw[..LZ4_MAGIC.len()] != LZ4_MAGIC {
			return Err(TokenError::BadMagic { magic: first5(raw) });
		}

		let size = raw.get(LZ4_MAGIC.len()..Self::SIZE).ok_or_else(|| truncated(raw.len()))?;
		let mut buf = [0_u8; 4];
		buf.copy_from_slice(size);

		Ok(Self {
			uncompressed_size: u32::from_le_bytes(buf),
			compressed_size: raw.len() - Self::SIZE,
		})
	}
}

/// Validate the header and decompress the payload to exactly the declared size.
pub fn decode_container(raw: &[u8]) -> Result<Vec<u8>> {
	let header = ContainerHeader::parse(raw)?;
	let declared = header.uncompressed_size as usize;
	if declared > MAX_DECOMPRESSED_BYTES {
		return Err(TokenError::DecompressedTooLarge {
			declared,
			limit: MAX_DECOMPRESSED_BYTES,
		});
	}

	let payload = &raw[ContainerHeader::SIZE..];
	if declared == 0 && payload.is_empty() {
		return Ok(Vec::new());
	}

	let mut out = vec![0_u8; declared];
	let actual = lz4_flex::block::decompress_into(payload, &mut out).map_err(|source| TokenError::Decompress { declared, source })?;
	if actual != declared {
		return Err(TokenError::SizeMismatch { declared, actual });
	}

	tracing::debug!(compressed = payload.len(), uncompressed = declared, "decoded token container");
	Ok(out)
}

/// Compress `payload` and prefix it with the magic and size field.
pub fn encode_container(payload: &[u8]) -> Result<Vec<u8>> {
	let size = u32::try_from(payload.len()).map_err(|_| TokenError::PayloadTooLarge { len: payload.len() })?;
	let compressed = lz4_flex::block::compress(payload);

	let mut out = Vec::with_capacity(ContainerHeader::SIZE + compressed.len());
	out.extend_from_slice(&LZ4_MAGIC);
	out.extend_from_slice(&size.to_le_bytes());
	out.extend_from_slice(&compressed);

	tracing::debug!(compressed = compressed.len(), uncompressed = payload.len(), "encoded token container");
	Ok(out)
}

fn truncated(len: usize) -> TokenError {
	TokenError::TruncatedStream {
		at: len,
		need: ContainerHeader::SIZE - len,
		rem: 0,
	}
}

fn first5(bytes: &[u8]) -> [u8; 5] {
	let mut magic = [0_u8; 5];
	let take = bytes.len().min(5);
	magic[..take].copy_from_slice(&bytes[..take]);
	magic
}

#[cfg(test)]
mod tests;

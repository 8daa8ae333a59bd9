use super::{
	Fram,
	FramError,
};
use crate::i2c::Bus;

/// Bytes per transaction for ranges; the kernel refuses messages above 8192
/// bytes.
pub const CHUNK_SIZE: usize = 4096;

impl<B: Bus> Fram<B> {
	/// Read a range of any size as consecutive transactions of at most
	/// `CHUNK_SIZE` bytes
	pub fn read_range(&self, address: usize, length: usize) -> Result<Vec<u8>, FramError> {
		self.check_range(address, length)?;

		let mut buf = Vec::with_capacity(length);
		let mut offset = 0;
		while offset < length {
			let n = std::cmp::min(CHUNK_SIZE, length - offset);
			buf.extend_from_slice(&self.read(address + offset, n)?);
			offset += n;
		}
		Ok(buf)
	}

	pub fn write_range(&self, address: usize, data: &[u8]) -> Result<(), FramError> {
		self.check_range(address, data.len())?;

		for (i, chunk) in data.chunks(CHUNK_SIZE).enumerate() {
			self.write(address + i * CHUNK_SIZE, chunk)?;
		}
		Ok(())
	}
}

pub fn flash_image<B: Bus>(fram: &Fram<B>, address: usize, image: &[u8]) -> crate::AResult<()> {
	fram.write_range(address, image)?;
	let flash = fram.read_range(address, image.len())?;

	if let Some(pos) = image.iter().zip(flash.iter()).position(|(a, b)| a != b) {
		bail!(
			"Verify failed at 0x{:04x}: expected {:02x}, FRAM is {:02x}",
			address + pos, image[pos], flash[pos]
		);
	}

	info!("{}: Wrote and verified {} bytes @0x{:04x}", fram.bus(), image.len(), address);
	Ok(())
}

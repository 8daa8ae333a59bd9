//! Adafruit 32KB I2C FRAM breakout (MB85RC256V)
//!
//! Addressing: every transaction starts with a write of the two-byte
//! big-endian memory address; the chip keeps an internal pointer from there.
//! - write: one message, address prefix followed by the data
//! - read: write of the address prefix, then a read message (repeated start)
//!
//! The chip wraps around at the end of its memory; we don't allow that and
//! reject ranges beyond the device size instead.

mod error;
mod image;

use std::convert::TryFrom;

pub use self::error::{
	FramError,
	TransferFailure,
};

pub use self::image::{
	CHUNK_SIZE,
	flash_image,
};

use crate::i2c::{
	Bus,
	BusNumber,
	ChipAddress,
	Message,
	Transfer,
};

/// Bytes of memory on the 32KB FRAM
pub const FRAM_SIZE: usize = 32768;
/// Chip address with all address pins low
pub const DEFAULT_CHIP_ADDRESS: ChipAddress = ChipAddress(0x50);
/// I2C bus on the Raspberry Pi header
pub const DEFAULT_BUS: BusNumber = BusNumber(1);

pub fn address_prefix(address: usize) -> [u8; 2] {
	[(address >> 8) as u8, address as u8]
}

/// Validate a (possibly negative) address as given on the command line
pub fn checked_address(address: i64, length: usize, size: usize) -> Result<usize, FramError> {
	let range_error = || FramError::AddressRange { address, length, size };
	let address = usize::try_from(address).map_err(|_| range_error())?;
	match address.checked_add(length) {
		Some(end) if end <= size => Ok(address),
		_ => Err(range_error()),
	}
}

#[derive(Debug)]
pub struct Fram<B: Bus> {
	bus: B,
	chip: ChipAddress,
	size: usize,
}

impl<B: Bus> Fram<B> {
	pub fn new(bus: B) -> Self {
		Fram {
			bus,
			chip: DEFAULT_CHIP_ADDRESS,
			size: FRAM_SIZE,
		}
	}

	pub fn with_chip(mut self, chip: ChipAddress) -> Self {
		self.chip = chip;
		self
	}

	/// Override the device size (for smaller chips of the same family).
	///
	/// # Panics
	///
	/// Panics if `size` exceeds 65536 bytes, the range of the two-byte
	/// address prefix.
	pub fn with_size(mut self, size: usize) -> Self {
		assert!(size <= 0x1_0000);
		self.size = size;
		self
	}

	pub fn bus(&self) -> &B {
		&self.bus
	}

	pub fn chip(&self) -> ChipAddress {
		self.chip
	}

	pub fn size(&self) -> usize {
		self.size
	}

	fn check_range(&self, address: usize, length: usize) -> Result<(), FramError> {
		match address.checked_add(length) {
			Some(end) if end <= self.size => Ok(()),
			_ => Err(FramError::AddressRange {
				address: i64::try_from(address).unwrap_or(i64::max_value()),
				length,
				size: self.size,
			}),
		}
	}

	// one transaction: the device handle lives exactly as long as this call
	fn submit(&self, messages: &mut [Message]) -> Result<(), FramError> {
		let submitted = messages.len();
		let mut device = self.bus.open().map_err(|e| FramError::BusTransfer {
			submitted,
			failure: TransferFailure::Open(e),
		})?;

		let processed = device.transfer(messages).map_err(|e| FramError::BusTransfer {
			submitted,
			failure: TransferFailure::Device(e),
		})?;

		if processed != submitted {
			return Err(FramError::BusTransfer {
				submitted,
				failure: TransferFailure::Incomplete { processed },
			});
		}

		Ok(())
	}

	pub fn write(&self, address: usize, data: &[u8]) -> Result<(), FramError> {
		self.check_range(address, data.len())?;
		debug!("{}: FRAM {} write {} bytes @0x{:04x}", self.bus, self.chip, data.len(), address);

		let mut payload = Vec::with_capacity(2 + data.len());
		payload.extend_from_slice(&address_prefix(address));
		payload.extend_from_slice(data);

		self.submit(&mut [Message::write(self.chip, &payload)])
	}

	pub fn read(&self, address: usize, length: usize) -> Result<Vec<u8>, FramError> {
		self.check_range(address, length)?;
		debug!("{}: FRAM {} read {} bytes @0x{:04x}", self.bus, self.chip, length, address);

		let prefix = address_prefix(address);
		let mut buf = vec![0u8; length];
		self.submit(&mut [
			Message::write(self.chip, &prefix),
			Message::read(self.chip, &mut buf),
		])?;

		Ok(buf)
	}
}

/// Write `data` at `address` on the default bus and chip
pub fn write(address: usize, data: &[u8]) -> Result<(), FramError> {
	Fram::new(DEFAULT_BUS).write(address, data)
}

/// Read `length` bytes from `address` on the default bus and chip
pub fn read(address: usize, length: usize) -> Result<Vec<u8>, FramError> {
	Fram::new(DEFAULT_BUS).read(address, length)
}

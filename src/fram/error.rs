use std::fmt;
use std::io;

use failure::Fail;

#[derive(Debug)]
pub enum TransferFailure {
	/// the bus device couldn't be opened
	Open(io::Error),
	/// the combined transfer ioctl failed
	Device(io::Error),
	/// the driver processed a different number of messages than submitted
	Incomplete { processed: usize },
}

#[derive(Debug)]
pub enum FramError {
	/// `[address, address + length)` doesn't fit into the device; never
	/// reaches the bus
	AddressRange {
		address: i64,
		length: usize,
		size: usize,
	},
	BusTransfer {
		submitted: usize,
		failure: TransferFailure,
	},
}

impl fmt::Display for FramError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			FramError::AddressRange { address, length, size } => {
				write!(f, "I/O address out of range: {} + {} bytes exceeds device size {}", address, length, size)
			},
			FramError::BusTransfer { submitted, failure: TransferFailure::Open(e) } => {
				write!(f, "couldn't open I2C bus for {} messages: {}", submitted, e)
			},
			FramError::BusTransfer { submitted, failure: TransferFailure::Device(e) } => {
				write!(f, "I2C transfer of {} messages failed: {}", submitted, e)
			},
			FramError::BusTransfer { submitted, failure: TransferFailure::Incomplete { processed } } => {
				write!(f, "Not all I2C messages processed successfully: {} of {}", processed, submitted)
			},
		}
	}
}

impl Fail for FramError {
	fn cause(&self) -> Option<&dyn Fail> {
		match self {
			FramError::BusTransfer { failure: TransferFailure::Open(e), .. } => Some(e),
			FramError::BusTransfer { failure: TransferFailure::Device(e), .. } => Some(e),
			_ => None,
		}
	}
}

impl FramError {
	pub fn is_address_range(&self) -> bool {
		match self {
			FramError::AddressRange { .. } => true,
			_ => false,
		}
	}

	pub fn is_bus_transfer(&self) -> bool {
		match self {
			FramError::BusTransfer { .. } => true,
			_ => false,
		}
	}
}

use super::ChipAddress;

/// flag for read messages, from <linux/i2c.h>
pub const I2C_M_RD: u16 = 0x0001;

#[derive(Debug)]
pub enum Buffer<'a> {
	Write(&'a [u8]),
	Read(&'a mut [u8]),
}

/// One directional segment of a combined transaction.
///
/// The buffer is borrowed for the duration of the transfer; read messages
/// get filled in place.
#[derive(Debug)]
pub struct Message<'a> {
	pub chip: ChipAddress,
	pub buffer: Buffer<'a>,
}

impl<'a> Message<'a> {
	pub fn write(chip: ChipAddress, data: &'a [u8]) -> Self {
		Message {
			chip,
			buffer: Buffer::Write(data),
		}
	}

	pub fn read(chip: ChipAddress, target: &'a mut [u8]) -> Self {
		Message {
			chip,
			buffer: Buffer::Read(target),
		}
	}

	pub fn is_read(&self) -> bool {
		match self.buffer {
			Buffer::Write(_) => false,
			Buffer::Read(_) => true,
		}
	}

	pub fn len(&self) -> usize {
		match &self.buffer {
			Buffer::Write(data) => data.len(),
			Buffer::Read(target) => target.len(),
		}
	}

	pub fn flags(&self) -> u16 {
		if self.is_read() { I2C_M_RD } else { 0 }
	}
}

use std::fs;
use std::io;
use std::os::unix::io::AsRawFd;

use libc::{
	c_ulong,
	ioctl,
};

use crate::i2c::{
	Buffer,
	BusNumber,
	Message,
	Transfer,
};

/* constants and structures from <linux/i2c-dev.h> and <linux/i2c.h> */

const I2C_RDWR: c_ulong = 0x0707; // combined R/W transfer (one STOP only)

#[repr(C)]
#[allow(non_camel_case_types)]
#[derive(Debug)]
struct i2c_msg {
	addr: u16,
	flags: u16,
	len: u16,
	buf: *mut u8,
}

#[repr(C)]
#[allow(non_camel_case_types)]
struct i2c_rdwr_ioctl_data {
	msgs: *mut i2c_msg,
	nmsgs: u32,
}

// pointers are only valid while `messages` stays borrowed
fn raw_messages(messages: &mut [Message]) -> io::Result<Vec<i2c_msg>> {
	let mut raw = Vec::with_capacity(messages.len());
	for msg in messages.iter_mut() {
		let len = msg.len();
		if len > u16::max_value() as usize {
			return Err(io::Error::new(
				io::ErrorKind::InvalidInput,
				format!("I2C message too long: {} bytes", len),
			));
		}
		let addr = msg.chip.0;
		let flags = msg.flags();
		// the kernel only writes through read buffers
		let buf = match &mut msg.buffer {
			Buffer::Write(data) => data.as_ptr() as *mut u8,
			Buffer::Read(target) => target.as_mut_ptr(),
		};
		raw.push(i2c_msg {
			addr,
			flags,
			len: len as u16,
			buf,
		});
	}
	Ok(raw)
}

#[derive(Debug)]
pub struct I2cDevice {
	file: fs::File,
	bus: BusNumber,
}

impl Transfer for I2cDevice {
	fn transfer(&mut self, messages: &mut [Message]) -> io::Result<usize> {
		let mut raw = raw_messages(messages)?;
		let mut data = i2c_rdwr_ioctl_data {
			msgs: raw.as_mut_ptr(),
			nmsgs: raw.len() as u32,
		};

		trace!("{}: I2C_RDWR with {} messages: {:?}", self.bus, raw.len(), raw);
		let res = unsafe {
			ioctl(
				self.file.as_raw_fd(),
				I2C_RDWR as _,
				&mut data as *mut i2c_rdwr_ioctl_data,
			)
		};
		if res < 0 {
			return Err(io::Error::last_os_error());
		}

		Ok(res as usize)
	}
}

pub fn inner_open(bus: BusNumber) -> io::Result<I2cDevice> {
	let file = fs::OpenOptions::new()
		.read(true)
		.write(true)
		.open(bus.device_path())?;

	Ok(I2cDevice {
		file,
		bus,
	})
}

#[cfg(test)]
mod test {
	use super::raw_messages;
	use crate::i2c::{
		ChipAddress,
		Message,
	};

	#[test]
	fn raw_write_read_pair() {
		let prefix = [0x12u8, 0x34];
		let mut target = [0u8; 7];
		let mut msgs = [
			Message::write(ChipAddress(0x50), &prefix),
			Message::read(ChipAddress(0x50), &mut target),
		];

		let raw = raw_messages(&mut msgs).unwrap();
		assert_eq!(raw.len(), 2);

		assert_eq!(raw[0].addr, 0x50);
		assert_eq!(raw[0].flags, 0);
		assert_eq!(raw[0].len, 2);
		assert_eq!(raw[0].buf as *const u8, prefix.as_ptr());

		assert_eq!(raw[1].addr, 0x50);
		assert_eq!(raw[1].flags, 0x0001);
		assert_eq!(raw[1].len, 7);
	}

	#[test]
	fn raw_rejects_oversized_message() {
		let data = vec![0u8; 0x1_0000];
		let mut msgs = [Message::write(ChipAddress(0x50), &data)];
		assert!(raw_messages(&mut msgs).is_err());
	}
}

use std::fs;
use std::io;

mod device;

pub use self::device::I2cDevice;

use crate::i2c::{
	Bus,
	BusNumber,
};

pub fn open_device(bus: BusNumber) -> io::Result<I2cDevice> {
	device::inner_open(bus)
}

impl Bus for BusNumber {
	type Device = I2cDevice;

	fn open(&self) -> io::Result<I2cDevice> {
		open_device(*self)
	}
}

/// All I2C buses exposed through the `i2c-dev` driver, sorted.
pub fn list_buses() -> crate::AResult<Vec<BusNumber>> {
	with_context!("couldn't list I2C buses (is i2c-dev loaded?)", {
		let mut list = Vec::new();
		for entry in fs::read_dir("/sys/class/i2c-dev")? {
			let entry = entry?;
			let fname = entry.file_name().into_string().map_err(|e| {
				io::Error::new(io::ErrorKind::Other, format!("Invalid (Non-UTF8) I2C device name {:?}", e))
			})?;
			list.push(fname.parse::<BusNumber>()?);
		}
		list.sort();
		Ok(list)
	})
}

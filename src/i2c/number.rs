use std::fmt;
use std::fs;
use std::io::Read;
use std::str;

/// I2C adapter number, as in `/dev/i2c-N`
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct BusNumber(pub u32);

impl BusNumber {
	pub fn device_path(&self) -> String {
		format!("/dev/i2c-{}", self.0)
	}

	fn sysfs_file(&self, name: &str) -> String {
		format!("/sys/class/i2c-dev/i2c-{}/{}", self.0, name)
	}

	/// Adapter name as reported by the kernel driver
	pub fn name(&self) -> crate::AResult<String> {
		with_context!(("couldn't read adapter name for I2C bus {}", self), {
			let mut f = fs::File::open(self.sysfs_file("name"))?;
			let mut result = String::new();
			f.read_to_string(&mut result)?;
			Ok(result.trim().into())
		})
	}
}

impl fmt::Display for BusNumber {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "i2c-{}", self.0)
	}
}

impl str::FromStr for BusNumber {
	type Err = ::failure::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		// accepted: 1, i2c-1, /dev/i2c-1
		let num_s = if s.starts_with("/dev/i2c-") {
			&s[9..]
		} else if s.starts_with("i2c-") {
			&s[4..]
		} else {
			s
		};

		ensure!(!num_s.is_empty() && num_s.bytes().all(|b| b.is_ascii_digit()), "invalid I2C bus: {:?}", s);

		let num = with_context!(("invalid I2C bus: {}", s),
			Ok(num_s.parse::<u32>()?)
		)?;

		Ok(BusNumber(num))
	}
}

#[cfg(test)]
mod test {
	use super::BusNumber;

	fn check_bus(num: u32, repr: &str) {
		match repr.parse::<BusNumber>() {
			Err(e) => panic!("{} failed to parse as BusNumber: {}", repr, e),
			Ok(b) => assert_eq!(BusNumber(num), b, "failed validating parsed {}", repr),
		}
	}

	fn check_invalid_bus(repr: &str) {
		assert!(repr.parse::<BusNumber>().is_err(), "{:?} must not be a valid I2C bus", repr);
	}

	#[test]
	fn parse_bus_number() {
		check_bus(0, "0");
		check_bus(1, "1");
		check_bus(1, "i2c-1");
		check_bus(12, "/dev/i2c-12");
		check_invalid_bus("");
		check_invalid_bus("i2c-");
		check_invalid_bus("/dev/i2c-");
		check_invalid_bus("i2c1");
		check_invalid_bus("+1");
		check_invalid_bus("-1");
		check_invalid_bus("/dev/spidev0.0");
	}

	#[test]
	fn bus_paths() {
		let bus = BusNumber(1);
		assert_eq!(bus.to_string(), "i2c-1");
		assert_eq!(bus.device_path(), "/dev/i2c-1");
		assert_eq!(bus.to_string().parse::<BusNumber>().unwrap(), bus);
	}
}

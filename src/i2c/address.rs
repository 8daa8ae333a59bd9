use std::fmt;
use std::str;

/// 7-bit I2C peripheral address
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ChipAddress(pub u16);

impl ChipAddress {
	pub const MAX: u16 = 0x7f;
}

impl fmt::Display for ChipAddress {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "0x{:02x}", self.0)
	}
}

impl str::FromStr for ChipAddress {
	type Err = ::failure::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		// short: 50, long: 0x50
		let digits = if s.starts_with("0x") || s.starts_with("0X") {
			&s[2..]
		} else {
			s
		};

		ensure!(!digits.is_empty() && digits.len() <= 2, "invalid I2C chip address: {:?}", s);

		let addr = with_context!(("invalid I2C chip address: {}", s),
			Ok(u16::from_str_radix(digits, 16)?)
		)?;

		ensure!(addr <= ChipAddress::MAX, "invalid I2C chip address: {} (not 7-bit)", s);

		Ok(ChipAddress(addr))
	}
}

#[cfg(test)]
mod test {
	use super::ChipAddress;

	fn check_chip(addr: u16, repr: &str) {
		match repr.parse::<ChipAddress>() {
			Err(e) => panic!("{} failed to parse as ChipAddress: {}", repr, e),
			Ok(c) => assert_eq!(ChipAddress(addr), c, "failed validating parsed {}", repr),
		}
	}

	fn check_chip_canonical(addr: u16, repr: &str) {
		check_chip(addr, repr);
		assert_eq!(ChipAddress(addr).to_string(), repr, "failed stringifying chip 0x{:02x}", addr);
	}

	fn check_invalid_chip(repr: &str) {
		assert!(repr.parse::<ChipAddress>().is_err(), "{:?} must not be a valid chip address", repr);
	}

	#[test]
	fn parse_chip_address() {
		check_chip(0x50, "50");
		check_chip(0x0a, "a");
		check_chip(0x50, "0X50");
		check_chip_canonical(0x00, "0x00");
		check_chip_canonical(0x50, "0x50");
		check_chip_canonical(0x7f, "0x7f");
		check_invalid_chip("");
		check_invalid_chip("0x");
		check_invalid_chip("0x80");
		check_invalid_chip("ff");
		check_invalid_chip("0x123");
		check_invalid_chip("zz");
		check_invalid_chip("-1");
	}
}

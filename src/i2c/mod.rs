mod address;
mod bus;
mod linux;
mod message;
mod number;

#[cfg(test)]
pub(crate) mod mock;

pub use self::address::{
	ChipAddress,
};

pub use self::bus::{
	Bus,
	Transfer,
};

pub use self::message::{
	Buffer,
	Message,
	I2C_M_RD,
};

pub use self::number::{
	BusNumber,
};

// OS-specific. for now linux only.
pub use self::linux::{
	I2cDevice,
	list_buses,
	open_device,
};

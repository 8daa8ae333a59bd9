//! In-memory stand-in for an I2C FRAM behind a bus, for tests.
//!
//! Write messages set the chip's address pointer from their first two bytes
//! (big-endian) and store the remainder; read messages return memory from
//! the current pointer. Every message is recorded.

use std::cell::RefCell;
use std::fmt;
use std::io;
use std::rc::Rc;

use super::{
	Buffer,
	Bus,
	ChipAddress,
	Message,
	Transfer,
};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Recorded {
	pub chip: ChipAddress,
	pub read: bool,
	pub len: usize,
	/// payload for write messages, empty for reads
	pub data: Vec<u8>,
}

#[derive(Debug)]
pub struct MockState {
	pub memory: Vec<u8>,
	pointer: usize,
	pub opened: usize,
	pub closed: usize,
	/// one entry per transfer call
	pub transactions: Vec<Vec<Recorded>>,
	/// report this count instead of the number of messages
	pub processed: Option<usize>,
	/// fail the ioctl with this error kind
	pub fail_transfer: Option<io::ErrorKind>,
	pub fail_open: Option<io::ErrorKind>,
}

#[derive(Clone, Debug)]
pub struct MockBus(Rc<RefCell<MockState>>);

impl MockBus {
	pub fn new(size: usize) -> Self {
		MockBus(Rc::new(RefCell::new(MockState {
			memory: vec![0u8; size],
			pointer: 0,
			opened: 0,
			closed: 0,
			transactions: Vec::new(),
			processed: None,
			fail_transfer: None,
			fail_open: None,
		})))
	}

	pub fn state(&self) -> std::cell::RefMut<MockState> {
		self.0.borrow_mut()
	}
}

impl fmt::Display for MockBus {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "mock")
	}
}

impl Bus for MockBus {
	type Device = MockDevice;

	fn open(&self) -> io::Result<MockDevice> {
		let mut state = self.0.borrow_mut();
		if let Some(kind) = state.fail_open {
			return Err(io::Error::new(kind, "mock open failure"));
		}
		state.opened += 1;
		Ok(MockDevice(self.0.clone()))
	}
}

#[derive(Debug)]
pub struct MockDevice(Rc<RefCell<MockState>>);

impl Drop for MockDevice {
	fn drop(&mut self) {
		self.0.borrow_mut().closed += 1;
	}
}

impl Transfer for MockDevice {
	fn transfer(&mut self, messages: &mut [Message]) -> io::Result<usize> {
		let mut state = self.0.borrow_mut();
		let mut log = Vec::new();

		for msg in messages.iter_mut() {
			let chip = msg.chip;
			let len = msg.len();
			match &mut msg.buffer {
				Buffer::Write(data) => {
					log.push(Recorded { chip, read: false, len, data: data.to_vec() });
					if data.len() >= 2 {
						state.pointer = (data[0] as usize) << 8 | data[1] as usize;
						for &b in &data[2..] {
							let size = state.memory.len();
							let p = state.pointer % size;
							state.memory[p] = b;
							state.pointer = p + 1;
						}
					}
				},
				Buffer::Read(target) => {
					log.push(Recorded { chip, read: true, len, data: Vec::new() });
					for t in target.iter_mut() {
						let size = state.memory.len();
						let p = state.pointer % size;
						*t = state.memory[p];
						state.pointer = p + 1;
					}
				},
			}
		}

		state.transactions.push(log);

		if let Some(kind) = state.fail_transfer {
			return Err(io::Error::new(kind, "mock transfer failure"));
		}
		Ok(state.processed.unwrap_or(messages.len()))
	}
}

use std::fmt;
use std::io;

use super::Message;

pub trait Transfer {
	/// Run all messages as one combined transaction.
	///
	/// Returns the number of messages the driver reports as processed.
	fn transfer(&mut self, messages: &mut [Message]) -> io::Result<usize>;
}

impl<'a, T: ?Sized + Transfer> Transfer for &'a mut T {
	fn transfer(&mut self, messages: &mut [Message]) -> io::Result<usize> {
		T::transfer(*self, messages)
	}
}

/// Something a fresh device handle can be opened on.
///
/// Handles are meant to be short-lived: open, transfer, drop.
pub trait Bus: fmt::Display {
	type Device: Transfer;

	fn open(&self) -> io::Result<Self::Device>;
}

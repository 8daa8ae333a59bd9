//! Helpers shared by the binaries

use std::ffi::OsString;
use std::io::Write;
use std::os::unix::ffi::OsStrExt;

use crate::fram::{
	self,
	Fram,
};
use crate::i2c::Bus;

use failure::Fail;

pub fn init_logging() {
	env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

pub fn get_param<T>(matches: &clap::ArgMatches, name: &str) -> crate::AResult<T>
where
	T: std::str::FromStr,
	failure::Error: From<<T as std::str::FromStr>::Err>,
{
	let param = match matches.value_of(name) {
		Some(p) => p,
		None => bail!("missing parameter {}", name),
	};
	param.parse::<T>().map_err(|e| {
		let e = failure::Error::from(e);
		let msg = format!("invalid parameter {}: {}", name, e);
		e.context(msg).into()
	})
}

/// Like `get_param`, but with a default for absent parameters
pub fn get_param_or<T>(matches: &clap::ArgMatches, name: &str, default: T) -> crate::AResult<T>
where
	T: std::str::FromStr,
	failure::Error: From<<T as std::str::FromStr>::Err>,
{
	if matches.is_present(name) {
		get_param(matches, name)
	} else {
		Ok(default)
	}
}

/// Command line couldn't be parsed; the shell reports it with exit code 12
#[derive(Debug, Fail)]
#[fail(display = "{}", _0)]
pub struct UsageError(pub String);

/// What `fram-i2c <-r|-w> <address> <data-or-length>` asked for
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Mode {
	Read { address: usize, length: usize },
	Write { address: usize, data: Vec<u8> },
}

// strictly positional: the mode flag must come first, and values may start
// with '-' (negative addresses, data like "-x")
fn fram_app() -> clap::App<'static, 'static> {
	clap::App::new("fram-i2c")
		.about("Read or write the 32KB I2C FRAM on /dev/i2c-1")
		.setting(clap::AppSettings::AllowLeadingHyphen)
		.setting(clap::AppSettings::DisableHelpFlags)
		.setting(clap::AppSettings::DisableVersion)
		.arg(clap::Arg::with_name("MODE")
			.required(true)
			.allow_hyphen_values(true)
			.possible_values(&["-r", "-w"])
			.help("-r to read, -w to write"))
		.arg(clap::Arg::with_name("ADDRESS")
			.required(true)
			.allow_hyphen_values(true)
			.help("byte address in the FRAM (0-32767)"))
		.arg(clap::Arg::with_name("VALUE")
			.required(true)
			.allow_hyphen_values(true)
			.help("LENGTH for -r, DATA for -w"))
}

/// Parse the full argument list (program name included).
///
/// Argument count and mode flag problems are `UsageError`s; unparsable
/// numbers and out-of-range addresses are reported as regular errors.
pub fn parse_fram_args<I, T>(args: I) -> crate::AResult<Mode>
where
	I: IntoIterator<Item = T>,
	T: Into<OsString> + Clone,
{
	let matches = fram_app().get_matches_from_safe(args).map_err(|e| UsageError(e.message))?;

	let address: i64 = get_param(&matches, "ADDRESS")?;

	if matches.value_of("MODE") == Some("-w") {
		let data = match matches.value_of_os("VALUE") {
			Some(d) => d.as_bytes().to_vec(),
			None => bail!("missing parameter VALUE"),
		};
		let address = fram::checked_address(address, data.len(), fram::FRAM_SIZE)?;
		Ok(Mode::Write { address, data })
	} else {
		let length: usize = get_param(&matches, "VALUE")?;
		let address = fram::checked_address(address, length, fram::FRAM_SIZE)?;
		Ok(Mode::Read { address, length })
	}
}

/// Execute `mode`; reads print the raw bytes followed by a newline, writes
/// print nothing.
pub fn run_mode<B, W>(fram: &Fram<B>, mode: &Mode, out: &mut W) -> crate::AResult<()>
where
	B: Bus,
	W: Write,
{
	match mode {
		Mode::Write { address, data } => {
			fram.write(*address, data)?;
		},
		Mode::Read { address, length } => {
			let data = fram.read(*address, *length)?;
			out.write_all(&data)?;
			out.write_all(b"\n")?;
			out.flush()?;
		},
	}

	Ok(())
}

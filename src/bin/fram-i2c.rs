#[macro_use]
extern crate log;

extern crate fram_i2c;
use fram_i2c::*;

use std::io;
use std::process::exit;

use fram_i2c::cli::UsageError;
use fram_i2c::fram::Fram;

// exit code for usage errors
const EXIT_USAGE: i32 = 12;

fn main_app() -> AResult<()> {
	let mode = match cli::parse_fram_args(std::env::args_os()) {
		Err(e) => {
			if let Some(usage) = e.downcast_ref::<UsageError>() {
				println!("{}", usage);
				exit(EXIT_USAGE);
			}
			return Err(e);
		},
		Ok(m) => m,
	};

	let stdout = io::stdout();
	let mut out = stdout.lock();
	cli::run_mode(&Fram::new(fram::DEFAULT_BUS), &mode, &mut out)
}

fn main() {
	cli::init_logging();

	if let Err(e) = main_app() {
		error!("Error: {}", e);
		exit(1);
	}
}

#[macro_use]
extern crate clap;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

extern crate fram_i2c;
use fram_i2c::*;

use std::fs;
use std::io::{
	self,
	Write,
};

use fram_i2c::fram::Fram;
use fram_i2c::i2c::{
	BusNumber,
	ChipAddress,
};

fn hexdump(base: usize, data: &[u8]) {
	for i in 0..data.len() {
		if 0 == i % 16 {
			print!("{:08x} ", base + i);
		} else if 0 == i % 8 {
			print!(" ");
		}
		print!(" {:02x}", data[i]);
		if 15 == i % 16 {
			println!("");
		}
	}
	if 0 != data.len() % 16 {
		println!("");
	}
	println!("{:08x}", base + data.len());
}

fn list() -> AResult<()> {
	for bus in i2c::list_buses()? {
		match bus.name() {
			Ok(name) => println!("{}\t{}", bus, name),
			Err(e) => {
				warn!("{}: {}", bus, e);
				println!("{}", bus);
			},
		}
	}

	Ok(())
}

fn open_fram(sub_m: &clap::ArgMatches) -> AResult<Fram<BusNumber>> {
	let bus: BusNumber = cli::get_param_or(sub_m, "bus", fram::DEFAULT_BUS)?;
	let chip: ChipAddress = cli::get_param_or(sub_m, "chip", fram::DEFAULT_CHIP_ADDRESS)?;
	Ok(Fram::new(bus).with_chip(chip))
}

fn dump(sub_m: &clap::ArgMatches) -> AResult<()> {
	let fram = open_fram(sub_m)?;
	let address: usize = cli::get_param_or(sub_m, "ADDRESS", 0)?;
	let length: usize = cli::get_param_or(sub_m, "LENGTH", fram.size().saturating_sub(address))?;

	let data = fram.read_range(address, length)?;

	if sub_m.is_present("raw") {
		io::stdout().write_all(&data)?;
	} else {
		hexdump(address, &data);
	}

	Ok(())
}

fn flash(sub_m: &clap::ArgMatches) -> AResult<()> {
	let fram = open_fram(sub_m)?;
	let address: usize = cli::get_param(sub_m, "ADDRESS")?;
	let path: String = cli::get_param(sub_m, "FILE")?;

	let image = fs::read(&path).map_err(|e| format_err!("couldn't read image {}: {}", path, e))?;

	fram::flash_image(&fram, address, &image)
}

fn main_app() -> AResult<()> {
	let matches = clap_app!(@app (app_from_crate!())
		(@setting SubcommandRequiredElseHelp)
		(global_setting: clap::AppSettings::VersionlessSubcommands)
		(@subcommand list =>
			(about: "list I2C buses")
		)
		(@subcommand dump =>
			(about: "dump FRAM contents (whole device by default)")
			(@arg bus: -b --bus +takes_value "I2C bus to use (default: i2c-1)")
			(@arg chip: -c --chip +takes_value "I2C chip address (default: 0x50)")
			(@arg raw: --raw "write raw binary to stdout instead of a hex dump")
			(@arg ADDRESS: "start address")
			(@arg LENGTH: "number of bytes")
		)
		(@subcommand flash =>
			(about: "write file into FRAM and verify")
			(@arg bus: -b --bus +takes_value "I2C bus to use (default: i2c-1)")
			(@arg chip: -c --chip +takes_value "I2C chip address (default: 0x50)")
			(@arg ADDRESS: +required "start address")
			(@arg FILE: +required "image to write")
		)
	).get_matches();

	match matches.subcommand() {
		("list", _) => {
			list()
		}
		("dump", Some(sub_m)) => {
			dump(sub_m)
		}
		("flash", Some(sub_m)) => {
			flash(sub_m)
		}
		("", _) => bail!("no subcommand"),
		(cmd, _) => bail!("not implemented subcommand {:?}", cmd),
	}
}

fn main() {
	cli::init_logging();

	if let Err(e) = main_app() {
		error!("Error: {}", e);
		std::process::exit(1);
	}
}

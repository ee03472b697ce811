use clap::arg;
use config::{*, ext::*};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct Config {
    pub gpx_file: String,
    pub image_dir: String,
    pub output: String,
}

pub const CLAP_STYLING: clap::builder::styling::Styles =
    clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

impl Config {
    pub fn new() -> Self {
        // Parse command line
        let clap = clap::Command::new("sporkart")
            .bin_name("sporkart")
            .styles(CLAP_STYLING)
            .args([
                arg!(-g --gpx <FILE> "Gpx track file to plot").required(false),
                arg!(-i --images <DIR> "Directory of geotagged photos").required(false),
                arg!(-o --output <FILE> "Html file to write").required(false),
            ]);

        let matches = clap.get_matches();
        let mut gpx_file = "media/track.gpx";
        let mut image_dir = "media/imgs";
        let mut output = "index.html";

        if let Some(g) = matches.get_one::<String>("gpx") {
            gpx_file = g;
        }

        if let Some(i) = matches.get_one::<String>("images") {
            image_dir = i;
        }

        if let Some(o) = matches.get_one::<String>("output") {
            output = o;
        }

        // Create config with default settings
	let config = DefaultConfigurationBuilder::new()
            .add_in_memory(&[
	        ("gpx_file", gpx_file),
                ("image_dir", image_dir),
                ("output", output),
            ])
            .build()
            .unwrap();

	config.reify()
    }
}

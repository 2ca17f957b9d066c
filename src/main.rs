// SPDX-License-Identifier: MPL-2.0
use iced_cropper::app::{self, Flags};

const HELP: &str = "\
Pan, zoom and crop a single image.

USAGE:
  iced_cropper [OPTIONS] [IMAGE]

ARGS:
  IMAGE                  Local path or http(s) URL of the image to open

OPTIONS:
  --width <PX>           Fixed viewport width (requires --height)
  --height <PX>          Fixed viewport height (requires --width)
  --config-dir <PATH>    Directory holding settings.toml
  --export-dir <PATH>    Directory receiving exported crops
  -h, --help             Print this help
";

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let width = args.opt_value_from_str("--width")?;
    let height = args.opt_value_from_str("--height")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let export_dir = args.opt_value_from_str("--export-dir")?;
    let image = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    Ok(Flags {
        image,
        width,
        height,
        config_dir,
        export_dir,
    })
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    app::run(flags)
}

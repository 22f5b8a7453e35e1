// SPDX-License-Identifier: MPL-2.0
use iced_photo_browser::app::{self, Flags};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
iced_photo_browser

USAGE:
  iced_photo_browser [OPTIONS] [PATH]

OPTIONS:
  -h, --help              Print help information
  --config-dir DIR        Directory holding browser.toml
  --per-row N             Thumbnails per grid row
  --start-on-grid         Open on the thumbnail grid
  --index N               Page to open first

ARGS:
  <PATH>                  Directory of images, or one image inside it
";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = match parse_flags(args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("Error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    app::run(flags)
}

fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let items_per_row = args.opt_value_from_str("--per-row")?;
    let initial_index = args.opt_value_from_str("--index")?;
    let start_on_grid = args.contains("--start-on-grid");
    let path = args.opt_free_from_str()?;

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unused arguments");
    }

    Ok(Flags {
        path,
        config_dir,
        items_per_row,
        start_on_grid,
        initial_index,
    })
}

// SPDX-License-Identifier: MPL-2.0
use notice_stack::app::{self, Flags};
use notice_stack::logging;
use std::path::PathBuf;

const HELP: &str = "\
notice_stack

USAGE:
  notice_stack [OPTIONS]

OPTIONS:
  --lang <LOCALE>        UI language (e.g. en-US, fr, zh-CN)
  --config-dir <DIR>     Directory holding settings.toml
  --log-file <FILE>      Append logs to FILE instead of stderr
  -v, --verbose          Increase log verbosity (repeatable)
  -h, --help             Print help
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(());
    }

    let mut verbosity: u8 = 0;
    while args.contains(["-v", "--verbose"]) {
        verbosity = verbosity.saturating_add(1);
    }

    let lang: Option<String> = args.opt_value_from_str("--lang").unwrap_or_else(|err| {
        eprintln!("ignoring --lang: {}", err);
        None
    });
    let config_dir: Option<String> = args
        .opt_value_from_str("--config-dir")
        .unwrap_or_else(|err| {
            eprintln!("ignoring --config-dir: {}", err);
            None
        });
    let log_file: Option<PathBuf> = args.opt_value_from_str("--log-file").unwrap_or_else(|err| {
        eprintln!("ignoring --log-file: {}", err);
        None
    });

    let remaining = args.finish();
    if !remaining.is_empty() {
        eprintln!("ignoring unexpected arguments: {:?}", remaining);
    }

    if let Err(err) = logging::init_logging(verbosity, log_file.as_deref()) {
        eprintln!("logging disabled: {}", err);
    }

    app::run(Flags { lang, config_dir })
}

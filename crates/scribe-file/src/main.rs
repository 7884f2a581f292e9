//! Binary entrypoint for the file datasource plugin.

use std::io::{self, BufReader, Write};
use std::process::ExitCode;

use scribe_config::Settings;
use scribe_file::{run, telemetry};

fn main() -> ExitCode {
    let (settings, settings_error) = match Settings::from_env() {
        Ok(settings) => (settings, None),
        Err(error) => (Settings::default(), Some(error)),
    };

    if let Err(error) = telemetry::initialise(&settings) {
        writeln!(io::stderr().lock(), "{error}").ok();
    }
    if let Some(error) = settings_error {
        tracing::warn!(
            target: "scribe_file::settings",
            error = %error,
            "ignoring invalid settings; using defaults"
        );
    }

    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    match run(&mut reader, &mut writer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            writeln!(io::stderr().lock(), "{error}").ok();
            ExitCode::FAILURE
        }
    }
}

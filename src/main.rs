// SPDX-License-Identifier: MPL-2.0
use loading_button::app::{self, Flags};
use loading_button::config::{self, Config};
use loading_button::widget::IndicatorKind;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Loading button demo

USAGE:
  loading_button [OPTIONS] [LABEL]

OPTIONS:
  --indicator <KIND>   arc, frames or image (or 0, 1, 2)
  --auto-rotate        Spin the image indicator
  --config <PATH>      Read settings from PATH instead of the default location
  -h, --help           Print this help
";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let config = match parse_config(args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    app::run(Flags { config })
}

/// Loads the settings file, then layers command-line overrides on top.
fn parse_config(mut args: pico_args::Arguments) -> Result<Config, String> {
    let indicator: Option<IndicatorKind> = args
        .opt_value_from_str("--indicator")
        .map_err(|e| e.to_string())?;
    let auto_rotate = args.contains("--auto-rotate");
    let config_path: Option<PathBuf> = args
        .opt_value_from_str("--config")
        .map_err(|e| e.to_string())?;
    let label = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    let loaded = match &config_path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    let mut config = loaded.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "using default configuration");
        Config::default()
    });

    if let Some(kind) = indicator {
        config.indicator.indicator_type = Some(kind.selector());
    }
    if auto_rotate {
        config.indicator.auto_rotate = Some(true);
    }
    if label.is_some() {
        config.label = label;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::tempdir;

    fn arguments(values: &[&str]) -> pico_args::Arguments {
        pico_args::Arguments::from_vec(values.iter().map(OsString::from).collect())
    }

    #[test]
    fn command_line_overrides_config_file() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "label = \"Save\"\n[indicator]\npadding = 12.0\n")
            .expect("failed to write config");
        let path_arg = path.to_string_lossy().into_owned();

        let config = parse_config(arguments(&[
            "--indicator",
            "frames",
            "--auto-rotate",
            "--config",
            &path_arg,
            "Send",
        ]))
        .expect("arguments should parse");

        assert_eq!(config.label(), "Send");
        assert_eq!(config.indicator.indicator_type(), 1);
        assert!(config.indicator.auto_rotate());
        assert_eq!(config.indicator.padding(), 12.0);
    }

    #[test]
    fn unknown_indicator_name_is_rejected() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "").expect("failed to write config");
        let path_arg = path.to_string_lossy().into_owned();

        assert!(parse_config(arguments(&["--config", &path_arg, "--indicator", "spiral"])).is_err());
    }
}

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{App, Arg};

use crate::consts::{DEFAULT_DEVICE, DEFAULT_MOUNT_POINT, PAYLOAD_SIZE};
use crate::ops::RequestScheme;

/// Everything the two phases need, decided once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mount_point: PathBuf,
    pub device: PathBuf,
    pub filename: Option<String>,
    pub payload_size: usize,
    pub scheme: RequestScheme,
    pub skip_verify: bool,
    pub skip_query: bool,
    pub list_codes: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            mount_point: PathBuf::from(DEFAULT_MOUNT_POINT),
            device: PathBuf::from(DEFAULT_DEVICE),
            filename: None,
            payload_size: PAYLOAD_SIZE,
            scheme: RequestScheme::Legacy,
            skip_verify: false,
            skip_query: false,
            list_codes: false,
        }
    }
}

fn validate_payload_size(value: String) -> Result<(), String> {
    match value.parse::<usize>() {
        Ok(size) if size > 0 => Ok(()),
        _ => Err(format!("'{}' is not a positive byte count", value)),
    }
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("myfs-probe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Round-trip checks files on a myfs mount and queries file sectors from the driver")
        .arg(
            Arg::with_name("mount")
                .short("m")
                .long("mount")
                .takes_value(true)
                .value_name("DIR")
                .help("Directory whose entries are overwritten and read back [default: /mnt]"),
        )
        .arg(
            Arg::with_name("device")
                .short("d")
                .long("device")
                .takes_value(true)
                .value_name("PATH")
                .help("Device the driver is attached to [default: /dev/loop0]"),
        )
        .arg(
            Arg::with_name("file")
                .short("f")
                .long("file")
                .takes_value(true)
                .value_name("NAME")
                .help("File to query sectors for; prompts when omitted"),
        )
        .arg(
            Arg::with_name("payload-size")
                .short("s")
                .long("payload-size")
                .takes_value(true)
                .value_name("BYTES")
                .validator(validate_payload_size)
                .help("Bytes written to each entry [default: 1024]"),
        )
        .arg(
            Arg::with_name("codes")
                .long("codes")
                .takes_value(true)
                .possible_values(&["legacy", "ioctl"])
                .help("Request numbering used by the driver [default: legacy]"),
        )
        .arg(Arg::with_name("skip-verify").long("skip-verify").help("Skip the read/write round trip"))
        .arg(Arg::with_name("skip-query").long("skip-query").help("Skip the sector query"))
        .arg(Arg::with_name("list-codes").long("list-codes").help("Print the request codes and exit"))
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Config, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().get_matches_from_safe(args)?;
        let mut config = Config::default();

        if let Some(mount) = matches.value_of_os("mount") {
            config.mount_point = PathBuf::from(mount);
        }
        if let Some(device) = matches.value_of_os("device") {
            config.device = PathBuf::from(device);
        }
        config.filename = matches.value_of("file").map(String::from);
        if let Some(size) = matches.value_of("payload-size").and_then(|s| s.parse::<usize>().ok()) {
            config.payload_size = size;
        }
        if let Some(scheme) = matches.value_of("codes").and_then(|s| s.parse::<RequestScheme>().ok()) {
            config.scheme = scheme;
        }
        config.skip_verify = matches.is_present("skip-verify");
        config.skip_query = matches.is_present("skip-query");
        config.list_codes = matches.is_present("list-codes");

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_args(vec!["myfs-probe"]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.mount_point, PathBuf::from("/mnt"));
        assert_eq!(config.device, PathBuf::from("/dev/loop0"));
        assert_eq!(config.payload_size, 1024);
        assert_eq!(config.scheme, RequestScheme::Legacy);
    }

    #[test]
    fn overrides() {
        let config = Config::from_args(vec![
            "myfs-probe", "-m", "/tmp/mnt", "--device", "/dev/loop3", "-f", "notes.txt",
            "--payload-size", "4096", "--codes", "ioctl", "--skip-verify",
        ])
        .unwrap();

        assert_eq!(config.mount_point, PathBuf::from("/tmp/mnt"));
        assert_eq!(config.device, PathBuf::from("/dev/loop3"));
        assert_eq!(config.filename.as_deref(), Some("notes.txt"));
        assert_eq!(config.payload_size, 4096);
        assert_eq!(config.scheme, RequestScheme::Ioctl);
        assert!(config.skip_verify);
        assert!(!config.skip_query);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_args(vec!["myfs-probe", "--payload-size", "0"]).is_err());
        assert!(Config::from_args(vec!["myfs-probe", "--payload-size", "lots"]).is_err());
        assert!(Config::from_args(vec!["myfs-probe", "--codes", "bsd"]).is_err());
        assert!(Config::from_args(vec!["myfs-probe", "--verbose"]).is_err());
    }
}

use clap::{Parser, ValueEnum};
use knot_generator::random::DEFAULT_CODE_LENGTH;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "KNOT_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "KNOT_BASE_URL";
pub const DATA_FILE_ENV: &str = "KNOT_DATA_FILE";
pub const CODE_LENGTH_ENV: &str = "KNOT_CODE_LENGTH";
pub const STORAGE_BACKEND_ENV: &str = "KNOT_STORAGE_BACKEND";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_DATA_FILE: &str = "urls.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "json-file")]
    JsonFile,
    #[value(name = "in-memory")]
    InMemory,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::JsonFile => write!(f, "json-file"),
            StorageBackendArg::InMemory => write!(f, "in-memory"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "knot-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public address prefixed onto short codes in responses.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Where the json-file backend persists its state.
    #[arg(long, env = DATA_FILE_ENV, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    #[arg(long, env = CODE_LENGTH_ENV, default_value_t = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::JsonFile
    )]
    pub storage: StorageBackendArg,
}

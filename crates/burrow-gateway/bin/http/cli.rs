use burrow_storage::StorageConfig;
use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "SERVER_ADDRESS";
pub const BASE_URL_ENV: &str = "BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "STORAGE_BACKEND";
pub const FILE_STORAGE_PATH_ENV: &str = "FILE_STORAGE_PATH";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "memory")]
    Memory,
    #[value(name = "file")]
    File,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::Memory => write!(f, "memory"),
            StorageBackendArg::File => write!(f, "file"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "burrow-gateway")]
pub struct CLI {
    /// Address the HTTP server listens on.
    #[arg(short = 'a', long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Prefix of the short URLs handed back to clients.
    #[arg(short = 'b', long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Memory
    )]
    pub storage: StorageBackendArg,

    /// Snapshot file used by the `file` backend.
    #[arg(
        short = 'f',
        long,
        env = FILE_STORAGE_PATH_ENV,
        required_if_eq("storage", "file")
    )]
    pub file_storage_path: Option<PathBuf>,
}

impl CLI {
    pub fn storage_config(&self) -> anyhow::Result<StorageConfig> {
        match self.storage {
            StorageBackendArg::Memory => Ok(StorageConfig::Memory),
            StorageBackendArg::File => {
                let path = self.file_storage_path.clone().ok_or_else(|| {
                    anyhow::anyhow!("file storage path is required when storage backend is file")
                })?;
                Ok(StorageConfig::File { path })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_needs_no_path() {
        let cli = CLI::try_parse_from(["gateway", "--storage", "memory"]).unwrap();
        assert_eq!(cli.storage_config().unwrap(), StorageConfig::Memory);
    }

    #[test]
    fn file_storage_requires_path() {
        assert!(CLI::try_parse_from(["gateway", "--storage", "file"]).is_err());

        let cli =
            CLI::try_parse_from(["gateway", "--storage", "file", "-f", "/tmp/links.json"]).unwrap();
        assert_eq!(
            cli.storage_config().unwrap(),
            StorageConfig::File {
                path: PathBuf::from("/tmp/links.json")
            }
        );
    }

    #[test]
    fn short_flags() {
        let cli = CLI::try_parse_from([
            "gateway",
            "-a",
            "0.0.0.0:9090",
            "-b",
            "https://sho.rt",
        ])
        .unwrap();
        assert_eq!(cli.listen_addr, "0.0.0.0:9090".parse::<SocketAddr>().unwrap());
        assert_eq!(cli.base_url, "https://sho.rt");
    }
}

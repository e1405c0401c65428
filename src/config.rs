use crate::store::DirStorage;
use anyhow::Context;
use std::path::PathBuf;

/// Name of the directory under the platform data dir holding day records
static APP_DIR: &str = "goalcal";

/// Locations resolved from the command line and the platform defaults
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) log_file: Option<PathBuf>,
}

impl Config {
    pub(crate) fn resolve(
        data_dir: Option<PathBuf>,
        log_file: Option<PathBuf>,
    ) -> anyhow::Result<Config> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => dirs::data_dir()
                .context("could not determine local data directory; pass --data-dir")?
                .join(APP_DIR),
        };
        Ok(Config { data_dir, log_file })
    }

    pub(crate) fn storage(&self) -> DirStorage {
        DirStorage::new(self.data_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_explicit_paths() {
        let config = Config::resolve(
            Some(PathBuf::from("/tmp/goals")),
            Some(PathBuf::from("/tmp/goalcal.log")),
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/goals"));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/goalcal.log")));
        assert_eq!(config.storage().dir(), Path::new("/tmp/goals"));
    }

    #[test]
    fn test_default_data_dir() {
        if let Some(base) = dirs::data_dir() {
            let config = Config::resolve(None, None).unwrap();
            assert_eq!(config.data_dir, base.join("goalcal"));
            assert_eq!(config.log_file, None);
        }
    }
}

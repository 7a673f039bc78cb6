//! External tool discovery
//!
//! Every tool the run may shell out to is resolved once, before anything is
//! downloaded, so each stage works with a fixed choice.

use crate::download::Downloader;
use crate::verify::{Attestor, Digester};
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toolbox {
    pub downloader: Option<Downloader>,
    pub digester: Option<Digester>,
    pub attestor: Option<Attestor>,
}

impl Toolbox {
    pub fn probe() -> Self {
        let paths = env::var_os("PATH").unwrap_or_default();
        Self::probe_in(&paths)
    }

    /// Resolve tools against an explicit `PATH`-style search list.
    pub fn probe_in(paths: &OsStr) -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let find = |name: &str| find_in(name, paths, &cwd);

        let downloader = find("curl")
            .map(Downloader::Curl)
            .or_else(|| find("wget").map(Downloader::Wget));
        let digester = find("sha256sum")
            .map(Digester::Sha256sum)
            .or_else(|| find("shasum").map(Digester::Shasum));
        let attestor = find("gh").map(Attestor);

        let toolbox = Toolbox {
            downloader,
            digester,
            attestor,
        };
        tracing::debug!("Probed tools: {:?}", toolbox);
        toolbox
    }
}

fn find_in(name: &str, paths: &OsStr, cwd: &Path) -> Option<PathBuf> {
    match which::which_in(name, Some(paths), cwd) {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::trace!("{} not found: {}", name, e);
            None
        }
    }
}

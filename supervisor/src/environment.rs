//! Environment construction for processes running under libfaketime
//!
//! The child's environment is always built as an explicit [`EnvironmentMap`];
//! the supervisor never touches its own process environment.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::types::FakeTime;

/// Variable carrying the fake time read by libfaketime
pub const FAKETIME_VAR: &str = "FAKETIME";
/// Variable naming the interception library the dynamic loader preloads
pub const PRELOAD_VAR: &str = "LD_PRELOAD";
/// Variable disabling libfaketime's caching of time reads
pub const NO_CACHE_VAR: &str = "FAKETIME_NO_CACHE";

/// Default libfaketime location on Debian/Ubuntu x86_64
pub const DEFAULT_FAKETIME_LIBRARY: &str = "/usr/lib/x86_64-linux-gnu/faketime/libfaketime.so.1";

/// Complete environment handed to a launched process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentMap(BTreeMap<OsString, OsString>);

impl EnvironmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment
    pub fn inherited() -> Self {
        std::env::vars_os().collect()
    }

    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.0.get(key.as_ref()).map(OsString::as_os_str)
    }

    pub fn set(&mut self, key: impl Into<OsString>, value: impl Into<OsString>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsString, &OsString)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvironmentMap
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Builds environments that activate libfaketime in a child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeTimeEnvironment {
    library: PathBuf,
}

impl Default for FakeTimeEnvironment {
    fn default() -> Self {
        Self {
            library: PathBuf::from(DEFAULT_FAKETIME_LIBRARY),
        }
    }
}

impl FakeTimeEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the interception library path (fluent API)
    pub fn with_library(mut self, library: impl Into<PathBuf>) -> Self {
        self.library = library.into();
        self
    }

    pub fn library(&self) -> &Path {
        &self.library
    }

    /// Inherited environment with the interception overrides and `FAKETIME` set
    pub fn build(&self, fake_time: &FakeTime) -> EnvironmentMap {
        self.build_from(EnvironmentMap::inherited(), fake_time)
    }

    /// Same as [`build`](Self::build) on top of an explicit base environment
    pub fn build_from(&self, base: EnvironmentMap, fake_time: &FakeTime) -> EnvironmentMap {
        let mut env = self.with_interception(base);
        env.set(FAKETIME_VAR, fake_time.as_str());
        env
    }

    /// Environment for a launch without a requested time.
    ///
    /// The library is still preloaded, but `FAKETIME` is whatever the
    /// supervisor itself inherited; when absent libfaketime reports real time.
    pub fn ambient(&self) -> EnvironmentMap {
        self.with_interception(EnvironmentMap::inherited())
    }

    fn with_interception(&self, mut env: EnvironmentMap) -> EnvironmentMap {
        env.set(PRELOAD_VAR, self.library.as_os_str());
        env.set(NO_CACHE_VAR, "1");
        env
    }
}

use crate::region::{host, ProcMaps, RegionQuery, Unsupported};
use std::path::{Path, PathBuf};

/// Which region backend to build.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Backend {
    /// The backend for the platform this crate was built for.
    #[default]
    Host,
    /// Answer every query with `None`.
    Unsupported,
    /// Read a maps file in the `/proc/<pid>/maps` format. The file is set
    /// with `Options::set_maps_path`.
    ProcMaps,
}

/// Options controlling which region backend is used. Options are resolved
/// into a backend with `Options::region_query`.
#[derive(Clone, Debug, Default)]
pub struct Options {
    backend: Backend,
    maps_path: Option<PathBuf>,
}

impl Options {
    /// Create a new set of Options with the default settings.
    pub fn new() -> Options {
        Options::default()
    }

    /// The backend `region_query` builds. By default this is `Backend::Host`.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Set the backend `region_query` builds.
    pub fn set_backend(&mut self, backend: Backend) {
        self.backend = backend;
    }

    /// The maps file read by `Backend::ProcMaps`. When unset, the maps of
    /// the current process are read.
    pub fn maps_path(&self) -> Option<&Path> {
        self.maps_path.as_deref()
    }

    /// Set the maps file read by `Backend::ProcMaps`.
    pub fn set_maps_path<P: Into<PathBuf>>(&mut self, maps_path: P) {
        self.maps_path = Some(maps_path.into());
    }

    /// Build the region backend these options describe.
    pub fn region_query(&self) -> Box<dyn RegionQuery + Send + Sync> {
        match self.backend {
            Backend::Host => Box::new(HostQuery),
            Backend::Unsupported => Box::new(Unsupported),
            Backend::ProcMaps => match self.maps_path {
                Some(ref path) => Box::new(ProcMaps::with_path(path)),
                None => Box::new(ProcMaps::new()),
            },
        }
    }
}

/// Forwards to `host()`, so the host backend can be boxed like the others.
struct HostQuery;

impl RegionQuery for HostQuery {
    fn query_region(&self, address: usize) -> Option<crate::region::RegionDescriptor> {
        host().query_region(address)
    }
}

/// Create your options with the builder pattern.
///
/// For more details on the options, see `region::Options`
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    /// Create a new builder for region options.
    pub fn new() -> OptionsBuilder {
        OptionsBuilder {
            options: Options::default(),
        }
    }

    /// Set the backend. By default this is `Backend::Host`.
    pub fn backend(mut self, backend: Backend) -> OptionsBuilder {
        self.options.backend = backend;
        self
    }

    /// Set the maps file read by `Backend::ProcMaps`. By default the maps of
    /// the current process are read.
    pub fn maps_path<P: Into<PathBuf>>(mut self, maps_path: P) -> OptionsBuilder {
        self.options.maps_path = Some(maps_path.into());
        self
    }

    /// Finish building, returning the `Options`.
    pub fn build(self) -> Options {
        self.options
    }
}

impl Default for OptionsBuilder {
    fn default() -> OptionsBuilder {
        OptionsBuilder::new()
    }
}

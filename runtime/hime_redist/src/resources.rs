//! Loading the binary resources a generated parser ships with.
//!
//! Generated parsers name their resources relative to the module that
//! declares them. Where the bytes come from is up to a [`ResourceLoader`]:
//! files next to the module ([`DirectoryLoader`]) or blobs compiled into
//! the binary ([`EmbeddedResources`]).

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use hime_lexer_core::{Automaton, AutomatonError};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Failure to find or read a resource.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("resource `{name}` not found for module `{module}`")]
    NotFound { module: String, name: String },
    #[error("cannot read resource {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to load an automaton.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error("malformed automaton `{name}`: {source}")]
    Automaton {
        name: String,
        #[source]
        source: AutomatonError,
    },
}

/// Source of the raw bytes of named resources.
pub trait ResourceLoader {
    /// The bytes of resource `name`, declared by `module`.
    fn load(&self, module: &str, name: &str) -> Result<Cow<'_, [u8]>, ResourceError>;
}

/// Loads resources from files in the directory of the declaring module.
///
/// `module` is a path to the module's file; `name` is resolved against its
/// parent directory, optionally under a fixed root.
#[derive(Debug, Clone, Default)]
pub struct DirectoryLoader {
    root: Option<PathBuf>,
}

impl DirectoryLoader {
    /// Resolve module paths as given.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve module paths under `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        DirectoryLoader {
            root: Some(root.into()),
        }
    }

    /// Where resource `name` of `module` lives.
    pub fn path_of(&self, module: &str, name: &str) -> PathBuf {
        let directory = Path::new(module).parent().unwrap_or(Path::new(""));
        match &self.root {
            Some(root) => root.join(directory).join(name),
            None => directory.join(name),
        }
    }
}

impl ResourceLoader for DirectoryLoader {
    fn load(&self, module: &str, name: &str) -> Result<Cow<'_, [u8]>, ResourceError> {
        let path = self.path_of(module, name);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Cow::Owned(bytes)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                Err(ResourceError::NotFound {
                    module: module.to_string(),
                    name: name.to_string(),
                })
            }
            Err(source) => Err(ResourceError::Io { path, source }),
        }
    }
}

/// Resources compiled into the binary, typically with `include_bytes!`.
///
/// Resource names are global: the module is only used in error messages.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResources {
    blobs: FxHashMap<&'static str, &'static [u8]>,
}

impl EmbeddedResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `name`, replacing any previous blob.
    pub fn insert(&mut self, name: &'static str, bytes: &'static [u8]) -> &mut Self {
        self.blobs.insert(name, bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl ResourceLoader for EmbeddedResources {
    fn load(&self, module: &str, name: &str) -> Result<Cow<'_, [u8]>, ResourceError> {
        self.blobs
            .get(name)
            .map(|&bytes| Cow::Borrowed(bytes))
            .ok_or_else(|| ResourceError::NotFound {
                module: module.to_string(),
                name: name.to_string(),
            })
    }
}

/// Load and decode the automaton stored in resource `name`.
#[tracing::instrument(level = "debug", skip(loader))]
pub fn load_automaton(
    loader: &dyn ResourceLoader,
    module: &str,
    name: &str,
) -> Result<Automaton, LoadError> {
    let bytes = loader.load(module, name)?;
    let automaton = Automaton::from_bytes(&bytes).map_err(|source| LoadError::Automaton {
        name: name.to_string(),
        source,
    })?;
    debug!(bytes = bytes.len(), states = automaton.states_count(), "loaded automaton");
    Ok(automaton)
}

#[cfg(test)]
mod tests;

//! Loading and storing JSON text.
//!
//! Failures here are reported as base-kind [`Error`]s; there is no context
//! string to mark yet.

use std::{
    fmt,
    fs::{File, OpenOptions},
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::err::{Error, Res};

pub const JSON_EXTENSION: &str = ".json";

/// 1 MiB.
pub const DEFAULT_MAX_SIZE: u64 = 1 << 20;

/// Upper bounds on what this module will read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest JSON text, in bytes.
    pub max_size: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl Limits {
    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }

    fn check(&self, site: &'static str, size: u64) -> Result<(), ResourceErr> {
        if size > self.max_size {
            return Err(ResourceErr::TooLarge {
                site,
                size,
                max_size: self.max_size,
            });
        }
        Ok(())
    }
}

#[derive(Debug)]
enum ResourceErr {
    WrongExtension {
        site: &'static str,
        path: PathBuf,
    },
    CannotOpen {
        site: &'static str,
        path: PathBuf,
        err: io::Error,
    },
    CannotRead {
        site: &'static str,
        path: PathBuf,
        err: io::Error,
    },
    CannotWrite {
        site: &'static str,
        path: PathBuf,
        err: io::Error,
    },
    TooLarge {
        site: &'static str,
        size: u64,
        max_size: u64,
    },
}

impl ResourceErr {
    fn site(&self) -> &'static str {
        match self {
            ResourceErr::WrongExtension { site, .. }
            | ResourceErr::CannotOpen { site, .. }
            | ResourceErr::CannotRead { site, .. }
            | ResourceErr::CannotWrite { site, .. }
            | ResourceErr::TooLarge { site, .. } => *site,
        }
    }

    fn into_error(self) -> Error {
        Error::new(self.site(), self.to_string())
    }
}

impl fmt::Display for ResourceErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceErr::WrongExtension { path, .. } => write!(
                f,
                "Couldn't open json file: {}. The extension is not '{JSON_EXTENSION}'",
                path.display()
            ),
            ResourceErr::CannotOpen { path, err, .. } => write!(
                f,
                "Couldn't open json file: {}. Does it exist? ({err})",
                path.display()
            ),
            ResourceErr::CannotRead { path, err, .. } => {
                write!(f, "Couldn't read json file: {}. ({err})", path.display())
            }
            ResourceErr::CannotWrite { path, err, .. } => {
                write!(f, "Couldn't write json file: {}. ({err})", path.display())
            }
            ResourceErr::TooLarge { size, max_size, .. } => write!(
                f,
                "The JSON object is too large ({size} bytes). \
                 The current maximum string size is {max_size}"
            ),
        }
    }
}

/// Whether the text of `path` ends in `.json`.
pub fn is_json_extension(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .to_string_lossy()
        .ends_with(JSON_EXTENSION)
}

/// Opens a `.json` file with the given options.
pub fn open_json_file(path: impl AsRef<Path>, options: &OpenOptions) -> Res<File> {
    open_json("ctxerr::resource::open_json_file", path.as_ref(), options)
        .map_err(ResourceErr::into_error)
}

fn open_json(site: &'static str, path: &Path, options: &OpenOptions) -> Result<File, ResourceErr> {
    if !is_json_extension(path) {
        return Err(ResourceErr::WrongExtension {
            site,
            path: path.to_owned(),
        });
    }

    debug!(path = %path.display(), "opening json file");
    options.open(path).map_err(|err| ResourceErr::CannotOpen {
        site,
        path: path.to_owned(),
        err,
    })
}

/// Reads a whole `.json` file, refusing anything over `limits.max_size`.
pub fn read_json_file(path: impl AsRef<Path>, limits: Limits) -> Res<String> {
    read_json("ctxerr::resource::read_json_file", path.as_ref(), limits)
        .map_err(ResourceErr::into_error)
}

fn read_json(site: &'static str, path: &Path, limits: Limits) -> Result<String, ResourceErr> {
    let file = open_json(site, path, OpenOptions::new().read(true))?;

    let cannot_read = |err| ResourceErr::CannotRead {
        site,
        path: path.to_owned(),
        err,
    };

    let size = file.metadata().map_err(cannot_read)?.len();
    limits.check(site, size)?;

    // Don't trust the metadata alone, the file may grow while we read it.
    let mut text = String::new();
    file.take(limits.max_size.saturating_add(1))
        .read_to_string(&mut text)
        .map_err(cannot_read)?;
    limits.check(site, text.len() as u64)?;

    debug!(path = %path.display(), bytes = text.len(), "read json file");
    Ok(text)
}

/// Resolves a JSON source argument to JSON text.
///
/// A source ending in `.json` names a file to read; anything else is taken to
/// be JSON text already. Either way the text must fit in `limits`.
pub fn load_json_source(source: &str, limits: Limits) -> Res<String> {
    const SITE: &str = "ctxerr::resource::load_json_source";

    if is_json_extension(source) {
        return read_json(SITE, Path::new(source), limits).map_err(ResourceErr::into_error);
    }

    debug!(bytes = source.len(), "using inline json text");
    limits
        .check(SITE, source.len() as u64)
        .map_err(ResourceErr::into_error)?;
    Ok(source.to_owned())
}

/// Writes `contents` to a `.json` file, replacing what was there.
///
/// An empty path is not worth failing over: it is logged and skipped.
pub fn write_json_file(path: impl AsRef<Path>, contents: &str, limits: Limits) -> Res<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        warn!("attempted to write json to an empty path, skipping");
        return Ok(());
    }

    write_json(path, contents, limits).map_err(ResourceErr::into_error)
}

fn write_json(path: &Path, contents: &str, limits: Limits) -> Result<(), ResourceErr> {
    const SITE: &str = "ctxerr::resource::write_json_file";

    limits.check(SITE, contents.len() as u64)?;

    let mut file = open_json(
        SITE,
        path,
        OpenOptions::new().write(true).create(true).truncate(true),
    )?;
    file.write_all(contents.as_bytes())
        .map_err(|err| ResourceErr::CannotWrite {
            site: SITE,
            path: path.to_owned(),
            err,
        })?;

    debug!(path = %path.display(), bytes = contents.len(), "wrote json file");
    Ok(())
}

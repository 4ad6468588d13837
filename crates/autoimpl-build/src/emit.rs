//! Output sinks: where rendered artifacts go.

use crate::artifact::Artifact;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// EmitError
///

#[derive(Debug, ThisError)]
pub enum EmitError {
    #[error("'{0}' was already written during this pass")]
    Conflict(String),

    #[error("cannot write '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

///
/// CompilationUnit
/// one rendered artifact and where it belongs
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompilationUnit {
    pub package: String,
    pub name: String,
    pub file_name: String,
    pub source: String,
}

impl CompilationUnit {
    #[must_use]
    pub fn from_artifact(artifact: &Artifact) -> Self {
        Self {
            package: artifact.package.clone(),
            name: artifact.name.clone(),
            file_name: artifact.file_name(),
            source: artifact.render(),
        }
    }

    /// `<package dirs>/<file_name>`; a leading `crate` segment is dropped.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .package
            .split("::")
            .filter(|s| !s.is_empty())
            .skip_while(|s| *s == "crate")
            .collect();
        path.push(&self.file_name);

        path
    }
}

///
/// OutputSink
///

pub trait OutputSink {
    /// Persist a unit, returning where it went.
    fn write(&mut self, unit: &CompilationUnit) -> Result<String, EmitError>;
}

///
/// FsSink
///
/// Writes units under a root directory. Writing the same file twice in one
/// pass is a conflict; files left by earlier passes are overwritten.
///

#[derive(Debug)]
pub struct FsSink {
    root: PathBuf,
    written: HashSet<PathBuf>,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: HashSet::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for FsSink {
    fn write(&mut self, unit: &CompilationUnit) -> Result<String, EmitError> {
        let path = self.root.join(unit.relative_path());
        let display = path.display().to_string();

        if self.written.contains(&path) {
            return Err(EmitError::Conflict(display));
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| EmitError::Io {
                path: dir.display().to_string(),
                source,
            })?;
        }
        fs::write(&path, &unit.source).map_err(|source| EmitError::Io {
            path: display.clone(),
            source,
        })?;
        self.written.insert(path);

        Ok(display)
    }
}

///
/// MemorySink
///

#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub units: Vec<CompilationUnit>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CompilationUnit> {
        self.units.iter().find(|u| u.name == name)
    }
}

impl OutputSink for MemorySink {
    fn write(&mut self, unit: &CompilationUnit) -> Result<String, EmitError> {
        let location = unit.relative_path().display().to_string();
        if self.units.iter().any(|u| u.relative_path() == unit.relative_path()) {
            return Err(EmitError::Conflict(location));
        }
        self.units.push(unit.clone());

        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(package: &str, name: &str) -> CompilationUnit {
        CompilationUnit {
            package: package.to_string(),
            name: name.to_string(),
            file_name: "greeter_impl.rs".to_string(),
            source: "pub struct Greeter_Impl;".to_string(),
        }
    }

    #[test]
    fn relative_path_drops_the_crate_segment() {
        assert_eq!(
            unit("crate::greet", "Greeter_Impl").relative_path(),
            PathBuf::from("greet/greeter_impl.rs")
        );
        assert_eq!(
            unit("app::greet", "Greeter_Impl").relative_path(),
            PathBuf::from("app/greet/greeter_impl.rs")
        );
        assert_eq!(
            unit("", "Greeter_Impl").relative_path(),
            PathBuf::from("greeter_impl.rs")
        );
    }

    #[test]
    fn fs_sink_writes_and_detects_conflicts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut sink = FsSink::new(dir.path());

        let location = sink
            .write(&unit("crate::greet", "Greeter_Impl"))
            .expect("first write");
        let written = fs::read_to_string(&location).expect("file exists");
        assert_eq!(written, "pub struct Greeter_Impl;");

        let err = sink
            .write(&unit("crate::greet", "Greeter_Impl"))
            .expect_err("second write conflicts");
        assert!(matches!(err, EmitError::Conflict(_)));
    }

    #[test]
    fn fs_sink_overwrites_files_from_earlier_passes() {
        let dir = tempfile::tempdir().expect("tempdir");
        FsSink::new(dir.path())
            .write(&unit("crate::greet", "Greeter_Impl"))
            .expect("first pass");

        FsSink::new(dir.path())
            .write(&unit("crate::greet", "Greeter_Impl"))
            .expect("a new pass may overwrite");
    }

    #[test]
    fn memory_sink_keeps_units_in_order() {
        let mut sink = MemorySink::new();
        sink.write(&unit("crate::a", "A_Impl")).expect("a");
        sink.write(&unit("crate::b", "B_Impl")).expect("b");

        let names: Vec<_> = sink.units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["A_Impl", "B_Impl"]);
        assert!(sink.write(&unit("crate::a", "A_Impl")).is_err());
    }
}

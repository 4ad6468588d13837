use crate::prelude::*;
use std::fmt;
use thiserror::Error as ThisError;

///
/// MirroredType
///
/// Raised when a marker payload is read directly but only a type reference
/// is available. The reference rides along inside the error.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("attempt to access mirrored type '{type_ref}'")]
pub struct MirroredType {
    type_ref: String,
}

impl MirroredType {
    #[must_use]
    pub fn type_ref(&self) -> &str {
        &self.type_ref
    }

    #[must_use]
    pub fn into_type_ref(self) -> String {
        self.type_ref
    }
}

///
/// ImplementationOf
///
/// Field-level delegation marker. Schema files only ever carry the target as
/// a path, so `value()` on a deserialized marker always raises `MirroredType`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "String", into = "String")]
pub struct ImplementationOf {
    payload: Payload,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Payload {
    Loaded(Box<Interface>),
    Mirrored(String),
}

impl ImplementationOf {
    pub fn mirrored(path: impl Into<String>) -> Self {
        Self {
            payload: Payload::Mirrored(path.into()),
        }
    }

    #[must_use]
    pub fn loaded(interface: Interface) -> Self {
        Self {
            payload: Payload::Loaded(Box::new(interface)),
        }
    }

    /// Read the target interface directly.
    pub fn value(&self) -> Result<&Interface, MirroredType> {
        match &self.payload {
            Payload::Loaded(interface) => Ok(interface),
            Payload::Mirrored(path) => Err(MirroredType {
                type_ref: path.clone(),
            }),
        }
    }
}

impl From<String> for ImplementationOf {
    fn from(path: String) -> Self {
        Self::mirrored(path)
    }
}

impl From<ImplementationOf> for String {
    fn from(marker: ImplementationOf) -> Self {
        match marker.payload {
            Payload::Loaded(interface) => interface.path(),
            Payload::Mirrored(path) => path,
        }
    }
}

impl fmt::Display for ImplementationOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Payload::Loaded(interface) => write!(f, "{}", interface.path()),
            Payload::Mirrored(path) => f.write_str(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrored_marker_traps_with_type_ref() {
        let marker = ImplementationOf::mirrored("crate::speak::Speaker");

        let trap = marker.value().expect_err("mirrored payload cannot be read");
        assert_eq!(trap.type_ref(), "crate::speak::Speaker");
    }

    #[test]
    fn loaded_marker_reads_directly() {
        let marker = ImplementationOf::loaded(Interface::new("crate::speak::Speaker"));

        let interface = marker.value().expect("loaded payload is readable");
        assert_eq!(interface.path(), "crate::speak::Speaker");
        assert_eq!(marker.to_string(), "crate::speak::Speaker");
    }
}

use crate::errors::Error;

/// Type tag stored in front of every object payload
///
/// Also used as the entry kind inside tree objects, where only `blob` and
/// `tree` are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Parse the raw type tag of a stored object
    pub fn parse_tag(tag: &[u8]) -> Option<ObjectType> {
        std::str::from_utf8(tag)
            .ok()
            .and_then(|tag| ObjectType::try_from(tag).ok())
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(Error::MalformedTree(format!("invalid object kind {value:?}"))),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

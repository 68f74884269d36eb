use crate::query::predicate::FieldPath;
use std::fmt;

///
/// IncludeHint
///
/// Advisory eager-load marker handed to a query source. Typed hints come
/// from `FieldRef`s, string hints from dotted navigation paths.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IncludeHint<'a> {
    Field(&'a FieldPath),
    Path(&'a str),
}

impl IncludeHint<'_> {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Field(path) => path.as_str(),
            Self::Path(path) => *path,
        }
    }
}

impl fmt::Display for IncludeHint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(path) => write!(f, "field:{path}"),
            Self::Path(path) => write!(f, "path:{path}"),
        }
    }
}

use crate::query::{
    builder::FieldRef,
    predicate::{Expr, FieldPath, Lambda, Parameter},
};
use std::fmt;

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub const fn is_desc(self) -> bool {
        matches!(self, Self::Desc)
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

///
/// NullOrdering
/// Where null keys land relative to non-null keys.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum NullOrdering {
    /// Leave null placement to the query source.
    #[default]
    Unspecified,
    NullsFirst,
    NullsLast,
}

///
/// KeySelector
///
/// Value-producing lambda used as a sort key.
///

pub struct KeySelector<E>(Lambda<E>);

impl<E> KeySelector<E> {
    #[must_use]
    pub const fn new(lambda: Lambda<E>) -> Self {
        Self(lambda)
    }

    /// Key that reads one field of the row.
    #[must_use]
    pub fn field(field: FieldRef) -> Self {
        let param = Parameter::default();
        Self(Lambda::from_parts(param, Expr::field(param, field.path())))
    }

    #[must_use]
    pub const fn lambda(&self) -> &Lambda<E> {
        &self.0
    }

    /// Field path when the key is a plain field read.
    #[must_use]
    pub const fn field_path(&self) -> Option<&FieldPath> {
        match self.0.body() {
            Expr::Field { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Derived boolean key: `true` when this key reads as null.
    #[must_use]
    pub fn null_tier(&self) -> Self {
        Self(self.0.map_body(Expr::is_null))
    }
}

impl<E> From<FieldRef> for KeySelector<E> {
    fn from(field: FieldRef) -> Self {
        Self::field(field)
    }
}

impl<E> From<&'static str> for KeySelector<E> {
    fn from(field: &'static str) -> Self {
        Self::field(FieldRef::new(field))
    }
}

impl<E> From<Lambda<E>> for KeySelector<E> {
    fn from(lambda: Lambda<E>) -> Self {
        Self(lambda)
    }
}

impl<E> Clone for KeySelector<E> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<E> PartialEq for KeySelector<E> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<E> fmt::Debug for KeySelector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeySelector").field(&self.0).finish()
    }
}

impl<E> fmt::Display for KeySelector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

///
/// SortDescriptor
///
/// One ordering tier. Position 0 in a specification's sort list is the
/// primary ordering; later descriptors only break ties.
///

pub struct SortDescriptor<E> {
    key: KeySelector<E>,
    direction: OrderDirection,
    nulls: NullOrdering,
}

impl<E> SortDescriptor<E> {
    #[must_use]
    pub const fn new(key: KeySelector<E>, direction: OrderDirection) -> Self {
        Self {
            key,
            direction,
            nulls: NullOrdering::Unspecified,
        }
    }

    #[must_use]
    pub const fn key(&self) -> &KeySelector<E> {
        &self.key
    }

    #[must_use]
    pub const fn direction(&self) -> OrderDirection {
        self.direction
    }

    #[must_use]
    pub const fn nulls(&self) -> NullOrdering {
        self.nulls
    }

    #[must_use]
    pub const fn with_nulls(mut self, nulls: NullOrdering) -> Self {
        self.nulls = nulls;
        self
    }

    pub(crate) const fn set_nulls(&mut self, nulls: NullOrdering) {
        self.nulls = nulls;
    }
}

impl<E> Clone for SortDescriptor<E> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            direction: self.direction,
            nulls: self.nulls,
        }
    }
}

impl<E> PartialEq for SortDescriptor<E> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.direction == other.direction && self.nulls == other.nulls
    }
}

impl<E> fmt::Debug for SortDescriptor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortDescriptor")
            .field("key", &self.key)
            .field("direction", &self.direction)
            .field("nulls", &self.nulls)
            .finish()
    }
}

use crate::value::Value;
use ulid::Ulid;

///
/// Path
/// Stable, human-readable entity path used in diagnostics and metrics.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// FieldValues
///
/// Field access by name. Dotted paths are passed through unchanged; an
/// entity that models nested data resolves them itself.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}

///
/// EntityKind
///
/// Entity types a specification can target. `ID_FIELD` names the stable,
/// comparable identity used by the stable-sort fallback.
///

pub trait EntityKind: Path + FieldValues + 'static {
    const ID_FIELD: &'static str;

    /// Read the identity value through the field accessor.
    fn id_value(&self) -> Value {
        self.get_value(Self::ID_FIELD).unwrap_or(Value::Null)
    }
}

///
/// FieldValue
///
/// Conversion boundary for values used in predicates.
///
/// Represents values that can appear on the *right-hand side* of predicates
/// and values an entity exposes through `FieldValues`.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

impl FieldValue for &str {
    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }

    fn from_value(_value: &Value) -> Option<Self> {
        None
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float64(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float64(f64::from(*self))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float64(v) => Some(*v as Self),
            _ => None,
        }
    }
}

impl FieldValue for Ulid {
    fn to_value(&self) -> Value {
        Value::Ulid(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Ulid(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if matches!(value, Value::Null) {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        let Value::List(items) = value else {
            return None;
        };

        items.iter().map(T::from_value).collect()
    }
}

impl<T: FieldValue> FieldValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(_value: &Value) -> Option<Self> {
        None
    }
}

// impl_field_value
#[macro_export]
macro_rules! impl_field_value {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => (*v).try_into().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_value!(
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    bool => Bool,
);

///
/// impl_entity
///
/// Implements `Path`, `FieldValues`, and `EntityKind` for a plain struct whose
/// listed fields all implement `FieldValue`.
///
/// ```ignore
/// impl_entity!(Order, path = "shop::Order", id = id, fields = [id, total, placed_at]);
/// ```
///

#[macro_export]
macro_rules! impl_entity {
    ( $entity:ty, path = $path:expr, id = $id:ident, fields = [ $( $field:ident ),* $(,)? ] ) => {
        impl $crate::traits::Path for $entity {
            const PATH: &'static str = $path;
        }

        impl $crate::traits::FieldValues for $entity {
            fn get_value(&self, field: &str) -> Option<$crate::value::Value> {
                match field {
                    $( stringify!($field) => Some($crate::traits::FieldValue::to_value(&self.$field)), )*
                    _ => None,
                }
            }
        }

        impl $crate::traits::EntityKind for $entity {
            const ID_FIELD: &'static str = stringify!($id);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::Account;

    #[test]
    fn option_maps_none_to_null() {
        let none: Option<u32> = None;

        assert_eq!(none.to_value(), Value::Null);
        assert_eq!(Option::<u32>::from_value(&Value::Null), Some(None));
        assert_eq!(Option::<u32>::from_value(&Value::Uint(4)), Some(Some(4)));
    }

    #[test]
    fn integer_round_trip_rejects_overflow() {
        assert_eq!(u8::from_value(&Value::Uint(300)), None);
        assert_eq!(i16::from_value(&Value::Int(-12)), Some(-12));
    }

    #[test]
    fn impl_entity_exposes_fields_and_identity() {
        let account = Account::new(7, "ice", true);

        assert_eq!(account.get_value("name"), Some(Value::Text("ice".into())));
        assert_eq!(account.get_value("unknown"), None);
        assert_eq!(Account::ID_FIELD, "id");
        assert_eq!(account.id_value(), Value::Uint(7));
    }
}

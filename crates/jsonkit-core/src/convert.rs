//! Typed conversions out of a [`Value`].
//!
//! Each target type has its own [`FromValue`] impl, so the conversion table
//! is spelled out per target rather than discovered at runtime:
//!
//! | from \ to | integer | float | bool | String | Array | Object |
//! |---|---|---|---|---|---|---|
//! | Null | ✗ | ✗ | ✗ | ✗ | ✗ | ✗ |
//! | Boolean | 0/1 | 0/1 | identity | `"true"`/`"false"` | ✗ | ✗ |
//! | Number | truncate, range-checked | identity | nonzero | canonical text | ✗ | ✗ |
//! | String | numeric literal, then truncate | numeric literal | `"true"`/`"false"` only | identity | ✗ | ✗ |
//! | Array | ✗ | ✗ | ✗ | ✗ | clone | ✗ |
//! | Object | ✗ | ✗ | ✗ | ✗ | ✗ | clone |

use crate::error::ConversionError;
use crate::parser::parse_number_literal;
use crate::printer::format_number;
use crate::value::{Array, Object, Type, Value};

/// A type a [`Value`] can be converted into with [`Value::convert`].
pub trait FromValue: Sized {
    /// Target name reported in [`ConversionError::to`].
    const NAME: &'static str;

    fn from_value(value: &Value) -> Result<Self, ConversionError>;
}

/// A container type whose storage can be borrowed out of a [`Value`].
pub trait Container {
    const NAME: &'static str;

    fn from_value_ref(value: &Value) -> Result<&Self, ConversionError>;

    fn from_value_mut(value: &mut Value) -> Result<&mut Self, ConversionError>;
}

/// Numeric projection shared by the integer and float targets.
fn numeric(value: &Value, to: &'static str) -> Result<f64, ConversionError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => parse_number_literal(s).ok_or(ConversionError::new(Type::String, to)),
        other => Err(ConversionError::new(other.get_type(), to)),
    }
}

macro_rules! impl_from_value_int {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                const NAME: &'static str = stringify!($ty);

                fn from_value(value: &Value) -> Result<Self, ConversionError> {
                    let n = numeric(value, Self::NAME)?.trunc();
                    // `MAX as f64` rounds up for 64-bit types, so the upper
                    // bound is exclusive: 2^BITS unsigned, 2^(BITS-1) signed.
                    let upper = 2f64.powi(<$ty>::BITS as i32 - i32::from(<$ty>::MIN != 0));
                    if n.is_finite() && n >= <$ty>::MIN as f64 && n < upper {
                        Ok(n as $ty)
                    } else {
                        Err(ConversionError::new(value.get_type(), Self::NAME))
                    }
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    const NAME: &'static str = "f64";

    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        numeric(value, Self::NAME)
    }
}

impl FromValue for f32 {
    const NAME: &'static str = "f32";

    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        numeric(value, Self::NAME).map(|n| n as f32)
    }
}

impl FromValue for bool {
    const NAME: &'static str = "bool";

    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Boolean(b) => Ok(*b),
            Value::Number(n) => Ok(*n != 0.0),
            Value::String(s) if s == "true" => Ok(true),
            Value::String(s) if s == "false" => Ok(false),
            other => Err(ConversionError::new(other.get_type(), Self::NAME)),
        }
    }
}

impl FromValue for String {
    const NAME: &'static str = "string";

    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Boolean(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(format_number(*n)),
            other => Err(ConversionError::new(other.get_type(), Self::NAME)),
        }
    }
}

impl FromValue for Array {
    const NAME: &'static str = <Array as Container>::NAME;

    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        Array::from_value_ref(value).cloned()
    }
}

impl FromValue for Object {
    const NAME: &'static str = <Object as Container>::NAME;

    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        Object::from_value_ref(value).cloned()
    }
}

impl Container for Array {
    const NAME: &'static str = "array";

    fn from_value_ref(value: &Value) -> Result<&Self, ConversionError> {
        match value {
            Value::Array(items) => Ok(items),
            other => Err(ConversionError::new(other.get_type(), <Self as Container>::NAME)),
        }
    }

    fn from_value_mut(value: &mut Value) -> Result<&mut Self, ConversionError> {
        match value {
            Value::Array(items) => Ok(items),
            other => Err(ConversionError::new(other.get_type(), <Self as Container>::NAME)),
        }
    }
}

impl Container for Object {
    const NAME: &'static str = "object";

    fn from_value_ref(value: &Value) -> Result<&Self, ConversionError> {
        match value {
            Value::Object(object) => Ok(object),
            other => Err(ConversionError::new(other.get_type(), <Self as Container>::NAME)),
        }
    }

    fn from_value_mut(value: &mut Value) -> Result<&mut Self, ConversionError> {
        match value {
            Value::Object(object) => Ok(object),
            other => Err(ConversionError::new(other.get_type(), <Self as Container>::NAME)),
        }
    }
}

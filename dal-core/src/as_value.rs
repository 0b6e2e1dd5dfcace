use crate::{Error, Result, Value};
use atoi::FromRadix10SignedChecked;
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use std::{any, str};
use time::{Date, PrimitiveDateTime, Time, macros::format_description};
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`] used for statement
/// parameters and row decoding.
///
/// Decoding is lenient on purpose of what backends send: integers accept any other integer variant
/// that fits, and numbers, dates and uuids are parsed back from text when the backend delivers them
/// as strings.
///
/// ```rust
/// use dal_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert_eq!(v, Value::Int32(Some(42)));
/// let n: i64 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// The `None` variant describing this type, used by column descriptors.
    fn as_empty_value() -> Value;
    /// Convert into the owned [`Value`] representation.
    fn as_value(self) -> Value;
    /// Attempt to convert a dynamic [`Value`] into `Self`.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

fn cannot_convert<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {value:?} to {}",
        any::type_name::<T>()
    ))
}

fn text<T>(bytes: &[u8]) -> Result<&str> {
    str::from_utf8(bytes).map_err(|_| {
        Error::msg(format!(
            "Cannot read {} from non utf-8 bytes {:?}",
            any::type_name::<T>(),
            bytes
        ))
    })
}

fn parse_integer<T>(bytes: &[u8]) -> Result<i128> {
    match i128::from_radix_10_signed_checked(bytes) {
        (Some(v), used) if used > 0 && used == bytes.len() => Ok(v),
        _ => Err(Error::msg(format!(
            "Cannot parse `{}` as {}",
            String::from_utf8_lossy(bytes),
            any::type_name::<T>()
        ))),
    }
}

macro_rules! impl_as_value_integer {
    ($($source:ty => $variant:ident),+ $(,)?) => {$(
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                Value::$variant(None)
            }
            fn as_value(self) -> Value {
                Value::$variant(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                #[allow(unreachable_patterns)]
                let wide: i128 = match value {
                    Value::$variant(Some(v)) => return Ok(v),
                    Value::Boolean(Some(v)) => v as _,
                    Value::Int8(Some(v)) => v as _,
                    Value::Int16(Some(v)) => v as _,
                    Value::Int32(Some(v)) => v as _,
                    Value::Int64(Some(v)) => v as _,
                    Value::UInt8(Some(v)) => v as _,
                    Value::UInt16(Some(v)) => v as _,
                    Value::UInt32(Some(v)) => v as _,
                    Value::UInt64(Some(v)) => v as _,
                    ref v => match v.as_bytes() {
                        Some(bytes) => parse_integer::<Self>(bytes)?,
                        None => return Err(cannot_convert::<Self>(v)),
                    },
                };
                Self::try_from(wide).map_err(|_| {
                    Error::msg(format!(
                        "Value {wide} is out of range for {}",
                        any::type_name::<Self>()
                    ))
                })
            }
        }
    )+};
}

impl_as_value_integer!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
);

macro_rules! impl_as_value_float {
    ($($source:ty => $variant:ident),+ $(,)?) => {$(
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                Value::$variant(None)
            }
            fn as_value(self) -> Value {
                Value::$variant(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                #[allow(unreachable_patterns)]
                match value {
                    Value::$variant(Some(v)) => Ok(v),
                    Value::Float32(Some(v)) => Ok(v as _),
                    Value::Float64(Some(v)) => Ok(v as _),
                    Value::Decimal(Some(v)) => v
                        .to_f64()
                        .map(|v| v as _)
                        .ok_or_else(|| cannot_convert::<Self>(&value)),
                    ref v => {
                        if let Some(bytes) = v.as_bytes() {
                            return fast_float::parse::<$source, _>(bytes).map_err(|_| {
                                Error::msg(format!(
                                    "Cannot parse `{}` as {}",
                                    String::from_utf8_lossy(bytes),
                                    any::type_name::<Self>()
                                ))
                            });
                        }
                        i64::try_from_value(v.clone())
                            .map(|v| v as _)
                            .map_err(|_| cannot_convert::<Self>(v))
                    }
                }
            }
        }
    )+};
}

impl_as_value_float!(f32 => Float32, f64 => Float64);

impl AsValue for bool {
    fn as_empty_value() -> Value {
        Value::Boolean(None)
    }
    fn as_value(self) -> Value {
        Value::Boolean(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if let Value::Boolean(Some(v)) = value {
            return Ok(v);
        }
        let context = cannot_convert::<Self>(&value);
        match i64::try_from_value(value) {
            Ok(0) => Ok(false),
            Ok(1) => Ok(true),
            _ => Err(context),
        }
    }
}

impl AsValue for String {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(match value {
            Value::Varchar(Some(v)) => v,
            Value::Blob(Some(v)) => String::from_utf8(v.into_vec())
                .map_err(|e| Error::msg(format!("Cannot read a String from non utf-8 bytes: {e}")))?,
            Value::Boolean(Some(v)) => v.to_string(),
            Value::Int8(Some(v)) => v.to_string(),
            Value::Int16(Some(v)) => v.to_string(),
            Value::Int32(Some(v)) => v.to_string(),
            Value::Int64(Some(v)) => v.to_string(),
            Value::UInt8(Some(v)) => v.to_string(),
            Value::UInt16(Some(v)) => v.to_string(),
            Value::UInt32(Some(v)) => v.to_string(),
            Value::UInt64(Some(v)) => v.to_string(),
            Value::Float32(Some(v)) => v.to_string(),
            Value::Float64(Some(v)) => v.to_string(),
            Value::Decimal(Some(v)) => v.to_string(),
            Value::Uuid(Some(v)) => v.to_string(),
            v => return Err(cannot_convert::<Self>(&v)),
        })
    }
}

impl AsValue for Vec<u8> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self.into_boxed_slice()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(Some(v)) => Ok(v.into_vec()),
            Value::Varchar(Some(v)) => Ok(v.into_bytes()),
            v => Err(cannot_convert::<Self>(&v)),
        }
    }
}

impl AsValue for Decimal {
    fn as_empty_value() -> Value {
        Value::Decimal(None)
    }
    fn as_value(self) -> Value {
        Value::Decimal(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Decimal(Some(v)) => Ok(v),
            Value::Float32(Some(v)) => {
                Decimal::from_f32(v).ok_or_else(|| cannot_convert::<Self>(&value))
            }
            Value::Float64(Some(v)) => {
                Decimal::from_f64(v).ok_or_else(|| cannot_convert::<Self>(&value))
            }
            ref v => {
                if let Some(bytes) = v.as_bytes() {
                    let input = text::<Self>(bytes)?;
                    return input.parse::<Decimal>().map_err(|e| {
                        Error::msg(format!("Cannot parse `{input}` as Decimal: {e}"))
                    });
                }
                i64::try_from_value(value.clone())
                    .map(Decimal::from)
                    .or_else(|_| u64::try_from_value(value.clone()).map(Decimal::from))
                    .map_err(|_| cannot_convert::<Self>(&value))
            }
        }
    }
}

impl AsValue for Date {
    fn as_empty_value() -> Value {
        Value::Date(None)
    }
    fn as_value(self) -> Value {
        Value::Date(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Date(Some(v)) => Ok(v),
            Value::Timestamp(Some(v)) => Ok(v.date()),
            ref v => {
                let Some(bytes) = v.as_bytes() else {
                    return Err(cannot_convert::<Self>(v));
                };
                let input = text::<Self>(bytes)?;
                Date::parse(input, format_description!("[year]-[month]-[day]"))
                    .map_err(|e| Error::msg(format!("Cannot parse `{input}` as Date: {e}")))
            }
        }
    }
}

impl AsValue for Time {
    fn as_empty_value() -> Value {
        Value::Time(None)
    }
    fn as_value(self) -> Value {
        Value::Time(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Time(Some(v)) => Ok(v),
            Value::Timestamp(Some(v)) => Ok(v.time()),
            ref v => {
                let Some(bytes) = v.as_bytes() else {
                    return Err(cannot_convert::<Self>(v));
                };
                let input = text::<Self>(bytes)?;
                Time::parse(
                    input,
                    format_description!("[hour]:[minute]:[second][optional [.[subsecond]]]"),
                )
                .map_err(|e| Error::msg(format!("Cannot parse `{input}` as Time: {e}")))
            }
        }
    }
}

impl AsValue for PrimitiveDateTime {
    fn as_empty_value() -> Value {
        Value::Timestamp(None)
    }
    fn as_value(self) -> Value {
        Value::Timestamp(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Timestamp(Some(v)) => Ok(v),
            Value::Date(Some(v)) => Ok(v.midnight()),
            ref v => {
                let Some(bytes) = v.as_bytes() else {
                    return Err(cannot_convert::<Self>(v));
                };
                let input = text::<Self>(bytes)?;
                PrimitiveDateTime::parse(
                    input,
                    format_description!(
                        "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
                    ),
                )
                .map_err(|e| Error::msg(format!("Cannot parse `{input}` as a timestamp: {e}")))
            }
        }
    }
}

impl AsValue for Uuid {
    fn as_empty_value() -> Value {
        Value::Uuid(None)
    }
    fn as_value(self) -> Value {
        Value::Uuid(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Uuid(Some(v)) => Ok(v),
            Value::Blob(Some(ref v)) if v.len() == 16 => Ok(Uuid::from_slice(v)?),
            ref v => {
                let Some(bytes) = v.as_bytes() else {
                    return Err(cannot_convert::<Self>(v));
                };
                Uuid::try_parse_ascii(bytes).map_err(|e| {
                    Error::msg(format!(
                        "Cannot parse `{}` as Uuid: {e}",
                        String::from_utf8_lossy(bytes)
                    ))
                })
            }
        }
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
    }
}

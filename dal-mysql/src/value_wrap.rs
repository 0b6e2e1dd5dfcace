use dal_core::{Error, Result, Value};
use time::{Date, Month, PrimitiveDateTime, Time};

pub(crate) struct ValueWrap(pub(crate) Value);

impl From<Value> for ValueWrap {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<ValueWrap> for Value {
    fn from(value: ValueWrap) -> Self {
        value.0
    }
}

impl TryFrom<mysql_async::Value> for ValueWrap {
    type Error = Error;
    fn try_from(value: mysql_async::Value) -> Result<Self> {
        type MySQLValue = mysql_async::Value;
        let invalid = |value: &MySQLValue| {
            Error::msg(format!("MySQL value {value:?} cannot be represented"))
        };
        Ok(match value {
            MySQLValue::NULL => Value::Null,
            MySQLValue::Bytes(v) => Value::Blob(Some(v.into())),
            MySQLValue::Int(v) => Value::Int64(Some(v)),
            MySQLValue::UInt(v) => Value::UInt64(Some(v)),
            MySQLValue::Float(v) => Value::Float32(Some(v)),
            MySQLValue::Double(v) => Value::Float64(Some(v)),
            MySQLValue::Date(year, month, day, hour, minute, second, microsecond) => {
                let date = Month::try_from(month)
                    .ok()
                    .and_then(|month| Date::from_calendar_date(year as _, month, day).ok())
                    .ok_or_else(|| invalid(&value))?;
                let time = Time::from_hms_micro(hour, minute, second, microsecond)
                    .map_err(|_| invalid(&value))?;
                Value::Timestamp(Some(PrimitiveDateTime::new(date, time)))
            }
            MySQLValue::Time(negative, days, hours, minutes, seconds, micro) => {
                if negative || days > 0 {
                    return Err(Error::msg(format!(
                        "MySQL time {value:?} is outside of the time of day range"
                    )));
                }
                Value::Time(Some(
                    Time::from_hms_micro(hours, minutes, seconds, micro)
                        .map_err(|_| invalid(&value))?,
                ))
            }
        }
        .into())
    }
}

impl TryFrom<ValueWrap> for mysql_async::Value {
    type Error = Error;

    fn try_from(value: ValueWrap) -> Result<Self> {
        type MySQLValue = mysql_async::Value;
        fn date(date: Date, time: Time) -> Result<MySQLValue> {
            let year = date.year();
            if year != year.clamp(u16::MIN as _, u16::MAX as _) {
                return Err(Error::msg(format!("Date {date} is out of range for MySQL")));
            }
            Ok(MySQLValue::Date(
                year as _,
                date.month().into(),
                date.day(),
                time.hour(),
                time.minute(),
                time.second(),
                time.microsecond(),
            ))
        }
        Ok(match value.0 {
            _ if value.0.is_null() => MySQLValue::NULL,
            Value::Boolean(Some(v)) => MySQLValue::from(v),
            Value::Int8(Some(v)) => MySQLValue::from(v),
            Value::Int16(Some(v)) => MySQLValue::from(v),
            Value::Int32(Some(v)) => MySQLValue::from(v),
            Value::Int64(Some(v)) => MySQLValue::from(v),
            Value::UInt8(Some(v)) => MySQLValue::from(v),
            Value::UInt16(Some(v)) => MySQLValue::from(v),
            Value::UInt32(Some(v)) => MySQLValue::from(v),
            Value::UInt64(Some(v)) => MySQLValue::from(v),
            Value::Float32(Some(v)) => MySQLValue::Float(v),
            Value::Float64(Some(v)) => MySQLValue::Double(v),
            Value::Decimal(Some(v)) => MySQLValue::Bytes(v.to_string().into_bytes()),
            Value::Varchar(Some(v)) => MySQLValue::Bytes(v.into_bytes()),
            Value::Blob(Some(v)) => MySQLValue::Bytes(v.into_vec()),
            Value::Date(Some(v)) => date(v, Time::MIDNIGHT)?,
            Value::Time(Some(v)) => MySQLValue::Time(
                false,
                0,
                v.hour(),
                v.minute(),
                v.second(),
                v.microsecond(),
            ),
            Value::Timestamp(Some(v)) => date(v.date(), v.time())?,
            Value::Uuid(Some(v)) => MySQLValue::Bytes(v.hyphenated().to_string().into_bytes()),
            v => {
                return Err(Error::msg(format!(
                    "dal::Value variant `{v:?}` is not supported by MySQL"
                )));
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, time};

    fn to_mysql(value: Value) -> mysql_async::Value {
        ValueWrap(value).try_into().unwrap()
    }

    fn from_mysql(value: mysql_async::Value) -> Result<Value> {
        ValueWrap::try_from(value).map(Into::into)
    }

    #[test]
    fn parameters() {
        assert_eq!(to_mysql(Value::Int32(None)), mysql_async::Value::NULL);
        assert_eq!(to_mysql(Value::Int32(Some(-3))), mysql_async::Value::Int(-3));
        assert_eq!(to_mysql(Value::UInt64(Some(3))), mysql_async::Value::UInt(3));
        assert_eq!(
            to_mysql(Value::Varchar(Some("a".into()))),
            mysql_async::Value::Bytes(b"a".to_vec())
        );
        assert_eq!(
            to_mysql(Value::Timestamp(Some(datetime!(2024-02-29 23:59:58.5)))),
            mysql_async::Value::Date(2024, 2, 29, 23, 59, 58, 500_000)
        );
        assert_eq!(
            to_mysql(Value::Date(Some(date!(1999 - 12 - 31)))),
            mysql_async::Value::Date(1999, 12, 31, 0, 0, 0, 0)
        );
    }

    #[test]
    fn results() {
        assert_eq!(from_mysql(mysql_async::Value::NULL).unwrap(), Value::Null);
        assert_eq!(
            from_mysql(mysql_async::Value::Int(7)).unwrap(),
            Value::Int64(Some(7))
        );
        assert_eq!(
            from_mysql(mysql_async::Value::Time(false, 0, 10, 20, 30, 0)).unwrap(),
            Value::Time(Some(time!(10:20:30)))
        );
        assert!(from_mysql(mysql_async::Value::Time(true, 0, 1, 0, 0, 0)).is_err());
        assert!(from_mysql(mysql_async::Value::Date(2024, 13, 1, 0, 0, 0, 0)).is_err());
    }
}

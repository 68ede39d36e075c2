//! Native scalar types for database columns
//!
//! The driver reports a type name for every result-set column (`INT`,
//! `VARCHAR`, `BIGINT UNSIGNED`, ...). [`NativeType`] is the target-language
//! scalar chosen for it; the names follow the .NET types the generated C#
//! classes use.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Native scalar type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeType {
    /// `TINYINT(1)` / `BOOLEAN`
    Boolean,
    /// Signed 8-bit integer
    SByte,
    /// Unsigned 8-bit integer
    Byte,
    /// Signed 16-bit integer
    Int16,
    /// Unsigned 16-bit integer
    UInt16,
    /// Signed 32-bit integer
    Int32,
    /// Unsigned 32-bit integer
    UInt32,
    /// Signed 64-bit integer
    Int64,
    /// Unsigned 64-bit integer
    UInt64,
    /// 32-bit float
    Single,
    /// 64-bit float
    Double,
    /// Fixed-point decimal
    Decimal,
    /// Date, datetime or timestamp
    DateTime,
    /// Time of day / interval
    TimeSpan,
    /// Character data (also enums, sets and JSON)
    String,
    /// Binary data
    ByteArray,
}

impl NativeType {
    /// Map a driver type name to a native type
    ///
    /// Returns `None` for type names this generator does not know about.
    ///
    /// # Examples
    ///
    /// ```
    /// # use schemagen::schema::NativeType;
    /// assert_eq!(NativeType::from_sql_type_name("INT"), Some(NativeType::Int32));
    /// assert_eq!(NativeType::from_sql_type_name("bigint unsigned"), Some(NativeType::UInt64));
    /// assert_eq!(NativeType::from_sql_type_name("VARCHAR"), Some(NativeType::String));
    /// ```
    #[must_use]
    pub fn from_sql_type_name(name: &str) -> Option<Self> {
        let native = match name.trim().to_ascii_uppercase().as_str() {
            "BOOLEAN" | "BOOL" => Self::Boolean,
            "TINYINT" => Self::SByte,
            "TINYINT UNSIGNED" => Self::Byte,
            "SMALLINT" => Self::Int16,
            "SMALLINT UNSIGNED" => Self::UInt16,
            "INT" | "INTEGER" | "MEDIUMINT" | "YEAR" => Self::Int32,
            "INT UNSIGNED" | "INTEGER UNSIGNED" | "MEDIUMINT UNSIGNED" => Self::UInt32,
            "BIGINT" => Self::Int64,
            "BIGINT UNSIGNED" | "BIT" => Self::UInt64,
            "FLOAT" => Self::Single,
            "DOUBLE" | "REAL" => Self::Double,
            "DECIMAL" | "NUMERIC" => Self::Decimal,
            "DATE" | "DATETIME" | "TIMESTAMP" => Self::DateTime,
            "TIME" => Self::TimeSpan,
            "CHAR" | "VARCHAR" | "TINYTEXT" | "TEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM"
            | "SET" | "JSON" => Self::String,
            "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB"
            | "GEOMETRY" => Self::ByteArray,
            _ => return None,
        };

        Some(native)
    }

    /// Type name as written in generated code
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::SByte => "SByte",
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Decimal => "Decimal",
            Self::DateTime => "DateTime",
            Self::TimeSpan => "TimeSpan",
            Self::String => "String",
            Self::ByteArray => "Byte[]",
        }
    }

    /// Function converting the textual value of a column into this type
    ///
    /// `None` for strings, which are assigned as-is, and for byte arrays,
    /// which are cast directly from the reader.
    #[must_use]
    pub const fn conversion(self) -> Option<&'static str> {
        match self {
            Self::String | Self::ByteArray => None,
            Self::TimeSpan => Some("TimeSpan.Parse"),
            Self::Boolean => Some("Convert.ToBoolean"),
            Self::SByte => Some("Convert.ToSByte"),
            Self::Byte => Some("Convert.ToByte"),
            Self::Int16 => Some("Convert.ToInt16"),
            Self::UInt16 => Some("Convert.ToUInt16"),
            Self::Int32 => Some("Convert.ToInt32"),
            Self::UInt32 => Some("Convert.ToUInt32"),
            Self::Int64 => Some("Convert.ToInt64"),
            Self::UInt64 => Some("Convert.ToUInt64"),
            Self::Single => Some("Convert.ToSingle"),
            Self::Double => Some("Convert.ToDouble"),
            Self::Decimal => Some("Convert.ToDecimal"),
            Self::DateTime => Some("Convert.ToDateTime"),
        }
    }

    /// Whether values are assigned without conversion
    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(self, Self::String)
    }

    /// Whether values are raw bytes
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(self, Self::ByteArray)
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_types() {
        assert_eq!(NativeType::from_sql_type_name("TINYINT"), Some(NativeType::SByte));
        assert_eq!(NativeType::from_sql_type_name("TINYINT UNSIGNED"), Some(NativeType::Byte));
        assert_eq!(NativeType::from_sql_type_name("SMALLINT"), Some(NativeType::Int16));
        assert_eq!(NativeType::from_sql_type_name("MEDIUMINT"), Some(NativeType::Int32));
        assert_eq!(NativeType::from_sql_type_name("INT UNSIGNED"), Some(NativeType::UInt32));
        assert_eq!(NativeType::from_sql_type_name("BIGINT"), Some(NativeType::Int64));
    }

    #[test]
    fn test_boolean() {
        assert_eq!(NativeType::from_sql_type_name("BOOLEAN"), Some(NativeType::Boolean));
    }

    #[test]
    fn test_text_and_binary() {
        assert_eq!(NativeType::from_sql_type_name("text"), Some(NativeType::String));
        assert_eq!(NativeType::from_sql_type_name("ENUM"), Some(NativeType::String));
        assert_eq!(NativeType::from_sql_type_name("JSON"), Some(NativeType::String));
        assert_eq!(NativeType::from_sql_type_name("VARBINARY"), Some(NativeType::ByteArray));
        assert_eq!(NativeType::from_sql_type_name("LONGBLOB"), Some(NativeType::ByteArray));
    }

    #[test]
    fn test_temporal() {
        assert_eq!(NativeType::from_sql_type_name("DATETIME"), Some(NativeType::DateTime));
        assert_eq!(NativeType::from_sql_type_name("TIMESTAMP"), Some(NativeType::DateTime));
        assert_eq!(NativeType::from_sql_type_name("TIME"), Some(NativeType::TimeSpan));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(NativeType::from_sql_type_name("NULL"), None);
        assert_eq!(NativeType::from_sql_type_name("VECTOR"), None);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(NativeType::Int32.conversion(), Some("Convert.ToInt32"));
        assert_eq!(NativeType::DateTime.conversion(), Some("Convert.ToDateTime"));
        assert_eq!(NativeType::TimeSpan.conversion(), Some("TimeSpan.Parse"));
        assert_eq!(NativeType::String.conversion(), None);
        assert_eq!(NativeType::ByteArray.conversion(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(NativeType::UInt64.to_string(), "UInt64");
        assert_eq!(NativeType::ByteArray.to_string(), "Byte[]");
    }
}

//! Identifier newtypes.
//!
//! Record ids are random UUIDv4 strings. The owner id is whatever subject the
//! identity provider hands back; it is never generated locally.

use std::fmt;

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::RecordId;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Get the raw string value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                String::column_result(value).map(Self)
            }
        }

        impl RecordId for $name {
            fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

macro_rules! generated_id {
    ($name:ident) => {
        impl $name {
            /// Generate a fresh random id
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }
        }
    };
}

string_id!(
    /// Subject of the account that owns a record
    OwnerId
);

string_id!(
    /// Child profile identifier
    ProfileId
);

string_id!(
    /// Category identifier
    CategoryId
);

string_id!(
    /// Video entry identifier (not the YouTube id)
    VideoId
);

generated_id!(ProfileId);
generated_id!(CategoryId);
generated_id!(VideoId);

//! Type-safe document identifiers.
//!
//! Every id is a `u32` newtype that displays with its collection prefix (`user_1`,
//! `product_3`, `order_12`) and serializes as that string. Parsing accepts both the
//! prefixed form and a bare number, so `/order/12` and `/order/order_12` address the
//! same document.

use paste::paste;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A string that is not a valid id for the expected collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind} id: {value:?}")]
pub struct ParseIdError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u32),
    Text(String),
}

macro_rules! entity_id {
    ($($entity:ident => $prefix:literal),+ $(,)?) => {
        paste! {
            $(
                #[doc = "Identifier of a " $prefix " document, displayed as `" $prefix "_<n>`."]
                #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
                pub struct [<$entity Id>](pub u32);

                impl From<u32> for [<$entity Id>] {
                    fn from(id: u32) -> Self {
                        Self(id)
                    }
                }

                impl fmt::Display for [<$entity Id>] {
                    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        write!(f, concat!($prefix, "_{}"), self.0)
                    }
                }

                impl FromStr for [<$entity Id>] {
                    type Err = ParseIdError;

                    fn from_str(s: &str) -> Result<Self, Self::Err> {
                        let digits = s.strip_prefix(concat!($prefix, "_")).unwrap_or(s);
                        digits.parse::<u32>().map(Self).map_err(|_| ParseIdError {
                            kind: $prefix,
                            value: s.to_string(),
                        })
                    }
                }

                impl Serialize for [<$entity Id>] {
                    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                        serializer.collect_str(self)
                    }
                }

                impl<'de> Deserialize<'de> for [<$entity Id>] {
                    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                        match RawId::deserialize(deserializer)? {
                            RawId::Number(n) => Ok(Self(n)),
                            RawId::Text(s) => s.parse().map_err(serde::de::Error::custom),
                        }
                    }
                }
            )+
        }
    };
}

entity_id!(
    User => "user",
    Product => "product",
    Order => "order",
    Address => "address",
);

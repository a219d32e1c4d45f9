//! Serde support for identifier types, serialized as their formatted
//! string representations (`DDMMYY`, `DDMMYY/N`, `DDMMYY-XXXXXX`).

use crate::{DatePart, PalletNumber, SeriesCode};
use core::fmt;
use core::marker::PhantomData;
use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

struct FormattedVisitor<T> {
    expecting: &'static str,
    _ty: PhantomData<T>,
}

impl<T> serde::de::Visitor<'_> for FormattedVisitor<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        v.parse().map_err(serde::de::Error::custom)
    }
}

macro_rules! impl_formatted_serde {
    ($ty:ty, $expecting:literal) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                d.deserialize_str(FormattedVisitor {
                    expecting: $expecting,
                    _ty: PhantomData,
                })
            }
        }
    };
}

impl_formatted_serde!(DatePart, "a DDMMYY date part");
impl_formatted_serde!(PalletNumber, "a DDMMYY/N pallet number");
impl_formatted_serde!(SeriesCode, "a DDMMYY-XXXXXX series code");

#[cfg(test)]
mod tests {
    use crate::{PalletNumber, SeriesCode};

    #[test]
    fn pallet_number_roundtrip() {
        let pallet: PalletNumber = "050525/8".parse().unwrap();
        let json = serde_json::to_string(&pallet).unwrap();
        assert_eq!(json, r#""050525/8""#);
        let back: PalletNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pallet);
    }

    #[test]
    fn series_code_roundtrip() {
        let code: SeriesCode = "050525-A1B2C3".parse().unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, r#""050525-A1B2C3""#);
        let back: SeriesCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(serde_json::from_str::<PalletNumber>(r#""050525/0""#).is_err());
        assert!(serde_json::from_str::<SeriesCode>(r#""050525-a1b2c3""#).is_err());
    }
}

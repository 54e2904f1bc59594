use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Locality data returned by the zip code lookup service.
///
/// Decodes from a JSON object only. Missing or null keys decode to empty
/// strings and a top-level `null` decodes to the empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZipCode {
    #[serde(rename = "cep")]
    pub id: String,
    #[serde(rename = "localidade")]
    pub city: String,
    #[serde(rename = "uf")]
    pub state: String,
}

impl ZipCode {
    /// Format as "City, ST"
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.id, self.city, self.state)
    }
}

impl<'de> Deserialize<'de> for ZipCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(ZipCodeVisitor)
    }
}

struct ZipCodeVisitor;

impl<'de> Visitor<'de> for ZipCodeVisitor {
    type Value = ZipCode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a zip code object")
    }

    fn visit_none<E: de::Error>(self) -> Result<ZipCode, E> {
        Ok(ZipCode::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<ZipCode, E> {
        Ok(ZipCode::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<ZipCode, D::Error> {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ZipCode, A::Error> {
        let mut zip = ZipCode::default();
        while let Some(key) = map.next_key::<String>()? {
            let field = match key.as_str() {
                "cep" => &mut zip.id,
                "localidade" => &mut zip.city,
                "uf" => &mut zip.state,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };
            // null leaves the field untouched
            if let Some(value) = map.next_value::<Option<String>>()? {
                *field = value;
            }
        }
        Ok(zip)
    }
}

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

pub const LIKERT_MIN: u8 = 1;
pub const LIKERT_MAX: u8 = 5;
/// Substituted for questions missing from an id-keyed response set.
pub const LIKERT_NEUTRAL: u8 = 3;

/// Questionnaire answers as submitted.
///
/// The full assessment posts an ordered list aligned with the question
/// catalog; the quick mood check posts a map keyed by question id covering
/// only the questions it asked.
///
/// Deserialized by hand so JSON object keys parse as question ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Responses {
    Sequence(Vec<u8>),
    ById(BTreeMap<u32, u8>),
}

impl From<Vec<u8>> for Responses {
    fn from(values: Vec<u8>) -> Self {
        Responses::Sequence(values)
    }
}

impl From<BTreeMap<u32, u8>> for Responses {
    fn from(values: BTreeMap<u32, u8>) -> Self {
        Responses::ById(values)
    }
}

impl<'de> Deserialize<'de> for Responses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ResponsesVisitor;

        impl<'de> Visitor<'de> for ResponsesVisitor {
            type Value = Responses;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of answers or a map of question id to answer")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Responses, A::Error> {
                let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(value) = seq.next_element::<u8>()? {
                    values.push(value);
                }
                Ok(Responses::Sequence(values))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Responses, A::Error> {
                let mut values = BTreeMap::new();
                while let Some((id, value)) = map.next_entry::<u32, u8>()? {
                    if values.insert(id, value).is_some() {
                        return Err(de::Error::custom(format!("duplicate question id {id}")));
                    }
                }
                Ok(Responses::ById(values))
            }
        }

        deserializer.deserialize_any(ResponsesVisitor)
    }
}

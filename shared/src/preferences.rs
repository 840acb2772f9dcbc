//! Champion preference list and the on-disk cache it is loaded from.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

/// Champion ids ranked by the user, highest priority first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceList(Vec<u32>);

impl PreferenceList {
    pub fn new(champion_ids: Vec<u32>) -> Self {
        Self(champion_ids)
    }

    pub fn contains(&self, champion_id: u32) -> bool {
        self.0.contains(&champion_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Content of the champion cache file: champions chosen for auto-pick in
/// priority order, and every other known champion.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PreferenceCache {
    #[serde(with = "ordered_champions")]
    pub selected: Vec<(u32, String)>,
    #[serde(rename = "not-selected", with = "ordered_champions")]
    pub not_selected: Vec<(u32, String)>,
}

impl PreferenceCache {
    /// Cache for a first start, every champion unselected and sorted by id.
    pub fn unselected(mut champions: Vec<(u32, String)>) -> Self {
        champions.sort_by_key(|(id, _)| *id);
        Self {
            selected: Vec::new(),
            not_selected: champions,
        }
    }

    pub fn preference_list(&self) -> PreferenceList {
        PreferenceList::new(self.selected.iter().map(|(id, _)| *id).collect())
    }
}

/// `{"<id>": "<name>"}` maps where the key order carries the priority.
mod ordered_champions {
    use super::*;

    pub fn serialize<S: Serializer>(
        champions: &[(u32, String)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(champions.len()))?;
        for (id, name) in champions {
            map.serialize_entry(&id.to_string(), name)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(u32, String)>, D::Error> {
        deserializer.deserialize_map(OrderedVisitor)
    }

    struct OrderedVisitor;

    impl<'de> Visitor<'de> for OrderedVisitor {
        type Value = Vec<(u32, String)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of champion ids to champion names")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut champions = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((id, name)) = access.next_entry::<String, String>()? {
                let id = id.parse::<u32>().map_err(serde::de::Error::custom)?;
                champions.push((id, name));
            }
            Ok(champions)
        }
    }
}

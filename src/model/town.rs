use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::id::{NationId, PlotId, ResidentId, TownId};

/// A social grouping of residents holding claimed plots; may belong to at
/// most one nation.
///
/// The member and plot sets are registries (back-references for lookup),
/// not lifecycle ownership — removing a town does not remove its residents.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Town {
    pub id: TownId,
    pub name: String,

    /// Nation membership, at most one. Kept consistent with `Nation::towns`
    /// by the `World` mutation API.
    pub nation: Option<NationId>,

    /// Kept consistent with `Resident::town` by the `World` mutation API.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub residents: BTreeSet<ResidentId>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub plots: BTreeSet<PlotId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_expected_shape() {
        let town = Town {
            id: TownId(3),
            name: "Ironhold".to_string(),
            nation: None,
            residents: BTreeSet::from([ResidentId(1), ResidentId(2)]),
            plots: BTreeSet::new(),
        };

        let json = serde_json::to_value(&town).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "Ironhold");
        assert!(json["nation"].is_null());
        assert_eq!(json["residents"], serde_json::json!([1, 2]));
        assert!(json.get("plots").is_none());
    }
}

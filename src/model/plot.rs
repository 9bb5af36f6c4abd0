use serde::{Deserialize, Serialize};

use crate::geometry::PlotBounds;
use crate::id::{PlotId, ResidentId, TownId};
use crate::permission::PermissionGroups;

/// A claimed rectangular land unit.
///
/// A plot can carry a personal owner and an owning town at the same time;
/// the two are independent, and the relation classifier consults both at
/// different precedence steps. A plot with neither defers to the
/// server-wide default permissions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Plot {
    pub id: PlotId,
    pub name: String,

    pub owner: Option<ResidentId>,

    /// Owning town, independent of the personal owner. Kept consistent with
    /// `Town::plots` by the `World` mutation API.
    pub town: Option<TownId>,

    pub bounds: PlotBounds,

    #[serde(default)]
    pub permissions: PermissionGroups,
}

impl Plot {
    pub fn is_owner(&self, resident: ResidentId) -> bool {
        self.owner == Some(resident)
    }
}

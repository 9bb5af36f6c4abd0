use crate::geometry::WorldPoint;
use crate::id::{PlotId, ResidentId};
use crate::model::Capability;
use crate::permission::GroupKind;
use crate::ranks::GovernanceAction;

/// Recoverable failures surfaced to the immediate caller.
///
/// None of these are fatal to the hosting process, and none are retried —
/// they are pure decision outcomes, not I/O failures. Human-readable
/// messaging is built by the presentation layer from the variant, not here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TownsError {
    /// `add` on a group that already holds the capability. Insertion is
    /// never silently deduplicated; callers pre-check or handle this.
    #[error("capability {capability} already granted to the {kind} group")]
    DuplicatePermission {
        kind: GroupKind,
        capability: Capability,
    },

    /// `remove` on a group that does not hold the capability.
    #[error("capability {capability} is not granted to the {kind} group")]
    PermissionNotFound {
        kind: GroupKind,
        capability: Capability,
    },

    /// A plot id that no longer resolves to a plot.
    #[error("plot {0} not found")]
    PlotNotFound(PlotId),

    /// No plot covers the given point; the caller decides the fallback.
    #[error("no plot at {0}")]
    NoPlotAt(WorldPoint),

    /// An owner-gated mutation on a plot that has no owner.
    #[error("plot {0} has no owner")]
    MissingOwner(PlotId),

    /// An owner-gated mutation by a resident who is not the owner.
    #[error("resident {resident} does not own plot {plot}")]
    NotOwner {
        plot: PlotId,
        resident: ResidentId,
    },

    /// A rank-gated governance action by a resident whose ranks do not
    /// grant it.
    #[error("resident {resident} is not permitted to {action}")]
    NotPermitted {
        resident: ResidentId,
        action: GovernanceAction,
    },
}

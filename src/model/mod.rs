pub mod capability;
pub(crate) mod macros;
pub mod nation;
pub mod plot;
pub mod resident;
pub mod town;
pub mod world;

pub use capability::Capability;
pub use nation::Nation;
pub use plot::Plot;
pub use resident::Resident;
pub use town::Town;
pub use world::World;

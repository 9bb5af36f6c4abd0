use towns::*;

/// Two nations with a capital town and a resident each, plus a townless
/// wanderer. No diplomatic edges — tests add the ally/enemy relations they
/// need.
pub struct TwoNations {
    pub world: World,
    pub vandar: NationId,
    pub morvath: NationId,
    pub ironhold: TownId,
    pub duskmoor: TownId,
    /// Ironhold resident, personal owner of `market_row`.
    pub aldric: ResidentId,
    /// Duskmoor resident.
    pub berta: ResidentId,
    /// Townless resident.
    pub wanderer: ResidentId,
    /// Ironhold plot with personal owner `aldric`.
    pub market_row: PlotId,
    /// Duskmoor plot, town property with no personal owner.
    pub harbor: PlotId,
    /// Plot with no owner and no town.
    pub wilds: PlotId,
}

pub fn two_nations() -> TwoNations {
    let mut world = World::new();

    let ironhold = world.add_town("Ironhold");
    let vandar = world.add_nation("Vandar", ironhold);
    let duskmoor = world.add_town("Duskmoor");
    let morvath = world.add_nation("Morvath", duskmoor);

    let aldric = world.add_resident("Aldric");
    world.join_town(aldric, ironhold);
    let berta = world.add_resident("Berta");
    world.join_town(berta, duskmoor);
    let wanderer = world.add_resident("Wren");

    let market_row = world.claim_plot(
        "Market Row",
        PlotBounds::new(WorldPoint::new(0, 0), WorldPoint::new(15, 15)),
        Some(ironhold),
    );
    world.set_plot_owner(market_row, Some(aldric)).unwrap();

    let harbor = world.claim_plot(
        "Harbor",
        PlotBounds::new(WorldPoint::new(64, 0), WorldPoint::new(79, 15)),
        Some(duskmoor),
    );

    let wilds = world.claim_plot(
        "Wilds",
        PlotBounds::new(WorldPoint::new(-64, -64), WorldPoint::new(-49, -49)),
        None,
    );

    TwoNations {
        world,
        vandar,
        morvath,
        ironhold,
        duskmoor,
        aldric,
        berta,
        wanderer,
        market_row,
        harbor,
        wilds,
    }
}

/// Server defaults allowing exactly the listed capabilities.
pub struct FixedDefaults(pub Vec<Capability>);

impl ServerDefaults for FixedDefaults {
    fn default_allows(&self, capability: &Capability) -> bool {
        self.0.contains(capability)
    }
}

/// Brute-force plot lookup over the world's plots.
pub struct ScanLookup<'a>(pub &'a World);

impl PlotLookup for ScanLookup<'_> {
    fn find_plot_containing(&self, point: WorldPoint) -> Option<PlotId> {
        self.0
            .plots
            .values()
            .find(|plot| plot.bounds.contains(point))
            .map(|plot| plot.id)
    }
}

//! Metro links: bidirectional unit-cost hops between station cells.

use citynav_core::{Cell, MoverClass};

/// An unordered pair of station cells, usable by one mover class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeleportLink {
    pub a: Cell,
    pub b: Cell,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mover: MoverClass,
}

impl TeleportLink {
    /// A link between `a` and `b` for pedestrians.
    pub const fn pedestrian(a: Cell, b: Cell) -> Self {
        Self {
            a,
            b,
            mover: MoverClass::Pedestrian,
        }
    }

    /// The cell at the other end of the link, if `c` is one of its ends.
    #[inline]
    pub fn other_side(&self, c: Cell) -> Option<Cell> {
        if c == self.a {
            Some(self.b)
        } else if c == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// Whether `c` is one of the link's two stations.
    #[inline]
    pub fn touches(&self, c: Cell) -> bool {
        c == self.a || c == self.b
    }
}

/// Ordered table of metro links.
///
/// Lookups are linear; the table is expected to hold a handful of links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TeleportLinkTable {
    links: Vec<TeleportLink>,
}

impl TeleportLinkTable {
    /// An empty table: no metro.
    pub fn new() -> Self {
        Self::default()
    }

    /// The city's metro: two stations, each covering two cells, every cell
    /// of one station linked to every cell of the other. Pedestrians only.
    pub fn city_metro() -> Self {
        const NORTH: [Cell; 2] = [Cell::new(9, 8), Cell::new(8, 9)];
        const SOUTH: [Cell; 2] = [Cell::new(15, 26), Cell::new(16, 25)];
        let mut table = Self::new();
        for a in NORTH {
            for b in SOUTH {
                table.push(TeleportLink::pedestrian(a, b));
            }
        }
        table
    }

    /// Add a link (builder).
    pub fn with_link(mut self, link: TeleportLink) -> Self {
        self.push(link);
        self
    }

    /// Add a link.
    pub fn push(&mut self, link: TeleportLink) {
        self.links.push(link);
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// All links in table order.
    pub fn iter(&self) -> impl Iterator<Item = &TeleportLink> + '_ {
        self.links.iter()
    }

    /// Far ends of every link from `c` open to `mover`, in table order.
    /// May repeat a cell if the table holds duplicate links.
    pub fn destinations(&self, c: Cell, mover: MoverClass) -> impl Iterator<Item = Cell> + '_ {
        self.links
            .iter()
            .filter(move |l| mover.rides_metro() && l.mover == mover)
            .filter_map(move |l| l.other_side(c))
    }

    /// Cells one metro hop away from `c` for `mover`, without duplicates.
    ///
    /// Empty for vehicles and for cells that are not stations.
    pub fn links_from(&self, c: Cell, mover: MoverClass) -> Vec<Cell> {
        let mut out = Vec::new();
        for d in self.destinations(c, mover) {
            if !out.contains(&d) {
                out.push(d);
            }
        }
        out
    }

    /// Whether `c` is a station of any link, whatever its mover class.
    pub fn is_station(&self, c: Cell) -> bool {
        self.links.iter().any(|l| l.touches(c))
    }

    /// Station cells of the links open to `mover`, without duplicates.
    pub fn stations(&self, mover: MoverClass) -> Vec<Cell> {
        let mut out = Vec::new();
        for l in self
            .links
            .iter()
            .filter(|l| mover.rides_metro() && l.mover == mover)
        {
            for c in [l.a, l.b] {
                if !out.contains(&c) {
                    out.push(c);
                }
            }
        }
        out
    }
}

impl FromIterator<TeleportLink> for TeleportLinkTable {
    fn from_iter<I: IntoIterator<Item = TeleportLink>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().collect(),
        }
    }
}

//! The two sides of the simulated market

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Asset identifier
///
/// CASH is quoted in its own units per unit of RISK; RISK's curve is
/// parameterized on inverse prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    #[serde(rename = "CASH")]
    Cash,
    #[serde(rename = "RISK")]
    Risk,
}

impl Asset {
    pub const ALL: [Asset; 2] = [Asset::Cash, Asset::Risk];

    pub fn other(self) -> Asset {
        match self {
            Asset::Cash => Asset::Risk,
            Asset::Risk => Asset::Cash,
        }
    }

    /// Exponent applied to square-rooted prices when deriving the curve
    pub fn orientation(self) -> i32 {
        match self {
            Asset::Cash => 1,
            Asset::Risk => -1,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Asset::Cash => "CASH",
            Asset::Risk => "RISK",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One value per asset, indexable by [`Asset`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerAsset<T> {
    #[serde(rename = "CASH")]
    pub cash: T,
    #[serde(rename = "RISK")]
    pub risk: T,
}

impl<T> PerAsset<T> {
    pub fn new(cash: T, risk: T) -> Self {
        Self { cash, risk }
    }

    pub fn from_fn(mut f: impl FnMut(Asset) -> T) -> Self {
        Self {
            cash: f(Asset::Cash),
            risk: f(Asset::Risk),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(Asset, T) -> U) -> PerAsset<U> {
        PerAsset {
            cash: f(Asset::Cash, self.cash),
            risk: f(Asset::Risk, self.risk),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Asset, &T)> {
        [(Asset::Cash, &self.cash), (Asset::Risk, &self.risk)].into_iter()
    }
}

impl<T> Index<Asset> for PerAsset<T> {
    type Output = T;

    fn index(&self, asset: Asset) -> &T {
        match asset {
            Asset::Cash => &self.cash,
            Asset::Risk => &self.risk,
        }
    }
}

impl<T> IndexMut<Asset> for PerAsset<T> {
    fn index_mut(&mut self, asset: Asset) -> &mut T {
        match asset {
            Asset::Cash => &mut self.cash,
            Asset::Risk => &mut self.risk,
        }
    }
}

//! Charms: score-to-diamond conversion
//!
//! A finished run pays out `min(round(score * multiplier), cap)` diamonds
//! using the equipped charm. Charms other than `normal` must be bought.

use serde::Serialize;

/// A purchasable payout modifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Charm {
    pub id: &'static str,
    pub name: &'static str,
    pub multiplier: f32,
    /// Maximum diamonds a single run can pay out
    pub cap: u64,
    /// Price in diamonds (0 = free)
    pub price: u64,
    pub description: &'static str,
}

/// Id of the free charm every player owns
pub const DEFAULT_CHARM: &str = "normal";

/// All charms, best payout first
pub const CHARMS: [Charm; 5] = [
    Charm {
        id: "legend",
        name: "Legendary Boost",
        multiplier: 1.5,
        cap: 150,
        price: 120,
        description: "Best boost, more diamonds (cap 150)",
    },
    Charm {
        id: "great",
        name: "Great Aid",
        multiplier: 1.3,
        cap: 130,
        price: 90,
        description: "Strong boost (cap 130)",
    },
    Charm {
        id: DEFAULT_CHARM,
        name: "Normal",
        multiplier: 1.0,
        cap: 100,
        price: 0,
        description: "Balanced (cap 100), free",
    },
    Charm {
        id: "helpful",
        name: "Helpful Charm",
        multiplier: 0.85,
        cap: 80,
        price: 60,
        description: "Slightly worse (cap 80)",
    },
    Charm {
        id: "quirky",
        name: "Quirky Trinket",
        multiplier: 0.6,
        cap: 50,
        price: 30,
        description: "Least boost (cap 50)",
    },
];

impl Charm {
    pub fn from_id(id: &str) -> Option<&'static Charm> {
        CHARMS.iter().find(|c| c.id == id)
    }

    /// The free default charm
    pub fn normal() -> &'static Charm {
        &CHARMS[2]
    }

    pub fn is_free(&self) -> bool {
        self.price == 0
    }

    /// Diamonds earned for a final score
    pub fn reward(&self, score: u32) -> u64 {
        let scaled = (score as f64 * self.multiplier as f64).round() as u64;
        scaled.min(self.cap)
    }
}

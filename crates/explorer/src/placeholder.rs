//! Decorative token network shown next to search results.
//!
//! The graph is generated from a generator seeded with the SHA-256 digest of
//! the identifier, so an address always yields the same picture.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::identifier::AccountIdentifier;

/// The center token followed by its satellites.
pub const NETWORK_TOKENS: [&str; 10] = [
    "SOL", "BONK", "WIF", "PYTH", "RAY", "ORCA", "SAMO", "JTO", "RENDER", "STEP",
];

/// Gradient classes available to nodes; the center always uses the first.
pub const NODE_PALETTE: [&str; 5] = [
    "from-purple-500 to-indigo-500",
    "from-blue-500 to-cyan-400",
    "from-pink-500 to-purple-400",
    "from-green-400 to-cyan-500",
    "from-yellow-400 to-orange-500",
];

pub const CROSS_LINKS: usize = 8;

const CENTER: f64 = 50.0;
const CENTER_SIZE: f64 = 18.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkNode {
    pub id: &'static str,
    /// Position in percent of the canvas
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkLink {
    pub source: &'static str,
    pub target: &'static str,
    pub strength: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TokenNetwork {
    pub nodes: Vec<NetworkNode>,
    pub links: Vec<NetworkLink>,
}

impl TokenNetwork {
    pub fn for_identifier(identifier: &AccountIdentifier) -> Self {
        let digest = Sha256::digest(identifier.as_str().as_bytes());
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&digest);
        Self::generate(&mut StdRng::from_seed(seed))
    }

    fn generate(rng: &mut StdRng) -> Self {
        let satellites = NETWORK_TOKENS.len() - 1;
        let mut nodes = Vec::with_capacity(NETWORK_TOKENS.len());

        nodes.push(NetworkNode {
            id: NETWORK_TOKENS[0],
            x: CENTER,
            y: CENTER,
            size: CENTER_SIZE,
            color: NODE_PALETTE[0],
        });

        for (i, id) in NETWORK_TOKENS.iter().skip(1).enumerate() {
            let angle = i as f64 / satellites as f64 * TAU;
            let distance = rng.gen_range(20.0..35.0);
            nodes.push(NetworkNode {
                id: *id,
                x: CENTER + angle.cos() * distance,
                y: CENTER + angle.sin() * distance,
                size: rng.gen_range(8.0..14.0),
                color: NODE_PALETTE[rng.gen_range(0..NODE_PALETTE.len())],
            });
        }

        let mut links: Vec<NetworkLink> = nodes[1..]
            .iter()
            .map(|node| NetworkLink {
                source: NETWORK_TOKENS[0],
                target: node.id,
                strength: rng.gen_range(0.3..1.0),
            })
            .collect();

        for _ in 0..CROSS_LINKS {
            let source = rng.gen_range(1..=satellites);
            // Offset keeps the target distinct from the source
            let target = 1 + (source - 1 + rng.gen_range(1..satellites)) % satellites;
            links.push(NetworkLink {
                source: nodes[source].id,
                target: nodes[target].id,
                strength: rng.gen_range(0.1..0.6),
            });
        }

        Self { nodes, links }
    }
}

// Chain id <-> provider slug lookup table
use serde::Serialize;

pub const ETHEREUM: u64 = 1;
pub const POLYGON: u64 = 137;
pub const BSC: u64 = 56;
pub const BASE: u64 = 8453;
pub const ARBITRUM: u64 = 42161;
pub const OPTIMISM: u64 = 10;
pub const AVALANCHE: u64 = 43114;
pub const LINEA: u64 = 59144;
pub const GNOSIS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chain {
    pub id: u64,
    /// Stable identifier used by the chain listing.
    pub key: &'static str,
    pub slug: &'static str,
    pub name: &'static str,
    pub native_symbol: &'static str,
}

/// The primary chain. Anything unrecognized maps here.
pub const DEFAULT_CHAIN: Chain = Chain {
    id: ETHEREUM,
    key: "ethereum",
    slug: "eth",
    name: "Ethereum",
    native_symbol: "ETH",
};

const SUPPORTED_CHAINS: &[Chain] = &[
    DEFAULT_CHAIN,
    Chain {
        id: POLYGON,
        key: "polygon",
        slug: "polygon",
        name: "Polygon",
        native_symbol: "POL",
    },
    Chain {
        id: BSC,
        key: "bsc",
        slug: "bsc",
        name: "BNB Chain",
        native_symbol: "BNB",
    },
    Chain {
        id: BASE,
        key: "base",
        slug: "base",
        name: "Base",
        native_symbol: "ETH",
    },
    Chain {
        id: ARBITRUM,
        key: "arbitrum",
        slug: "arbitrum",
        name: "Arbitrum",
        native_symbol: "ETH",
    },
    Chain {
        id: OPTIMISM,
        key: "optimism",
        slug: "optimism",
        name: "Optimism",
        native_symbol: "ETH",
    },
    Chain {
        id: AVALANCHE,
        key: "avalanche",
        slug: "avalanche",
        name: "Avalanche",
        native_symbol: "AVAX",
    },
    Chain {
        id: LINEA,
        key: "linea",
        slug: "linea",
        name: "Linea",
        native_symbol: "ETH",
    },
    Chain {
        id: GNOSIS,
        key: "gnosis",
        slug: "gnosis",
        name: "Gnosis",
        native_symbol: "xDAI",
    },
];

pub fn supported_chains() -> &'static [Chain] {
    SUPPORTED_CHAINS
}

/// Looks up a chain by numeric id, falling back to [`DEFAULT_CHAIN`].
pub fn chain_by_id(chain_id: u64) -> Chain {
    SUPPORTED_CHAINS
        .iter()
        .copied()
        .find(|chain| chain.id == chain_id)
        .unwrap_or(DEFAULT_CHAIN)
}

/// Looks up a chain by provider slug (case-insensitive), falling back to [`DEFAULT_CHAIN`].
pub fn chain_by_slug(slug: &str) -> Chain {
    let slug = slug.trim();
    SUPPORTED_CHAINS
        .iter()
        .copied()
        .find(|chain| chain.slug.eq_ignore_ascii_case(slug))
        .unwrap_or(DEFAULT_CHAIN)
}

pub fn slug_for(chain_id: u64) -> &'static str {
    chain_by_id(chain_id).slug
}

pub fn chain_id_for(slug: &str) -> u64 {
    chain_by_slug(slug).id
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub id: String,
    pub chain_id: u64,
    pub name: String,
    pub slug: String,
    pub native_symbol: String,
    pub logo: String,
}

impl From<Chain> for ChainInfo {
    fn from(chain: Chain) -> Self {
        Self {
            id: chain.key.to_string(),
            chain_id: chain.id,
            name: chain.name.to_string(),
            slug: chain.slug.to_string(),
            native_symbol: chain.native_symbol.to_string(),
            logo: format!("/cryptologos/{}.svg", chain.slug),
        }
    }
}

pub fn chain_listing() -> Vec<ChainInfo> {
    SUPPORTED_CHAINS.iter().copied().map(ChainInfo::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_ids_and_slugs_both_ways() {
        for chain in supported_chains() {
            assert_eq!(chain_id_for(slug_for(chain.id)), chain.id);
        }
        assert_eq!(slug_for(137), "polygon");
        assert_eq!(chain_id_for("arbitrum"), 42161);
    }

    #[test]
    fn unknown_inputs_use_the_primary_chain() {
        assert_eq!(slug_for(999_999), "eth");
        assert_eq!(chain_id_for("solana"), ETHEREUM);
        assert_eq!(chain_id_for(""), ETHEREUM);
        assert_eq!(chain_by_id(250), DEFAULT_CHAIN);
    }

    #[test]
    fn slug_lookup_ignores_case() {
        assert_eq!(chain_id_for("BSC"), BSC);
        assert_eq!(chain_by_slug(" Base ").native_symbol, "ETH");
    }

    #[test]
    fn listing_ids_are_stable_keys_not_display_names() {
        let ids: Vec<String> = chain_listing().into_iter().map(|info| info.id).collect();
        assert_eq!(
            ids,
            vec![
                "ethereum",
                "polygon",
                "bsc",
                "base",
                "arbitrum",
                "optimism",
                "avalanche",
                "linea",
                "gnosis"
            ]
        );
    }

    #[test]
    fn listing_keeps_table_order() {
        let listing = chain_listing();
        assert_eq!(listing.len(), supported_chains().len());
        assert_eq!(listing[0].slug, "eth");
        assert_eq!(listing[2].id, "bsc");
        assert_eq!(listing[2].name, "BNB Chain");
        assert_eq!(listing[8].logo, "/cryptologos/gnosis.svg");
    }
}

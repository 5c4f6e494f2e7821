use crate::models::NetworkInfo;

const WEI_PER_ETH: f64 = 1e18;

/// Crypto payment helper handed to whoever needs it; there is no global
/// instance.
#[derive(Debug, Clone)]
pub struct WalletService {
    eth_usd_rate: f64,
    collection_address: String,
}

impl WalletService {
    pub fn new(eth_usd_rate: f64, collection_address: impl Into<String>) -> Self {
        Self {
            eth_usd_rate,
            collection_address: collection_address.into(),
        }
    }

    pub fn collection_address(&self) -> &str {
        &self.collection_address
    }

    /// ETH amount for a USD fee, rendered with 6 decimals.
    pub fn usd_to_eth(&self, amount_usd: f64) -> String {
        format!("{:.6}", amount_usd / self.eth_usd_rate)
    }

    pub fn usd_to_wei_hex(&self, amount_usd: f64) -> String {
        Self::eth_to_wei_hex(amount_usd / self.eth_usd_rate)
    }

    /// Hex-encoded wei value, as a wallet's `value` field expects.
    pub fn eth_to_wei_hex(eth: f64) -> String {
        format!("0x{:x}", (eth * WEI_PER_ETH).round() as u128)
    }

    /// `0x` followed by exactly 20 hex-encoded bytes. Checksums are not
    /// checked.
    pub fn is_valid_address(address: &str) -> bool {
        let Some(body) = address.strip_prefix("0x") else {
            return false;
        };
        body.len() == 40 && hex::decode(body).is_ok()
    }

    pub fn network_info(chain_id: &str) -> NetworkInfo {
        let normalized = chain_id.trim().to_lowercase();
        let network_name = match normalized.as_str() {
            "0x1" => "Ethereum Mainnet",
            "0x3" => "Ropsten Testnet",
            "0x4" => "Rinkeby Testnet",
            "0x5" => "Goerli Testnet",
            "0x2a" => "Kovan Testnet",
            "0x89" => "Polygon Mainnet",
            "0x13881" => "Polygon Mumbai Testnet",
            _ => "Unknown Network",
        };

        NetworkInfo {
            chain_id: normalized,
            network_name: network_name.to_string(),
        }
    }
}

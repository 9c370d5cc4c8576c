//! JSON-RPC shapes exchanged with the provider.

use crate::Error;
use alloy_primitives::{Address, Bytes, B256, U256};
use mini_sdk::{constants::ChainId, router::SwapTransaction, submitter::TransactionReceipt};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    /// Hex quantity, `0x`-prefixed.
    pub value: String,
}

impl TransactionRequest {
    pub fn new(from: Address, tx: &SwapTransaction) -> Self {
        Self {
            from,
            to: tx.to,
            data: tx.data.clone(),
            value: to_quantity(tx.value),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub to: Address,
    pub data: Bytes,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RpcReceipt {
    pub transaction_hash: B256,
    pub block_number: Option<String>,
    /// `0x1` on success, `0x0` when reverted.
    pub status: Option<String>,
}

impl TryFrom<RpcReceipt> for TransactionReceipt {
    type Error = Error;

    fn try_from(receipt: RpcReceipt) -> Result<Self, Self::Error> {
        let block_number = receipt
            .block_number
            .as_deref()
            .map(parse_quantity)
            .transpose()?
            .map(|number| number.to::<u64>());
        let status = receipt
            .status
            .as_deref()
            .map(parse_quantity)
            .transpose()?;

        Ok(TransactionReceipt {
            transaction_hash: receipt.transaction_hash,
            block_number,
            success: status == Some(U256::from(1u8)),
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// Parameters of `wallet_addEthereumChain`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParameter {
    pub chain_id: String,
    pub chain_name: &'static str,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<&'static str>,
    pub block_explorer_urls: Vec<&'static str>,
}

impl From<ChainId> for AddChainParameter {
    fn from(chain: ChainId) -> Self {
        Self {
            chain_id: chain.hex_id(),
            chain_name: chain.name(),
            native_currency: NativeCurrency {
                name: "Ether",
                symbol: "ETH",
                decimals: 18,
            },
            rpc_urls: vec![chain.rpc_url()],
            block_explorer_urls: vec![chain.explorer_url()],
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwitchChainParameter {
    pub chain_id: String,
}

pub fn to_quantity(value: U256) -> String {
    format!("0x{value:x}")
}

pub fn parse_quantity(quantity: &str) -> Result<U256, Error> {
    let digits = quantity
        .strip_prefix("0x")
        .or_else(|| quantity.strip_prefix("0X"))
        .ok_or_else(|| Error::Serialization(format!("'{quantity}' is not a hex quantity")))?;

    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16)
        .map_err(|error| Error::Serialization(format!("'{quantity}': {error}")))
}

pub fn parse_chain_id(quantity: &str) -> Result<u64, Error> {
    let chain_id = parse_quantity(quantity)?;
    u64::try_from(chain_id).map_err(|_| Error::Serialization(format!("bad chain id {quantity}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use serde_json::json;

    #[test]
    fn parses_a_successful_receipt() {
        let raw = json!({
            "transactionHash": "0xabababababababababababababababababababababababababababababababab",
            "blockNumber": "0x1b4",
            "status": "0x1",
            "gasUsed": "0x5208"
        });
        let receipt: RpcReceipt = serde_json::from_value(raw).unwrap();
        let receipt = TransactionReceipt::try_from(receipt).unwrap();

        assert_eq!(receipt.transaction_hash, B256::repeat_byte(0xab));
        assert_eq!(receipt.block_number, Some(436));
        assert!(receipt.success);
    }

    #[test]
    fn reverted_receipt_is_not_successful() {
        let raw = json!({
            "transactionHash": "0xabababababababababababababababababababababababababababababababab",
            "blockNumber": "0x10",
            "status": "0x0"
        });
        let receipt: RpcReceipt = serde_json::from_value(raw).unwrap();
        assert!(!TransactionReceipt::try_from(receipt).unwrap().success);
    }

    #[test]
    fn transaction_request_uses_hex_quantities() {
        let tx = SwapTransaction {
            to: address!("2626664c2603336E57B271c5C0b26F421741e481"),
            data: Bytes::from_static(&[0x04, 0xe4, 0x5a, 0xaf]),
            value: U256::from(10_000_000_000_000_000u128),
        };
        let from = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
        let request = serde_json::to_value(TransactionRequest::new(from, &tx)).unwrap();

        assert_eq!(request["value"], "0x2386f26fc10000");
        assert_eq!(request["data"], "0x04e45aaf");
        assert_eq!(
            request["to"].as_str().unwrap().to_lowercase(),
            "0x2626664c2603336e57b271c5c0b26f421741e481"
        );
    }

    #[test]
    fn quantities() {
        assert_eq!(parse_quantity("0x0").unwrap(), U256::ZERO);
        assert_eq!(parse_quantity("0x").unwrap(), U256::ZERO);
        assert_eq!(parse_quantity("0xde0b6b3a7640000").unwrap(), U256::from(10u64.pow(18)));
        assert!(parse_quantity("12").is_err());
        assert_eq!(to_quantity(U256::ZERO), "0x0");
        assert_eq!(parse_chain_id("0x2105").unwrap(), 8453);
    }

    #[test]
    fn add_chain_parameter_for_base() {
        let param = serde_json::to_value(AddChainParameter::from(ChainId::Base)).unwrap();
        assert_eq!(param["chainId"], "0x2105");
        assert_eq!(param["chainName"], "Base");
        assert_eq!(param["nativeCurrency"]["decimals"], 18);
        assert_eq!(param["rpcUrls"][0], "https://mainnet.base.org");
    }
}

use alloy_primitives::{address, Address};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub address: Address,
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// Decimals of the chain's native currency (ETH).
pub const NATIVE_DECIMALS: u8 = 18;
pub const NATIVE_SYMBOL: &str = "ETH";

pub const MINI_TOKEN: Token = Token {
    address: address!("16a629C8F227c705893683dfDc0bD6f8F2717B07"),
    name: "MiniMaxClawd",
    symbol: "MINI",
    decimals: 18,
};

pub const MINI_TOTAL_SUPPLY: &str = "100B";

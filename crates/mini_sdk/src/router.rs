//! Calldata for the Uniswap V3 `SwapRouter02` and the ERC-20 balance query.
//!
//! The layout is owned by the deployed router. If the router is ever redeployed with a
//! different `ExactInputSingleParams` tuple, swaps built here will revert.

use crate::Error;
use alloy_primitives::{Address, Bytes, Uint, U256};
use alloy_sol_types::{sol, SolCall};
use serde::{Deserialize, Serialize};

sol! {
    interface ISwapRouter02 {
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }

        function exactInputSingle(ExactInputSingleParams calldata params)
            external payable returns (uint256 amountOut);
    }

    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
    }
}

pub use ISwapRouter02::ExactInputSingleParams;

/// A transaction ready to be handed to the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapTransaction {
    pub to: Address,
    pub data: Bytes,
    /// Native currency sent along, in smallest units.
    pub value: U256,
}

/// The router call arguments, in plain Rust types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactInputSingle {
    pub token_in: Address,
    pub token_out: Address,
    /// Pool fee in hundredths of a basis point.
    pub fee: u32,
    pub recipient: Address,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
}

impl From<ExactInputSingle> for ExactInputSingleParams {
    fn from(call: ExactInputSingle) -> Self {
        ExactInputSingleParams {
            tokenIn: call.token_in,
            tokenOut: call.token_out,
            fee: Uint::from(call.fee),
            recipient: call.recipient,
            amountIn: call.amount_in,
            amountOutMinimum: call.amount_out_minimum,
            // zero means no price limit
            sqrtPriceLimitX96: Uint::ZERO,
        }
    }
}

impl From<ExactInputSingleParams> for ExactInputSingle {
    fn from(params: ExactInputSingleParams) -> Self {
        ExactInputSingle {
            token_in: params.tokenIn,
            token_out: params.tokenOut,
            fee: params.fee.to::<u32>(),
            recipient: params.recipient,
            amount_in: params.amountIn,
            amount_out_minimum: params.amountOutMinimum,
        }
    }
}

pub fn encode_exact_input_single(call: ExactInputSingle) -> Bytes {
    ISwapRouter02::exactInputSingleCall {
        params: call.into(),
    }
    .abi_encode()
    .into()
}

pub fn decode_exact_input_single(data: &[u8]) -> Result<ExactInputSingle, Error> {
    let call = ISwapRouter02::exactInputSingleCall::abi_decode(data)?;
    Ok(call.params.into())
}

pub fn encode_balance_of(account: Address) -> Bytes {
    IERC20::balanceOfCall { account }.abi_encode().into()
}

pub fn decode_balance_of(data: &[u8]) -> Result<U256, Error> {
    IERC20::balanceOfCall::abi_decode_returns(data).map_err(Into::into)
}

/// Converts between the arithmetic integer type and the ABI integer type.
pub fn to_abi_uint(value: ethnum::U256) -> U256 {
    U256::from_be_bytes(value.to_be_bytes())
}

pub fn from_abi_uint(value: U256) -> ethnum::U256 {
    ethnum::U256::from_be_bytes(value.to_be_bytes::<32>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn sample() -> ExactInputSingle {
        ExactInputSingle {
            token_in: address!("4200000000000000000000000000000000000006"),
            token_out: address!("16a629C8F227c705893683dfDc0bD6f8F2717B07"),
            fee: 10_000,
            recipient: address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            amount_in: U256::from(10_000_000_000_000_000u128),
            amount_out_minimum: U256::from(18_000_000_000_000_000_000_000u128),
        }
    }

    #[test]
    fn calldata_starts_with_the_router_selector() {
        let data = encode_exact_input_single(sample());
        assert_eq!(&data[..4], &[0x04, 0xe4, 0x5a, 0xaf]);
        // selector + seven static words
        assert_eq!(data.len(), 4 + 7 * 32);
    }

    #[test]
    fn calldata_decodes_back_to_the_same_fields() {
        let call = sample();
        let decoded = decode_exact_input_single(&encode_exact_input_single(call)).unwrap();
        assert_eq!(decoded, call);

        let raw = ISwapRouter02::exactInputSingleCall::abi_decode(&encode_exact_input_single(call))
            .unwrap();
        assert_eq!(raw.params.sqrtPriceLimitX96, Uint::ZERO);
    }

    #[test]
    fn rejects_foreign_calldata() {
        let data = encode_balance_of(sample().recipient);
        assert!(matches!(
            decode_exact_input_single(&data),
            Err(Error::Serde(_))
        ));
    }

    #[test]
    fn balance_of_round_trip() {
        let data = encode_balance_of(sample().recipient);
        assert_eq!(&data[..4], &[0x70, 0xa0, 0x82, 0x31]);

        let mut word = [0u8; 32];
        word[31] = 42;
        assert_eq!(decode_balance_of(&word).unwrap(), U256::from(42u8));
    }

    #[test]
    fn integer_conversions_are_lossless() {
        let value = ethnum::U256::from_str_radix("123456789012345678901234567890", 10).unwrap();
        assert_eq!(from_abi_uint(to_abi_uint(value)), value);
        assert_eq!(to_abi_uint(ethnum::U256::MAX), U256::MAX);
    }
}

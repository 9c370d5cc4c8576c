use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use mini_sdk::{
    constants::ChainId,
    router::{decode_balance_of, encode_balance_of, SwapTransaction},
    submitter::{TransactionReceipt, TxHash, WalletClient},
};
use send_wrapper::SendWrapper;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    js_sys::{self, Function, Promise, JSON},
    wasm_bindgen::{closure::Closure, JsCast, JsValue},
};

mod error;
pub mod types;

pub use error::{Error, UNRECOGNIZED_CHAIN, USER_REJECTED_REQUEST};
use types::{
    parse_chain_id, parse_quantity, AddChainParameter, CallRequest, RpcReceipt,
    SwitchChainParameter, TransactionRequest,
};

/// The wallet injected at `window.ethereum`.
pub struct Ethereum {}

impl Ethereum {
    fn provider() -> Result<JsValue, Error> {
        let window = web_sys::window().ok_or(Error::WalletUnavailable)?;
        let ethereum = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum"))
            .map_err(|_| Error::WalletUnavailable)?;

        if ethereum.is_undefined() || ethereum.is_null() {
            Err(Error::WalletUnavailable)
        } else {
            Ok(ethereum)
        }
    }

    fn method(provider: &JsValue, name: &str) -> Result<Function, Error> {
        js_sys::Reflect::get(provider, &JsValue::from_str(name))?
            .dyn_into::<Function>()
            .map_err(|_| Error::generic(format!("provider has no `{name}` method")))
    }

    /// Sends a JSON-RPC request through `ethereum.request`.
    pub async fn request<T: DeserializeOwned>(method: &str, params: Value) -> Result<T, Error> {
        let provider = Self::provider()?;
        let request = Self::method(&provider, "request")?;

        let args = json!({ "method": method, "params": params }).to_string();
        let args = JSON::parse(&args)?;

        let promise = request.call1(&provider, &args)?.dyn_into::<Promise>()?;
        let result = JsFuture::from(promise).await?;

        let result = match JSON::stringify(&result) {
            Ok(text) => text.as_string().unwrap_or("null".to_string()),
            // `undefined` has no JSON form
            Err(_) => "null".to_string(),
        };

        Ok(serde_json::from_str::<T>(&result)?)
    }

    /// Prompts the user to connect, then makes sure the wallet is on `chain`.
    pub async fn connect(chain: ChainId) -> Result<Address, Error> {
        let account = Self::request_accounts()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::generic("wallet returned no accounts"))?;

        Self::switch_chain(chain).await?;

        Ok(account)
    }

    pub async fn request_accounts() -> Result<Vec<Address>, Error> {
        Self::request("eth_requestAccounts", json!([])).await
    }

    /// Accounts already authorized for this site. Never prompts.
    pub async fn accounts() -> Result<Vec<Address>, Error> {
        Self::request("eth_accounts", json!([])).await
    }

    pub async fn chain_id() -> Result<u64, Error> {
        let chain_id: String = Self::request("eth_chainId", json!([])).await?;
        parse_chain_id(&chain_id)
    }

    pub async fn switch_chain(chain: ChainId) -> Result<(), Error> {
        if Self::chain_id().await.ok() == Some(chain.id()) {
            return Ok(());
        }

        let switch = SwitchChainParameter {
            chain_id: chain.hex_id(),
        };

        match Self::request::<Value>("wallet_switchEthereumChain", params(switch)?).await {
            Ok(_) => Ok(()),
            Err(error) if error.code() == Some(UNRECOGNIZED_CHAIN) => {
                debug!("adding {} to the wallet", chain.name());
                let add = AddChainParameter::from(chain);
                Self::request::<Value>("wallet_addEthereumChain", params(add)?)
                    .await
                    .map(|_| ())
            }
            Err(error) => Err(error),
        }
    }

    pub async fn send_transaction(from: Address, tx: &SwapTransaction) -> Result<B256, Error> {
        let request = TransactionRequest::new(from, tx);
        debug!("{request:#?}");
        Self::request("eth_sendTransaction", params(request)?).await
    }

    pub async fn get_transaction_receipt(hash: B256) -> Result<Option<TransactionReceipt>, Error> {
        Self::request::<Option<RpcReceipt>>("eth_getTransactionReceipt", json!([hash]))
            .await?
            .map(TransactionReceipt::try_from)
            .transpose()
    }

    /// Native balance in smallest units.
    pub async fn get_balance(account: Address) -> Result<U256, Error> {
        let balance: String = Self::request("eth_getBalance", json!([account, "latest"])).await?;
        parse_quantity(&balance)
    }

    /// ERC-20 `balanceOf` through `eth_call`.
    pub async fn token_balance(token: Address, account: Address) -> Result<U256, Error> {
        let call = CallRequest {
            to: token,
            data: encode_balance_of(account),
        };
        let data: alloy_primitives::Bytes =
            Self::request("eth_call", json!([serde_json::to_value(call)?, "latest"])).await?;

        decode_balance_of(&data).map_err(Error::generic)
    }

    pub fn on_accounts_changed(
        handler: impl Fn(Option<Address>) + 'static,
    ) -> Result<Listener, Error> {
        Listener::new("accountsChanged", move |value| {
            let accounts = serde_wasm_bindgen::from_value::<Vec<String>>(value)
                .unwrap_or_default();
            let account = accounts.first().and_then(|account| account.parse().ok());
            handler(account)
        })
    }

    pub fn on_chain_changed(handler: impl Fn(Option<u64>) + 'static) -> Result<Listener, Error> {
        Listener::new("chainChanged", move |value| {
            let chain_id = value
                .as_string()
                .and_then(|chain_id| parse_chain_id(&chain_id).ok());
            handler(chain_id)
        })
    }
}

fn params(param: impl Serialize) -> Result<Value, Error> {
    Ok(json!([serde_json::to_value(param)?]))
}

/// A subscription to a provider event. Call [`Listener::remove`] to unsubscribe.
pub struct Listener {
    event: &'static str,
    callback: SendWrapper<Closure<dyn Fn(JsValue)>>,
}

impl Listener {
    fn new(event: &'static str, handler: impl Fn(JsValue) + 'static) -> Result<Self, Error> {
        let provider = Ethereum::provider()?;
        let on = Ethereum::method(&provider, "on")?;

        let callback = Closure::<dyn Fn(JsValue)>::new(handler);
        on.call2(
            &provider,
            &JsValue::from_str(event),
            callback.as_ref().unchecked_ref(),
        )?;

        Ok(Self {
            event,
            callback: SendWrapper::new(callback),
        })
    }

    pub fn remove(self) {
        let removed = Ethereum::provider().and_then(|provider| {
            let remove_listener = Ethereum::method(&provider, "removeListener")?;
            remove_listener.call2(
                &provider,
                &JsValue::from_str(self.event),
                self.callback.as_ref().unchecked_ref(),
            )?;
            Ok(())
        });
        if let Err(error) = removed {
            warn!("failed to remove `{}` listener: {error}", self.event);
        }
    }
}

/// Resolves after `duration`, on the browser's timer.
pub async fn sleep(duration: Duration) {
    let promise = Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                &resolve,
                duration.as_millis() as i32,
            );
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// [`WalletClient`] backed by the injected provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct InjectedWallet;

#[async_trait(?Send)]
impl WalletClient for InjectedWallet {
    async fn send_transaction(
        &self,
        from: Address,
        tx: &SwapTransaction,
    ) -> Result<TxHash, mini_sdk::Error> {
        Ethereum::send_transaction(from, tx)
            .await
            .map_err(Into::into)
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, mini_sdk::Error> {
        Ethereum::get_transaction_receipt(hash)
            .await
            .map_err(Into::into)
    }
}

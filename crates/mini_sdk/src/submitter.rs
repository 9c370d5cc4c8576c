use crate::{router::SwapTransaction, Error};
use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{future::Future, time::Duration};
use tracing::{debug, error, info, warn};

pub type TxHash = B256;

/// How long a terminal state stays on screen before the panel resets.
pub const DISPLAY_WINDOW: Duration = Duration::from_millis(3_500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    /// `status == 0x1`
    pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    Cancelled,
    Reverted,
    Unknown,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Cancelled => f.write_str("cancelled"),
            FailureReason::Reverted => f.write_str("reverted"),
            FailureReason::Unknown => f.write_str("unknown"),
        }
    }
}

impl From<&Error> for FailureReason {
    fn from(error: &Error) -> Self {
        match error {
            Error::UserRejected => FailureReason::Cancelled,
            _ => FailureReason::Unknown,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionState {
    #[default]
    Idle,
    /// Waiting on the wallet (no hash yet) or on inclusion.
    Pending(Option<TxHash>),
    Confirmed(TxHash),
    Failed(FailureReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionEvent {
    Submitted,
    Broadcast(TxHash),
    Included(TransactionReceipt),
    Rejected,
    Errored,
    DisplayElapsed,
}

impl TransactionState {
    /// Applies `event`. Events that make no sense in the current state are ignored.
    pub fn on(self, event: TransactionEvent) -> Self {
        use TransactionEvent::*;
        use TransactionState::*;

        match (self, event) {
            (Idle, Submitted) => Pending(None),
            (Pending(_), Broadcast(hash)) => Pending(Some(hash)),
            (Pending(_), Included(receipt)) if receipt.success => {
                Confirmed(receipt.transaction_hash)
            }
            (Pending(_), Included(_)) => Failed(FailureReason::Reverted),
            (Pending(_), Rejected) => Failed(FailureReason::Cancelled),
            (Pending(_), Errored) => Failed(FailureReason::Unknown),
            (Confirmed(_) | Failed(_), DisplayElapsed) => Idle,
            (state, _) => state,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TransactionState::Pending(_))
    }

    /// The amount field is emptied when a confirmed swap leaves the screen. A failed one
    /// keeps what the user typed.
    pub fn clears_input(&self) -> bool {
        matches!(self, TransactionState::Confirmed(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionState::Confirmed(_) | TransactionState::Failed(_)
        )
    }
}

/// The external wallet, as far as swaps are concerned.
#[async_trait(?Send)]
pub trait WalletClient {
    /// Asks the wallet to sign and broadcast. Resolves with the transaction hash.
    async fn send_transaction(&self, from: Address, tx: &SwapTransaction)
        -> Result<TxHash, Error>;

    /// `None` until the transaction is included.
    async fn transaction_receipt(&self, hash: TxHash)
        -> Result<Option<TransactionReceipt>, Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionHandle {
    pub hash: TxHash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptPolling {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for ReceiptPolling {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 90,
        }
    }
}

pub async fn submit<W: WalletClient + ?Sized>(
    wallet: &W,
    from: Address,
    tx: &SwapTransaction,
) -> Result<TransactionHandle, Error> {
    wallet
        .send_transaction(from, tx)
        .await
        .map(|hash| TransactionHandle { hash })
        .inspect(|handle| info!("transaction broadcast: {}", handle.hash))
        .inspect_err(|error| error!("{error}"))
}

/// Looks up the receipt once. Lookup errors leave the transaction pending.
pub async fn poll_state<W: WalletClient + ?Sized>(
    wallet: &W,
    handle: TransactionHandle,
) -> TransactionState {
    let pending = TransactionState::Pending(Some(handle.hash));

    match wallet.transaction_receipt(handle.hash).await {
        Ok(Some(receipt)) => pending.on(TransactionEvent::Included(receipt)),
        Ok(None) => pending,
        Err(error) => {
            warn!("receipt lookup failed: {error}");
            pending
        }
    }
}

/// Polls until the transaction reaches a terminal state, giving up as
/// `Failed(Unknown)` after `polling.max_attempts`.
pub async fn watch<W, S, F>(
    wallet: &W,
    handle: TransactionHandle,
    polling: ReceiptPolling,
    sleep: S,
) -> TransactionState
where
    W: WalletClient + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    for attempt in 1..=polling.max_attempts {
        let state = poll_state(wallet, handle).await;
        if state.is_terminal() {
            debug!("{} settled after {attempt} polls: {state:?}", handle.hash);
            return state;
        }
        if attempt < polling.max_attempts {
            sleep(polling.interval).await;
        }
    }

    warn!("no receipt for {} after {} polls", handle.hash, polling.max_attempts);
    TransactionState::Failed(FailureReason::Unknown)
}

/// Submits `tx` and follows it to a terminal state, reporting every state on the way
/// through `on_state`. Resolves with the hash once confirmed.
pub async fn execute<W, S, F>(
    wallet: &W,
    from: Address,
    tx: &SwapTransaction,
    polling: ReceiptPolling,
    sleep: S,
    mut on_state: impl FnMut(TransactionState),
) -> Result<TxHash, Error>
where
    W: WalletClient + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    let state = TransactionState::Idle.on(TransactionEvent::Submitted);
    on_state(state);

    let handle = match submit(wallet, from, tx).await {
        Ok(handle) => handle,
        Err(error) => {
            let event = match error {
                Error::UserRejected => TransactionEvent::Rejected,
                _ => TransactionEvent::Errored,
            };
            on_state(state.on(event));
            return Err(error);
        }
    };

    on_state(state.on(TransactionEvent::Broadcast(handle.hash)));

    let state = watch(wallet, handle, polling, sleep).await;
    on_state(state);

    match state {
        TransactionState::Confirmed(hash) => Ok(hash),
        TransactionState::Failed(reason) => Err(Error::network(reason)),
        _ => Err(Error::network(FailureReason::Unknown)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Bytes, U256};
    use futures::executor::block_on;
    use std::{
        cell::{Cell, RefCell},
        collections::VecDeque,
    };

    const FROM: Address = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");

    fn hash() -> TxHash {
        B256::repeat_byte(0xab)
    }

    fn tx() -> SwapTransaction {
        SwapTransaction {
            to: address!("2626664c2603336E57B271c5C0b26F421741e481"),
            data: Bytes::from_static(&[0x04, 0xe4, 0x5a, 0xaf]),
            value: U256::from(1u8),
        }
    }

    fn receipt(success: bool) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: hash(),
            block_number: Some(1),
            success,
        }
    }

    struct MockWallet {
        send: Result<TxHash, Error>,
        receipts: RefCell<VecDeque<Result<Option<TransactionReceipt>, Error>>>,
        sent: RefCell<Vec<(Address, SwapTransaction)>>,
    }

    impl MockWallet {
        fn new(
            send: Result<TxHash, Error>,
            receipts: Vec<Result<Option<TransactionReceipt>, Error>>,
        ) -> Self {
            Self {
                send,
                receipts: RefCell::new(receipts.into()),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl WalletClient for MockWallet {
        async fn send_transaction(
            &self,
            from: Address,
            tx: &SwapTransaction,
        ) -> Result<TxHash, Error> {
            self.sent.borrow_mut().push((from, tx.clone()));
            self.send.clone()
        }

        async fn transaction_receipt(
            &self,
            _hash: TxHash,
        ) -> Result<Option<TransactionReceipt>, Error> {
            self.receipts.borrow_mut().pop_front().unwrap_or(Ok(None))
        }
    }

    fn polling(max_attempts: u32) -> ReceiptPolling {
        ReceiptPolling {
            interval: Duration::from_millis(1),
            max_attempts,
        }
    }

    fn run(wallet: &MockWallet, max_attempts: u32) -> (Result<TxHash, Error>, Vec<TransactionState>) {
        let mut states = Vec::new();
        let result = block_on(execute(
            wallet,
            FROM,
            &tx(),
            polling(max_attempts),
            |_| async {},
            |state| states.push(state),
        ));
        (result, states)
    }

    #[test]
    fn state_machine_follows_the_happy_path() {
        let state = TransactionState::Idle
            .on(TransactionEvent::Submitted)
            .on(TransactionEvent::Broadcast(hash()));
        assert_eq!(state, TransactionState::Pending(Some(hash())));

        let state = state.on(TransactionEvent::Included(receipt(true)));
        assert_eq!(state, TransactionState::Confirmed(hash()));
        assert!(state.is_terminal());

        assert_eq!(state.on(TransactionEvent::DisplayElapsed), TransactionState::Idle);
    }

    #[test]
    fn state_machine_ignores_out_of_order_events() {
        assert_eq!(
            TransactionState::Idle.on(TransactionEvent::Included(receipt(true))),
            TransactionState::Idle
        );
        assert_eq!(
            TransactionState::Idle.on(TransactionEvent::DisplayElapsed),
            TransactionState::Idle
        );
        let pending = TransactionState::Pending(None);
        assert_eq!(pending.on(TransactionEvent::DisplayElapsed), pending);
        let failed = TransactionState::Failed(FailureReason::Cancelled);
        assert_eq!(failed.on(TransactionEvent::Submitted), failed);
    }

    #[test]
    fn confirmed_swap_reports_pending_then_confirmed() {
        let wallet = MockWallet::new(Ok(hash()), vec![Ok(None), Ok(Some(receipt(true)))]);
        let (result, states) = run(&wallet, 10);

        assert_eq!(result, Ok(hash()));
        assert_eq!(
            states,
            vec![
                TransactionState::Pending(None),
                TransactionState::Pending(Some(hash())),
                TransactionState::Confirmed(hash()),
            ]
        );
        assert_eq!(wallet.sent.borrow().as_slice(), &[(FROM, tx())]);
        assert!(states.last().is_some_and(TransactionState::clears_input));
    }

    #[test]
    fn user_rejection_fails_as_cancelled_and_resets_to_idle() {
        let wallet = MockWallet::new(Err(Error::UserRejected), vec![]);
        let (result, states) = run(&wallet, 10);

        assert_eq!(result, Err(Error::UserRejected));
        assert_eq!(
            states,
            vec![
                TransactionState::Pending(None),
                TransactionState::Failed(FailureReason::Cancelled),
            ]
        );

        let last = states.last().copied().unwrap();
        assert!(matches!(last, TransactionState::Failed(reason) if reason.to_string() == "cancelled"));
        assert!(!last.clears_input());
        assert_eq!(last.on(TransactionEvent::DisplayElapsed), TransactionState::Idle);
    }

    #[test]
    fn broadcast_error_fails_as_unknown() {
        let wallet = MockWallet::new(Err(Error::network("nonce too low")), vec![]);
        let (result, states) = run(&wallet, 10);

        assert_eq!(result, Err(Error::network("nonce too low")));
        assert_eq!(
            states.last(),
            Some(&TransactionState::Failed(FailureReason::Unknown))
        );
    }

    #[test]
    fn reverted_receipt_fails_as_reverted() {
        let wallet = MockWallet::new(Ok(hash()), vec![Ok(Some(receipt(false)))]);
        let (result, states) = run(&wallet, 10);

        assert_eq!(result, Err(Error::network("reverted")));
        assert_eq!(
            states.last(),
            Some(&TransactionState::Failed(FailureReason::Reverted))
        );
    }

    #[test]
    fn lookup_errors_keep_polling() {
        let wallet = MockWallet::new(
            Ok(hash()),
            vec![
                Err(Error::generic("rpc hiccup")),
                Ok(None),
                Ok(Some(receipt(true))),
            ],
        );
        let (result, _) = run(&wallet, 10);
        assert_eq!(result, Ok(hash()));
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let wallet = MockWallet::new(Ok(hash()), vec![]);
        let state = block_on(watch(
            &wallet,
            TransactionHandle { hash: hash() },
            polling(3),
            |_| async {},
        ));
        assert_eq!(state, TransactionState::Failed(FailureReason::Unknown));
        assert!(wallet.receipts.borrow().is_empty());
    }

    #[test]
    fn no_sleep_after_the_last_attempt() {
        let wallet = MockWallet::new(Ok(hash()), vec![]);
        let sleeps = Cell::new(0u32);
        let state = block_on(watch(
            &wallet,
            TransactionHandle { hash: hash() },
            polling(4),
            |_| {
                sleeps.set(sleeps.get() + 1);
                async {}
            },
        ));
        assert_eq!(state, TransactionState::Failed(FailureReason::Unknown));
        assert_eq!(sleeps.get(), 3);
    }

    #[test]
    fn failure_reason_from_error() {
        assert_eq!(FailureReason::from(&Error::UserRejected), FailureReason::Cancelled);
        assert_eq!(
            FailureReason::from(&Error::QuoteRouteNotFound),
            FailureReason::Unknown
        );
    }
}

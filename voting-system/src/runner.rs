use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use sha2::Digest;
use sov_modules_api::{Context, Module, Storage, WorkingSet};
use sov_voting::{CallMessage, Event};
use tracing::{debug, error, info};

use crate::VotingSystem;

/// A call to the voting module together with its sender.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct Transaction<C: Context> {
    /// Address the call is executed on behalf of.
    pub sender: C::Address,
    /// The call itself.
    pub call: CallMessage<C>,
}

impl<C: Context> Transaction<C> {
    /// SHA-256 of the borsh encoding of the transaction.
    pub fn hash(&self) -> [u8; 32] {
        let encoded = self
            .try_to_vec()
            .expect("Serializing to a vector is infallible");
        C::Hasher::digest(&encoded).into()
    }
}

/// Outcome of a single transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxEffect {
    /// The call was rejected and none of its changes were kept.
    Reverted {
        /// Why the call was rejected.
        reason: String,
    },
    /// The call was applied.
    Successful,
}

/// Receipt of a single transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxReceipt<C: Context> {
    /// Hash of the transaction.
    #[serde(with = "hex::serde")]
    pub tx_hash: [u8; 32],
    /// Sender of the transaction.
    pub sender: C::Address,
    /// Events emitted by the call. Empty when it was reverted.
    pub events: Vec<Event<C>>,
    /// Whether the call was applied.
    pub effect: TxEffect,
}

/// Receipts of a batch, and the state root once the batch is committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReceipt<C: Context> {
    /// One receipt per transaction, in submission order.
    pub tx_receipts: Vec<TxReceipt<C>>,
    /// State root after the batch.
    #[serde(with = "hex::serde")]
    pub state_root: [u8; 32],
}

impl<C: Context> VotingSystem<C> {
    /// Applies `txs` in order and commits the batch.
    ///
    /// Each transaction is atomic: a rejected call is reverted and recorded in its
    /// receipt, and the remaining transactions still run.
    pub fn apply_batch(&self, txs: Vec<Transaction<C>>) -> anyhow::Result<BatchReceipt<C>> {
        let mut working_set = WorkingSet::new(self.storage.clone());
        let mut tx_receipts = Vec::with_capacity(txs.len());

        for tx in txs {
            let tx_hash = tx.hash();
            let context = C::new(tx.sender.clone());

            let tx_result = self.voting.call(tx.call, &context, &mut working_set);
            let effect = match tx_result {
                Ok(_) => TxEffect::Successful,
                Err(e) => {
                    error!("Tx 0x{} was reverted error: {}", hex::encode(tx_hash), e);
                    working_set = working_set.revert().to_revertable();
                    TxEffect::Reverted {
                        reason: e.to_string(),
                    }
                }
            };
            debug!("Tx 0x{} effect: {:?}", hex::encode(tx_hash), effect);

            let events = working_set
                .take_events()
                .iter()
                .map(|event| event.decode_value::<Event<C>>())
                .collect::<Result<Vec<_>, _>>()?;

            tx_receipts.push(TxReceipt {
                tx_hash,
                sender: tx.sender,
                events,
                effect,
            });
            // We commit after events have been extracted into receipt.
            working_set = working_set.checkpoint().to_revertable();
        }

        let state_root = self
            .storage
            .validate_and_commit(working_set.checkpoint().freeze())?;

        info!(
            txs = tx_receipts.len(),
            reverted = tx_receipts
                .iter()
                .filter(|receipt| receipt.effect != TxEffect::Successful)
                .count(),
            state_root = %hex::encode(state_root),
            "Batch committed"
        );

        Ok(BatchReceipt {
            tx_receipts,
            state_root,
        })
    }
}

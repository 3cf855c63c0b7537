//! Utilities for sending and waiting on transactions

use std::time::Duration;

use alloy::{
    contract::{CallBuilder, CallDecoder, Error as ContractError},
    network::Ethereum,
    providers::Provider,
    rpc::{json_rpc::ErrorPayload, types::TransactionReceipt},
    transports::TransportError,
};
use alloy_sol_types::decode_revert_reason;
use tracing::{error, info};

use crate::{constants::REVERT_MESSAGE_MARKER, errors::ScriptError};

/// Send a transaction and block until it is confirmed
///
/// Errors are split into [`ScriptError::TransactionReverted`] when the node or the
/// receipt reports an execution revert, and [`ScriptError::TransactionSubmission`]
/// for everything else (signing, transport, timeouts). Both carry the
/// `description` so that a failure can be traced back to the step that issued it.
///
/// Filling and broadcasting the transaction, and waiting for its receipt, are
/// each bounded by `timeout`.
pub async fn send_tx<P: Provider<Ethereum>, D: CallDecoder>(
    tx: CallBuilder<(), P, D, Ethereum>,
    description: &str,
    confirmations: u64,
    timeout: Duration,
) -> Result<TransactionReceipt, ScriptError> {
    let pending_tx = match tokio::time::timeout(timeout, tx.send()).await {
        Ok(Ok(pending_tx)) => pending_tx,
        Ok(Err(err)) => {
            let err = classify_send_error(err, description);
            error!(description, "{err}");
            return Err(err);
        }
        Err(_) => {
            let err = ScriptError::TransactionSubmission(format!(
                "{description}: not broadcast within {timeout:?}"
            ));
            error!(description, "{err}");
            return Err(err);
        }
    };

    let tx_hash = *pending_tx.tx_hash();
    info!(description, %tx_hash, "transaction submitted, awaiting confirmation");

    let receipt = pending_tx
        .with_required_confirmations(confirmations)
        .with_timeout(Some(timeout))
        .get_receipt()
        .await
        .map_err(|e| {
            let err = ScriptError::TransactionSubmission(format!(
                "{description}: tx {tx_hash} not confirmed: {e}"
            ));
            error!(description, %tx_hash, "{err}");
            err
        })?;

    if !receipt.status() {
        let err = ScriptError::TransactionReverted(format!(
            "{description}: tx {tx_hash} reverted in block {:?}",
            receipt.block_number
        ));
        error!(description, %tx_hash, "{err}");
        return Err(err);
    }

    info!(
        description,
        %tx_hash,
        block_number = receipt.block_number,
        gas_used = receipt.gas_used,
        "transaction confirmed"
    );
    Ok(receipt)
}

/// Map an error raised while sending a transaction onto the script's error taxonomy
fn classify_send_error(err: ContractError, description: &str) -> ScriptError {
    if let ContractError::TransportError(TransportError::ErrorResp(payload)) = &err {
        if let Some(reason) = revert_reason(payload) {
            return ScriptError::TransactionReverted(format!("{description}: {reason}"));
        }
    }

    ScriptError::TransactionSubmission(format!("{description}: {err}"))
}

/// Extract a revert reason from a JSON-RPC error response, if the response
/// describes an execution revert
///
/// Nodes reject reverting transactions at gas estimation time, either attaching
/// the revert data or only flagging the revert in the error message.
pub fn revert_reason(payload: &ErrorPayload) -> Option<String> {
    if let Some(data) = payload.as_revert_data() {
        let reason = decode_revert_reason(&data)
            .unwrap_or_else(|| format!("{} (data = {data})", payload.message));
        return Some(reason);
    }

    payload
        .message
        .to_lowercase()
        .contains(REVERT_MESSAGE_MARKER)
        .then(|| payload.message.to_string())
}

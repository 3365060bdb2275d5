//! The network client used to submit and confirm deployment transactions

use std::str::FromStr;

use alloy::{
    contract::RawCallBuilder,
    network::Ethereum,
    primitives::{Address, TxHash},
    providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder},
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use tracing::{debug, info};

use crate::{constants::NUM_DEPLOY_CONFIRMATIONS, errors::ScriptError, types::Blueprint};

/// The provider type used to deploy contracts
pub type Wallet = DynProvider<Ethereum>;

/// A client capable of signing and submitting deployment transactions
#[allow(async_fn_in_trait)]
pub trait DeploymentClient {
    /// The handle on a submitted, not yet confirmed, deployment
    type Pending: PendingDeployment;

    /// Submit a transaction deploying the blueprint with no constructor
    /// arguments
    async fn submit(&self, blueprint: &Blueprint) -> Result<Self::Pending, ScriptError>;
}

/// A deployment transaction that has been submitted to the network
#[allow(async_fn_in_trait)]
pub trait PendingDeployment {
    /// The hash of the deployment transaction
    fn tx_hash(&self) -> TxHash;

    /// Wait for the deployment transaction to be confirmed, returning the
    /// address of the new contract
    async fn confirm(self) -> Result<Address, ScriptError>;
}

/// Deploys contracts through a JSON-RPC node, signing with a local key
pub struct RpcDeploymentClient {
    /// The signing provider
    provider: Wallet,
}

impl RpcDeploymentClient {
    /// Wrap an already configured provider
    pub fn new(provider: Wallet) -> Self {
        Self { provider }
    }
}

/// A deployment transaction pending in the node's mempool
pub struct PendingRpcDeployment {
    /// The pending transaction, as returned by the node
    inner: PendingTransactionBuilder<Ethereum>,
}

impl DeploymentClient for RpcDeploymentClient {
    type Pending = PendingRpcDeployment;

    async fn submit(&self, blueprint: &Blueprint) -> Result<Self::Pending, ScriptError> {
        let pending = RawCallBuilder::new_raw_deploy(&self.provider, blueprint.bytecode.clone())
            .send()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        info!(
            "Submitted deployment of {} in tx {:#x}",
            blueprint.contract_name,
            pending.tx_hash()
        );
        Ok(PendingRpcDeployment { inner: pending })
    }
}

impl PendingDeployment for PendingRpcDeployment {
    fn tx_hash(&self) -> TxHash {
        *self.inner.tx_hash()
    }

    async fn confirm(self) -> Result<Address, ScriptError> {
        let receipt = self
            .inner
            .with_required_confirmations(NUM_DEPLOY_CONFIRMATIONS)
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        debug!(
            "Deployment tx {:#x} mined in block {:?}",
            receipt.transaction_hash, receipt.block_number
        );
        deployed_address(&receipt)
    }
}

/// Extract the address of the created contract from a deployment receipt
fn deployed_address(receipt: &TransactionReceipt) -> Result<Address, ScriptError> {
    if !receipt.status() {
        return Err(ScriptError::TransactionReverted(format!(
            "{:#x}",
            receipt.transaction_hash
        )));
    }

    receipt.contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment(format!(
            "receipt for tx {:#x} has no contract address",
            receipt.transaction_hash
        ))
    })
}

/// Sets up the client with which to deploy contracts, from the deployer's
/// private key and the node's RPC url.
///
/// The chain id is fetched eagerly so that an unreachable node is reported
/// before anything is submitted.
pub async fn setup_client(
    priv_key: &str,
    rpc_url: &str,
) -> Result<RpcDeploymentClient, ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let deployer = signer.address();
    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);
    let provider = DynProvider::new(provider);

    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    info!("Deploying from {} on chain {}", deployer, chain_id);

    Ok(RpcDeploymentClient::new(provider))
}

#[cfg(test)]
mod tests {
    use alloy::{
        primitives::{address, b256, Bytes},
        transports::mock::Asserter,
    };
    use serde_json::{json, Value};

    use super::*;

    /// The hash of the deployment transaction in the test receipts
    const TX_HASH: TxHash =
        b256!("0x2f1cf6a8e1d0a0b3b5e4d2c7f5e6a9b8c7d6e5f4a3b2c1d0e9f8a7b6c5d4e3f2");

    /// A receipt for a successful deployment, as returned by a devnet node
    fn receipt_json() -> Value {
        json!({
            "type": "0x2",
            "status": "0x1",
            "cumulativeGasUsed": "0xd2f0",
            "logs": [],
            "logsBloom": format!("0x{}", "0".repeat(512)),
            "transactionHash": TX_HASH,
            "transactionIndex": "0x0",
            "blockHash": "0x5f2c1bbf0b8e9c6dbb1e4f2fbd3c8a0e9d7b6a5c4f3e2d1c0b9a8f7e6d5c4b3a",
            "blockNumber": "0x1",
            "gasUsed": "0xd2f0",
            "effectiveGasPrice": "0x3b9aca00",
            "from": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
            "to": null,
            "contractAddress": "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        })
    }

    /// Parse a receipt from its JSON-RPC representation
    fn parse_receipt(value: Value) -> TransactionReceipt {
        serde_json::from_value(value).unwrap()
    }

    /// A blueprint for a trivial contract
    fn blueprint() -> Blueprint {
        Blueprint {
            contract_name: "SoulMintIdentity".to_string(),
            source_name: "contracts/SoulMintIdentity.sol".to_string(),
            abi: Default::default(),
            bytecode: Bytes::from_static(&[0x60, 0x80, 0x60, 0x40, 0x52]),
        }
    }

    /// A client whose node answers from the given asserter.
    ///
    /// No fillers are installed, so submitting a deployment is exactly one
    /// `eth_sendTransaction` request.
    fn mocked_client(asserter: Asserter) -> RpcDeploymentClient {
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter);
        RpcDeploymentClient::new(DynProvider::new(provider))
    }

    #[test]
    fn test_deployed_address() {
        let receipt = parse_receipt(receipt_json());
        assert_eq!(
            deployed_address(&receipt).unwrap(),
            address!("0x5FbDB2315678afecb367f032d93F642f64180aa3")
        );
    }

    #[test]
    fn test_reverted_receipt() {
        let mut value = receipt_json();
        value["status"] = json!("0x0");
        let receipt = parse_receipt(value);

        match deployed_address(&receipt).unwrap_err() {
            ScriptError::TransactionReverted(tx) => assert_eq!(tx, format!("{TX_HASH:#x}")),
            err => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn test_receipt_without_contract_address() {
        let mut value = receipt_json();
        value["contractAddress"] = Value::Null;
        let receipt = parse_receipt(value);

        let err = deployed_address(&receipt).unwrap_err();
        assert!(matches!(err, ScriptError::ContractDeployment(_)));
    }

    #[tokio::test]
    async fn test_submit() {
        let asserter = Asserter::new();
        asserter.push_success(&TX_HASH);
        let client = mocked_client(asserter);

        let pending = client.submit(&blueprint()).await.unwrap();
        assert_eq!(pending.tx_hash(), TX_HASH);
    }

    #[tokio::test]
    async fn test_submit_rejected() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("insufficient funds for gas * price + value");
        let client = mocked_client(asserter);

        match client.submit(&blueprint()).await.err().unwrap() {
            ScriptError::ContractDeployment(msg) => assert!(msg.contains("insufficient funds")),
            err => panic!("unexpected error: {err}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_private_key() {
        let err = setup_client("0xnotakey", "http://localhost:8545")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ScriptError::ClientInitialization(_)));
    }

    #[tokio::test]
    async fn test_invalid_rpc_url() {
        let err = setup_client(crate::constants::DEFAULT_DEVNET_PKEY, "not a url")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ScriptError::ClientInitialization(_)));
    }
}

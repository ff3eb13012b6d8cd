use futures::{SinkExt, StreamExt};
use mockito::{Mock, Server};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::mpsc, task::JoinHandle};
use tokio_tungstenite::{accept_async, tungstenite::Message};

use chain_gateway::{
	models::{ChainFamily, NetworkConfig},
	utils::tests::builders::network::NetworkConfigBuilder,
};

pub const OPERATOR_A: &str = "cosmosvaloper1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc56kct20";
pub const ACCOUNT_A: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";
pub const OPERATOR_B: &str = "cosmosvaloper1qgpsgpgxquyqjzstpsxsurcszyfpx9q4lppuuv";
pub const ACCOUNT_B: &str = "cosmos1qgpsgpgxquyqjzstpsxsurcszyfpx9q4644fsl";

pub fn create_test_network(id: &str, family: ChainFamily, api_url: &str) -> NetworkConfig {
	NetworkConfigBuilder::new()
		.id(id)
		.family(family)
		.api_url(api_url)
		.build()
}

/// Registers a GET mock for an LCD path answering `body` wrapped in the height envelope
pub fn create_lcd_mock(server: &mut Server, path: &str, body: Value) -> Mock {
	server
		.mock("GET", path)
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(json!({"height": "0", "result": body}).to_string())
		.create()
}

pub fn cosmos_validator_payload(operator_address: &str, status: u64, website: &str) -> Value {
	json!({
		"operator_address": operator_address,
		"consensus_pubkey": "cosmosvalconspub1zcjduepq",
		"jailed": status != 2,
		"status": status,
		"tokens": "1500000000",
		"delegator_shares": "1500000000.000000000000000000",
		"description": {
			"moniker": "validator",
			"identity": "ABCDEF",
			"website": website,
			"details": "details"
		},
		"unbonding_height": "0",
		"unbonding_time": "1970-01-01T00:00:00Z",
		"commission": {
			"rate": "0.100000000000000000",
			"max_rate": "0.200000000000000000",
			"max_change_rate": "0.010000000000000000",
			"update_time": "2019-03-13T23:00:00Z"
		},
		"min_self_delegation": "1",
		"voting_power": "0.015",
		"signing_info": {
			"start_height": "0",
			"jailed_until": "1970-01-01T00:00:00Z",
			"missed_blocks_counter": "0"
		}
	})
}

pub fn gaia_validator_payload(operator_address: &str, status: u64) -> Value {
	json!({
		"operator_address": operator_address,
		"consensus_pubkey": "cosmosvalconspub1zcjduepq",
		"jailed": false,
		"status": status,
		"tokens": "100",
		"delegator_shares": "100.0000000000",
		"description": {
			"moniker": "gaia validator",
			"identity": "",
			"website": "[do-not-modify]",
			"details": ""
		},
		"bond_height": "12",
		"rate": "0.05",
		"max_rate": "0.10",
		"max_change_rate": "0.01",
		"update_time": "2019-01-01T00:00:00Z"
	})
}

pub fn cosmos_proposal_payload(id: &str, status: &str) -> Value {
	json!({
		"proposal_id": id,
		"proposal_content": {
			"type": "cosmos-sdk/TextProposal",
			"value": {
				"title": "Adjust the thing",
				"description": "A longer description"
			}
		},
		"proposal_status": status,
		"final_tally_result": {
			"yes": "3000000",
			"abstain": "1000000",
			"no": "500000",
			"no_with_veto": "500000"
		},
		"submit_time": "2019-03-01T00:00:00Z",
		"deposit_end_time": "2019-03-15T00:00:00Z",
		"total_deposit": [
			{"denom": "uatom", "amount": "512000000"},
			{"denom": "photino", "amount": "99"}
		],
		"voting_start_time": "2019-03-02T00:00:00Z",
		"voting_end_time": "2019-03-16T00:00:00Z"
	})
}

pub fn block_payload(chain_id: &str, height: u64) -> Value {
	json!({
		"block_meta": {
			"block_id": {"hash": format!("HASH{}", height)},
			"header": {
				"chain_id": chain_id,
				"height": height.to_string(),
				"time": "2019-12-11T16:11:34.327Z",
				"num_txs": "2",
				"proposer_address": "B00A6323737F321EB0B8D59C6FD497A14B60938A"
			}
		},
		"block": {}
	})
}

pub fn transaction_payload(hash: &str) -> Value {
	json!({
		"height": "42",
		"txhash": hash,
		"gas_wanted": "200000",
		"gas_used": "73000",
		"logs": [{"msg_index": 0, "success": true, "log": ""}],
		"timestamp": "2019-12-11T16:11:34Z",
		"tx": {
			"type": "auth/StdTx",
			"value": {
				"msg": [{
					"type": "cosmos-sdk/MsgSend",
					"value": {
						"from_address": ACCOUNT_A,
						"to_address": ACCOUNT_B,
						"amount": [{"denom": "uatom", "amount": "1000"}]
					}
				}],
				"fee": {"amount": [{"denom": "uatom", "amount": "5000"}], "gas": "200000"},
				"signatures": [{"signature": "c2lnbmF0dXJl"}],
				"memo": "sent from a test"
			}
		}
	})
}

/// One `tm.event='NewBlock'` notification as a Tendermint node sends it
pub fn new_block_event(height: u64) -> String {
	json!({
		"jsonrpc": "2.0",
		"id": "0#event",
		"result": {
			"query": "tm.event='NewBlock'",
			"data": {
				"type": "tendermint/event/NewBlock",
				"value": {"block": {"header": {"height": height.to_string()}}}
			}
		}
	})
	.to_string()
}

/// A websocket node accepting one subscriber
///
/// Answers the subscribe request, then forwards every height sent on the returned channel
/// as a NewBlock event. Dropping the sender closes the connection.
pub async fn spawn_local_node() -> (String, mpsc::UnboundedSender<u64>, JoinHandle<()>) {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let url = format!("ws://{}/websocket", listener.local_addr().unwrap());
	let (tx, mut rx) = mpsc::unbounded_channel::<u64>();

	let handle = tokio::spawn(async move {
		let (socket, _) = listener.accept().await.unwrap();
		let mut ws = accept_async(socket).await.unwrap();

		match ws.next().await {
			Some(Ok(Message::Text(text))) => {
				let request: Value = serde_json::from_str(&text).unwrap();
				assert_eq!(request["method"], "subscribe");
			}
			other => panic!("expected subscribe request, got {:?}", other),
		}
		ws.send(Message::Text(
			r#"{"jsonrpc":"2.0","id":"0","result":{}}"#.to_string(),
		))
		.await
		.unwrap();

		while let Some(height) = rx.recv().await {
			if ws.send(Message::Text(new_block_event(height))).await.is_err() {
				return;
			}
		}
		let _ = ws.close(None).await;
	});

	(url, tx, handle)
}

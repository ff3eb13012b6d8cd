use mockall::predicate;
use rust_decimal::Decimal;
use serde_json::json;

use chain_gateway::{
	models::{ChainFamily, ProposalStatus, TransactionGroup, ValidatorStatus, ValidatorStatusDetail},
	services::blockchain::{
		BlockChainError, ChainDataSource, CosmosClient, GaiaClient, TransportError,
	},
};

use crate::integration::mocks::{
	block_payload, cosmos_proposal_payload, cosmos_validator_payload, create_test_network,
	gaia_validator_payload, path_eq, transaction_payload, MockRestTransport, ACCOUNT_A, OPERATOR_A,
	OPERATOR_B,
};

fn cosmos_client(transport: MockRestTransport) -> CosmosClient<MockRestTransport> {
	let network = create_test_network("cosmoshub", ChainFamily::Cosmos, "https://lcd.test");
	CosmosClient::new_with_transport(transport, &network)
}

fn gaia_client(transport: MockRestTransport) -> GaiaClient<MockRestTransport> {
	let network = create_test_network("gaia-testnet", ChainFamily::Gaia, "https://lcd.test");
	GaiaClient::new_with_transport(transport, &network)
}

#[tokio::test]
async fn test_get_proposals_reduces_every_entry() {
	let mut transport = MockRestTransport::new();
	transport
		.expect_send_get_request()
		.with(predicate::eq("gov/proposals"))
		.times(1)
		.returning(|_| {
			Ok(json!([
				cosmos_proposal_payload("1", "Passed"),
				cosmos_proposal_payload("2", "VotingPeriod")
			]))
		});

	let proposals = cosmos_client(transport).get_proposals().await.unwrap();
	assert_eq!(proposals.len(), 2);

	let passed = &proposals[0];
	assert_eq!(passed.id, 1);
	assert_eq!(passed.network_id, "cosmoshub");
	assert_eq!(passed.status, ProposalStatus::Passed);
	assert_eq!(passed.proposal_type, "cosmos-sdk/TextProposal");
	assert_eq!(passed.title, "Adjust the thing");
	assert_eq!(passed.status_begin_time, "2019-03-16T00:00:00Z");
	assert_eq!(passed.status_end_time, "2019-03-16T00:00:00Z");
	// Only the uatom entry counts, in atom
	assert_eq!(passed.deposit, Decimal::new(512, 0));
	assert_eq!(passed.tally.yes, Decimal::new(3, 0));
	assert_eq!(passed.tally.total, Decimal::new(5, 0));
	assert_eq!(passed.tally.total_voted_percentage, Decimal::NEGATIVE_ONE);

	let voting = &proposals[1];
	assert_eq!(voting.status, ProposalStatus::VotingPeriod);
	assert_eq!(voting.status_begin_time, "2019-03-02T00:00:00Z");
	assert_eq!(voting.status_end_time, "2019-03-16T00:00:00Z");
}

#[tokio::test]
async fn test_get_proposal_with_unknown_status_is_malformed() {
	let mut transport = MockRestTransport::new();
	transport
		.expect_send_get_request()
		.with(predicate::eq("gov/proposals/7"))
		.returning(|_| Ok(cosmos_proposal_payload("7", "Vetoed")));

	let result = cosmos_client(transport).get_proposal(7).await;
	assert!(matches!(result, Err(BlockChainError::MalformedPayload(_))));
}

#[tokio::test]
async fn test_get_validators_non_list_payload_is_empty() {
	let mut transport = MockRestTransport::new();
	transport
		.expect_send_get_request()
		.with(predicate::eq("staking/validators"))
		.returning(|_| Ok(json!({"unexpected": true})));

	let validators = cosmos_client(transport).get_validators().await.unwrap();
	assert!(validators.is_empty());
}

#[tokio::test]
async fn test_null_fields_do_not_sink_the_list() {
	let mut transport = MockRestTransport::new();
	transport
		.expect_send_get_request()
		.with(predicate::eq("staking/validators"))
		.returning(|_| {
			let mut sparse = cosmos_validator_payload(OPERATOR_B, 1, "");
			sparse["commission"] = serde_json::Value::Null;
			sparse["description"] = serde_json::Value::Null;
			Ok(json!([cosmos_validator_payload(OPERATOR_A, 2, "example.com"), sparse]))
		});
	transport
		.expect_send_get_request()
		.with(predicate::eq("gov/proposals"))
		.returning(|_| {
			let mut sparse = cosmos_proposal_payload("3", "DepositPeriod");
			sparse["total_deposit"] = serde_json::Value::Null;
			Ok(json!([cosmos_proposal_payload("2", "VotingPeriod"), sparse]))
		});

	let client = cosmos_client(transport);
	let validators = client.get_validators().await.unwrap();
	assert_eq!(validators.len(), 2);
	assert_eq!(validators[1].commission, "");
	assert_eq!(validators[1].website, "");

	let proposals = client.get_proposals().await.unwrap();
	assert_eq!(proposals.len(), 2);
	assert_eq!(proposals[1].deposit, Decimal::ZERO);
}

#[tokio::test]
async fn test_get_validator_derives_canonical_fields() {
	let mut transport = MockRestTransport::new();
	transport
		.expect_send_get_request()
		.with(path_eq(format!("staking/validators/{}", OPERATOR_A)))
		.returning(|_| Ok(cosmos_validator_payload(OPERATOR_A, 2, "example.com")));

	let validator = cosmos_client(transport)
		.get_validator(OPERATOR_A)
		.await
		.unwrap();

	assert_eq!(validator.operator_address, OPERATOR_A);
	assert_eq!(validator.address, ACCOUNT_A);
	assert_eq!(validator.website, "https://example.com");
	assert_eq!(validator.status, ValidatorStatus::Active);
	assert_eq!(validator.status_detailed, ValidatorStatusDetail::Active);
	assert_eq!(validator.commission, "0.100000000000000000");
	assert_eq!(validator.update_time, "2019-03-13T23:00:00Z");
	assert_eq!(validator.start_height, Some(0));
}

#[tokio::test]
async fn test_gaia_validators_use_flat_commission_fields() {
	let mut transport = MockRestTransport::new();
	transport
		.expect_send_get_request()
		.with(predicate::eq("staking/validators"))
		.returning(|_| {
			Ok(json!([
				gaia_validator_payload(OPERATOR_A, 2),
				gaia_validator_payload(OPERATOR_B, 1)
			]))
		});

	let validators = gaia_client(transport).get_validators().await.unwrap();
	assert_eq!(validators.len(), 2);
	assert_eq!(validators[0].network_id, "gaia-testnet");
	assert_eq!(validators[0].commission, "0.05");
	assert_eq!(validators[0].website, "");
	assert_eq!(validators[1].status, ValidatorStatus::Inactive);
	assert_eq!(validators[1].status_detailed, ValidatorStatusDetail::Inactive);
}

#[tokio::test]
async fn test_get_block_paths() {
	let mut transport = MockRestTransport::new();
	transport
		.expect_send_get_request()
		.with(predicate::eq("blocks/5"))
		.times(1)
		.returning(|_| Ok(block_payload("cosmoshub-2", 5)));
	transport
		.expect_send_get_request()
		.with(predicate::eq("blocks/latest"))
		.times(1)
		.returning(|_| Ok(block_payload("cosmoshub-2", 9)));

	let client = cosmos_client(transport);
	let block = client.get_block(Some(5)).await.unwrap();
	assert_eq!(block.height, 5);
	assert_eq!(block.hash, "HASH5");
	assert_eq!(block.chain_id, "cosmoshub-2");
	assert_eq!(block.transactions, 2);

	let latest = client.get_block(None).await.unwrap();
	assert_eq!(latest.height, 9);
}

#[tokio::test]
async fn test_get_block_without_header_is_malformed() {
	let mut transport = MockRestTransport::new();
	transport
		.expect_send_get_request()
		.returning(|_| Ok(json!({"block_meta": {"block_id": {"hash": "X"}}})));

	let result = cosmos_client(transport).get_block(Some(1)).await;
	assert!(matches!(result, Err(BlockChainError::MalformedPayload(_))));
}

#[tokio::test]
async fn test_get_balances_by_family() {
	let mut cosmos = MockRestTransport::new();
	cosmos
		.expect_send_get_request()
		.with(path_eq(format!("bank/balances/{}", ACCOUNT_A)))
		.returning(|_| {
			Ok(json!([
				{"denom": "uatom", "amount": "1000"},
				{"denom": "photino", "amount": "5"}
			]))
		});
	let balances = cosmos_client(cosmos).get_balances(ACCOUNT_A).await.unwrap();
	assert_eq!(balances.len(), 2);
	assert_eq!(balances[0].denom, "uatom");
	assert_eq!(balances[0].amount, Decimal::new(1000, 0));

	// Older gaia nodes answer a single coin object
	let mut gaia = MockRestTransport::new();
	gaia.expect_send_get_request()
		.returning(|_| Ok(json!({"denom": "stake", "amount": "12"})));
	let balances = gaia_client(gaia).get_balances(ACCOUNT_A).await.unwrap();
	assert_eq!(balances.len(), 1);
	assert_eq!(balances[0].denom, "stake");
}

#[tokio::test]
async fn test_get_delegations_and_errored_delegation() {
	let mut transport = MockRestTransport::new();
	transport
		.expect_send_get_request()
		.with(path_eq(format!(
			"staking/delegators/{}/delegations",
			ACCOUNT_A
		)))
		.returning(|_| {
			Ok(json!([
				{
					"delegator_address": ACCOUNT_A,
					"validator_address": OPERATOR_A,
					"shares": "10.0",
					"balance": "10"
				},
				{"error": "no delegation"}
			]))
		});
	transport
		.expect_send_get_request()
		.with(path_eq(format!(
			"staking/delegators/{}/delegations/{}",
			ACCOUNT_A, OPERATOR_B
		)))
		.returning(|_| Ok(json!({"error": "no delegation"})));

	let client = cosmos_client(transport);
	let delegations = client.get_delegations(ACCOUNT_A).await.unwrap();
	assert_eq!(delegations.len(), 2);
	assert_eq!(delegations[0].validator_address, OPERATOR_A);
	assert_eq!(delegations[0].amount, Decimal::new(10, 0));
	assert!(delegations[1].delegator_address.is_empty());
	assert_eq!(delegations[1].amount, Decimal::ZERO);

	let delegation = client.get_delegation(ACCOUNT_A, OPERATOR_B).await.unwrap();
	assert!(delegation.validator_address.is_empty());
}

#[tokio::test]
async fn test_get_transaction() {
	let mut transport = MockRestTransport::new();
	transport
		.expect_send_get_request()
		.with(predicate::eq("txs/ABC123"))
		.returning(|_| Ok(transaction_payload("ABC123")));

	let transaction = cosmos_client(transport)
		.get_transaction("ABC123")
		.await
		.unwrap();
	assert_eq!(transaction.hash, "ABC123");
	assert_eq!(transaction.height, 42);
	assert_eq!(transaction.message_type, "cosmos-sdk/MsgSend");
	assert_eq!(transaction.group, Some(TransactionGroup::Banking));
	assert!(transaction.success);
	assert_eq!(transaction.memo, "sent from a test");
	assert_eq!(transaction.fee.denom, "uatom");
	assert_eq!(transaction.fee.amount, Decimal::new(5000, 0));
}

#[tokio::test]
async fn test_transport_failure_propagates() {
	let mut transport = MockRestTransport::new();
	transport
		.expect_send_get_request()
		.returning(|_| Err(TransportError::network("node unreachable", None, None)));

	let result = cosmos_client(transport).get_validators().await;
	match result {
		Err(BlockChainError::Transport(TransportError::Network(ctx))) => {
			assert!(ctx.to_string().contains("node unreachable"));
		}
		other => panic!("expected a transport error, got {:?}", other.map(|v| v.len())),
	}
}

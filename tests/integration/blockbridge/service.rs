use mockall::predicate;
use mockito::Server;
use std::{sync::Arc, time::Duration};
use tokio::time::timeout;

use chain_gateway::{
	models::{Block, ChainFamily},
	services::{
		blockbridge::{
			BlockBridgeService, BridgeConfig, BridgeState, TendermintEventFeed, TopicRecvError,
		},
		blockchain::{BlockChainError, ChainSource},
	},
	utils::{metrics::BLOCKS_PUBLISHED, tests::builders::block::BlockBuilder, HttpClientConfig},
};

use crate::integration::mocks::{
	block_payload, create_lcd_mock, create_test_network, mock_source, scripted_feed,
	spawn_local_node,
};

const WAIT: Duration = Duration::from_secs(5);

fn block(network_id: &str, height: u64) -> Result<Block, BlockChainError> {
	Ok(BlockBuilder::new()
		.network_id(network_id)
		.height(height)
		.build())
}

fn service(topic_capacity: usize) -> BlockBridgeService {
	BlockBridgeService::new(BridgeConfig {
		topic_capacity,
		..BridgeConfig::default()
	})
}

#[tokio::test]
async fn test_every_subscriber_receives_blocks_in_event_order() {
	let bridges = service(16);
	let (feed, _) = scripted_feed(vec![10, 11, 12]);
	let mut source = mock_source("cosmoshub");
	source
		.expect_get_block()
		.with(predicate::function(|height: &Option<u64>| height.is_some()))
		.times(3)
		.returning(|height| block("cosmoshub", height.unwrap_or_default()));

	let mut first = bridges.subscribe("cosmoshub").await;
	let mut second = bridges.subscribe("cosmoshub").await;
	bridges
		.start_network_bridge(feed, Arc::new(source))
		.await
		.unwrap();

	for subscription in [&mut first, &mut second] {
		let mut heights = Vec::new();
		for _ in 0..3 {
			let block = timeout(WAIT, subscription.recv()).await.unwrap().unwrap();
			heights.push(block.height);
		}
		assert_eq!(heights, vec![10, 11, 12]);
	}

	bridges.stop_network_bridge("cosmoshub").await.unwrap();
}

#[tokio::test]
async fn test_failed_fetch_drops_only_that_block() {
	let bridges = service(16);
	let (feed, _) = scripted_feed(vec![1, 2, 3]);
	let mut source = mock_source("cosmoshub");
	source
		.expect_get_block()
		.with(predicate::eq(Some(2)))
		.returning(|_| Err(BlockChainError::internal_error("node hiccup", None, None)));
	source
		.expect_get_block()
		.returning(|height| block("cosmoshub", height.unwrap_or_default()));

	let mut subscription = bridges.subscribe("cosmoshub").await;
	bridges
		.start_network_bridge(feed, Arc::new(source))
		.await
		.unwrap();

	let first = timeout(WAIT, subscription.recv()).await.unwrap().unwrap();
	let second = timeout(WAIT, subscription.recv()).await.unwrap().unwrap();
	assert_eq!((first.height, second.height), (1, 3));
	assert_eq!(bridges.active_networks().await, vec!["cosmoshub"]);

	bridges.stop_all().await.unwrap();
}

#[tokio::test]
async fn test_slow_subscriber_is_told_how_many_blocks_it_missed() {
	let bridges = service(2);
	let (feed, _) = scripted_feed(vec![1, 2, 3, 4, 5]);
	let mut source = mock_source("lagging-net");
	source
		.expect_get_block()
		.returning(|height| block("lagging-net", height.unwrap_or_default()));

	let mut slow = bridges.subscribe("lagging-net").await;
	bridges
		.start_network_bridge(feed, Arc::new(source))
		.await
		.unwrap();

	// Let the bridge publish everything before the consumer reads anything
	let published = BLOCKS_PUBLISHED.with_label_values(&["lagging-net"]);
	timeout(WAIT, async {
		while published.get() < 5 {
			tokio::time::sleep(Duration::from_millis(10)).await;
		}
	})
	.await
	.unwrap();

	// Only the last two fit in the buffer
	assert_eq!(slow.recv().await, Err(TopicRecvError::Lagged(3)));
	assert_eq!(slow.recv().await.unwrap().height, 4);
	assert_eq!(slow.recv().await.unwrap().height, 5);

	bridges.stop_all().await.unwrap();
}

#[tokio::test]
async fn test_bridge_state_is_observable() {
	let bridges = service(16);
	let (feed, subscribe_calls) = scripted_feed(vec![]);
	let source = mock_source("cosmoshub");

	bridges
		.start_network_bridge(feed, Arc::new(source))
		.await
		.unwrap();
	let mut state = bridges.watch_state("cosmoshub").await.unwrap();
	timeout(WAIT, state.wait_for(|s| *s == BridgeState::Subscribed))
		.await
		.unwrap()
		.unwrap();
	assert_eq!(
		subscribe_calls.load(std::sync::atomic::Ordering::SeqCst),
		1
	);

	bridges.stop_network_bridge("cosmoshub").await.unwrap();
	assert!(bridges.state("cosmoshub").await.is_none());
}

#[tokio::test]
async fn test_node_events_become_published_blocks() {
	let mut lcd = Server::new_async().await;
	let mocks = vec![
		create_lcd_mock(&mut lcd, "/blocks/100", block_payload("cosmoshub-2", 100)),
		create_lcd_mock(&mut lcd, "/blocks/101", block_payload("cosmoshub-2", 101)),
	];
	let latest = lcd
		.mock("GET", "/blocks/latest")
		.expect(0)
		.create();

	let (ws_url, node, node_task) = spawn_local_node().await;
	let mut network = create_test_network("cosmoshub", ChainFamily::Cosmos, &lcd.url());
	network.ws_url = Some(ws_url);

	let source = ChainSource::from_network(
		&network,
		&HttpClientConfig::with_timeout(Duration::from_secs(5)),
	)
	.unwrap();
	let bridges = service(16);
	let mut subscription = bridges.subscribe("cosmoshub").await;
	bridges
		.start_network_bridge(TendermintEventFeed::new(&network), Arc::new(source))
		.await
		.unwrap();

	node.send(100).unwrap();
	node.send(101).unwrap();

	let first = timeout(WAIT, subscription.recv()).await.unwrap().unwrap();
	let second = timeout(WAIT, subscription.recv()).await.unwrap().unwrap();
	assert_eq!(first.height, 100);
	assert_eq!(first.hash, "HASH100");
	assert_eq!(first.chain_id, "cosmoshub-2");
	assert_eq!(second.height, 101);

	bridges.stop_all().await.unwrap();
	drop(node);
	let _ = timeout(WAIT, node_task).await;

	for mock in mocks {
		mock.assert();
	}
	latest.assert();
}

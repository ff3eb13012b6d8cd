#![no_main]

use chain_gateway::{
    models::{CosmosProposal, CosmosValidator, GaiaProposal, GaiaValidator},
    services::reducer::{reduce_coin_list, CosmosReducer, FamilyReducer, GaiaReducer, ReducerContext},
};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<Value>(data) else {
        return;
    };
    let ctx = ReducerContext::new("fuzz-net", "cosmos");

    let _ = reduce_coin_list(&value);
    if let Ok(raw) = serde_json::from_value::<CosmosValidator>(value.clone()) {
        let _ = CosmosReducer::reduce_validator(&raw, &ctx);
    }
    if let Ok(raw) = serde_json::from_value::<GaiaValidator>(value.clone()) {
        let _ = GaiaReducer::reduce_validator(&raw, &ctx);
    }
    if let Ok(raw) = serde_json::from_value::<CosmosProposal>(value.clone()) {
        let _ = CosmosReducer::reduce_proposal(&raw, &ctx);
    }
    if let Ok(raw) = serde_json::from_value::<GaiaProposal>(value) {
        let _ = GaiaReducer::reduce_proposal(&raw, &ctx);
    }
});

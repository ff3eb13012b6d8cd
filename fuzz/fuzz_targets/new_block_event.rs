#![no_main]

use chain_gateway::services::blockbridge::parse_new_block_event;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let _ = parse_new_block_event(&text);
});

//! Send one test message through the local relay and print the response

use tracing::error;
use wisdom_gate_relay::core::logging::init_logging;
use wisdom_gate_relay::core::probe::{ChatProbe, ProbeTarget, test_message_request};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging("warn");

    let probe = ChatProbe::new(ProbeTarget::local());
    let request = test_message_request("Hello, this is a test message through the local server.");

    if let Err(e) = probe.run(&request, &mut std::io::stdout()).await {
        error!("Failed to write probe report: {}", e);
    }
}

//! Send a bare "Hello" to the Wisdom Gate API and print the response

use tracing::error;
use wisdom_gate_relay::core::logging::init_logging;
use wisdom_gate_relay::core::probe::{ChatProbe, ProbeTarget, hello_request};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging("warn");

    let probe = ChatProbe::new(ProbeTarget::hello());

    if let Err(e) = probe.run(&hello_request(), &mut std::io::stdout()).await {
        error!("Failed to write probe report: {}", e);
    }
}

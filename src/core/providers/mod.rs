//! Provider implementations

pub mod mock;
pub mod wisdom_gate;

pub use mock::MockProvider;
pub use wisdom_gate::WisdomGateProvider;

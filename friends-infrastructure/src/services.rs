pub mod slack_transport;
pub mod untappd_client;
pub mod untappd_payloads;

pub use slack_transport::*;
pub use untappd_client::*;
pub use untappd_payloads::*;

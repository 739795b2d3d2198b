// monday.com Jobs Embed - server
//
// Serves a careers-page embed backed by a single monday.com board:
// an HTML fragment, a JSON view, and a privileged cache flush. All board
// access goes through jobs-cache so one fetch per TTL window serves every
// page view.

pub mod config;
pub mod render;
pub mod server;

pub use config::*;

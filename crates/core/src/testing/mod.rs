//! Test doubles for exercising batch logic without a real transcoder.

mod mock_remuxer;

pub use mock_remuxer::{MockRemuxer, RecordedRemux};

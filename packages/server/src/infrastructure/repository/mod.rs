//! Repository 実装
//!
//! - `inmemory`: プロセス内メモリに全 Room を保持する実装（永続化なし）

pub mod inmemory;

pub use inmemory::InMemoryRoomRepository;

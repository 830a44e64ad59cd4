//! Application services for board orchestration.

mod board;
mod store_adapter;

pub use board::{
    BoardPorts, BoardService, BoardServiceError, BoardServiceResult, DeleteConfirmation, Outcome,
};
pub use store_adapter::{Durability, LoadedBoard, Persistence, TaskStoreAdapter};

//! Session lifecycle: data model, storage and orchestration.

mod manager;
mod model;
mod store;

pub use manager::SessionManager;
pub use model::{
    Player, PlayerView, RoundRecord, RoundResult, Score, Session, SessionId, SessionView,
};
pub use store::SessionStore;

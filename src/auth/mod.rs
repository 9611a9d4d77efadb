pub mod accounts;
pub mod context;
pub mod gate;
pub mod session;

pub use context::AuthContext;
pub use gate::{authorize, Access, Page, Route};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};

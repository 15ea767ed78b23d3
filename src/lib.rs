//! # authshell
//!
//! Client-side authentication session core: email/password login, bearer
//! token persistence, and route protection for an application shell.
//!
//! ARCHITECTURE
//! ============
//! `session::SessionManager` is the only stateful component. It talks to
//! three narrow collaborators: an `AuthTransport` for the login call, a
//! `TokenStorage` for the persisted token, and a `Navigator` driven by the
//! route guard and by the forced-logout path of `AuthorizedClient`.
//!
//! One manager is built at process start and shared through `Arc`; nothing
//! looks it up implicitly.

pub mod client;
pub mod config;
pub mod guard;
pub mod session;
pub mod storage;
pub mod transport;

pub use client::{AuthorizedClient, RequestError};
pub use config::SessionConfig;
pub use guard::{Access, Decision, Navigator, RouteGuard};
pub use session::{Session, SessionManager, TOKEN_KEY};
pub use storage::{FileStorage, MemoryStorage, TokenStorage};
pub use transport::{AuthTransport, Credentials, HttpTransport, LoginResponse, TransportError};

//! Client-side roster: a read-only remote user listing with local-only
//! create, edit and delete layered on top.

pub mod actions;
pub mod config;
pub mod controller;
pub mod modal;
pub mod overlay;
pub mod pagination;
pub mod remote;
pub mod store;

pub use actions::RosterAction;
pub use config::{PagingMode, RefreshPolicy, RosterConfig};
pub use controller::{FetchOutcome, FetchTicket, PendingFetch, RosterController, RosterView};
pub use modal::{FormMode, FormModalController, ModalState};
pub use remote::{HttpUserSource, RemoteFetchError, RemoteUserSource};
pub use store::UserCollectionStore;

pub mod control;
pub mod error;
pub mod events;
pub mod feed;
pub mod live;
pub mod logging;
pub mod model;
pub mod remote;
pub mod session;
pub mod store;
pub mod tui;

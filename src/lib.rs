//! Terminal rendition of an identity enrollment portal.
//!
//! The core lives in [`wizard`] (form state, validation, step control) and
//! [`status`] (status lookup and the checker session). [`portal`] wires the
//! core to a vim-style ratatui front end.

pub mod error;
pub mod event;
pub mod narration;
pub mod portal;
pub mod router;
pub mod status;
pub mod timer;
pub mod ui;
pub mod vim;
pub mod wizard;

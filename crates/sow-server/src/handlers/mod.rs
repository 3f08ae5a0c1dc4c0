//! Request handlers.

pub(crate) mod export;
pub(crate) mod preview;
pub(crate) mod publish;
pub(crate) mod templates;

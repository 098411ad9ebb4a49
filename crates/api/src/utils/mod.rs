//! Cross-cutting helpers for the HTTP layer

pub mod logging;

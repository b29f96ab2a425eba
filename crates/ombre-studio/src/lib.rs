//! Terminal front end for **Ombre**: the `ombre` command line and the
//! interactive studio.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`cli`] | `clap` definitions, initial gradient from flags |
//! | [`config`] | `StudioConfig` |
//! | [`logging`] | `env_logger` setup |
//! | [`command`] | studio command lexer and parser |
//! | [`shell`] | `Studio` session and its input loop |
//! | [`view`], [`theme`] | screen text and colors |
//! | [`preview`] | half-block gradient swatch |

pub mod cli;
pub mod command;
pub mod config;
pub mod logging;
pub mod preview;
pub mod shell;
pub mod theme;
pub mod view;

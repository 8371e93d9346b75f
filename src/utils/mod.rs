//! 工具模块：日志宏与日志预览
pub mod log_macros;
pub mod preview;

pub(crate) use self::log_macros::log_debug;
pub use self::preview::preview_compact;

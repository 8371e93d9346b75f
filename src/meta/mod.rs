//! 元数据模块：判断输入是否具备转换条件
pub mod gate;

pub use self::gate::MetadataGate;

//! 基础设施层（Infrastructure）
//!
//! 聊天平台传输层的两个接缝：
//! - `Upload` - 把收到的文件下载到本地路径
//! - `Delivery` - 把文字回复和生成的文档发回给请求方

pub mod delivery;
pub mod upload;

pub use delivery::{Delivery, DirectoryDelivery, MemoryDelivery, Reply};
pub use upload::{BytesUpload, LocalFileUpload, Upload};

/// 健康检查
pub mod health;
/// 二维码生成
pub mod qrcode;
/// 首页与静态文件
pub mod static_files;

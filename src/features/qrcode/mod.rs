pub mod color;
pub mod encoder;
pub mod handler;
pub mod models;
pub mod params;
pub mod raster;
pub mod service;

// 对外导出路由构建函数，便于 main.rs 引用
pub use handler::create_qrcode_router;
pub use encoder::{CodeMatrix, EncodeError, MatrixEncoder, QrcodeEncoder};
pub use models::{EcLevel, GenerateQuery, GenerationRequest, Rgb8};

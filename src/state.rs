use std::sync::Arc;

use crate::config::{AppConfig, GenerateConfig};
use crate::features::qrcode::{MatrixEncoder, QrcodeEncoder};
use crate::startup::StaticAssets;

/// 聚合的应用共享状态（全部只读）
#[derive(Clone)]
pub struct AppState {
    /// 启动期预加载的静态资源
    pub assets: Arc<StaticAssets>,
    /// 首页资源的相对路径
    pub index_path: Arc<str>,
    /// 二维码矩阵编码器
    pub encoder: Arc<dyn MatrixEncoder>,
    /// 尺寸默认值与上限
    pub generate: GenerateConfig,
}

impl AppState {
    /// 按配置组装状态，使用默认的 qrcode 编码器
    pub fn new(config: &AppConfig, assets: StaticAssets) -> Self {
        Self {
            assets: Arc::new(assets),
            index_path: Arc::from(config.assets.index.as_str()),
            encoder: Arc::new(QrcodeEncoder),
            generate: config.generate,
        }
    }

    /// 替换矩阵编码器（测试注入用）
    pub fn with_encoder(mut self, encoder: Arc<dyn MatrixEncoder>) -> Self {
        self.encoder = encoder;
        self
    }
}

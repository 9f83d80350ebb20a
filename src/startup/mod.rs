/// 静态资源预加载器
pub mod asset_loader;

pub use asset_loader::{AssetError, StaticAsset, StaticAssets, load_static_assets};

//! Gallery Server - digital-collectibles economy core
//!
//! # 架构概述
//!
//! 本模块是画廊藏品经济系统的核心，提供以下功能：
//!
//! - **收益引擎** (`services/gallery_coin`): 离线/在线时长结算的被动产币
//! - **盲盒引擎** (`services/box`): 三种盲盒的加权随机奖励
//! - **系列增益** (`services/series_buff`): 集齐检测与增益聚合
//! - **周边折扣** (`services/merchandise`): 份额与集齐门槛的折扣计算
//! - **分红引擎** (`services/dividend`): 按份额比例的收益分成
//! - **欣赏互动** (`services/appreciation`): 限额的社交奖励循环
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//!
//! # 模块结构
//!
//! ```text
//! gallery-server/src/
//! ├── common/        # 错误、日志
//! ├── server/        # 配置、状态
//! ├── db/            # 数据库层（models + repository）
//! └── services/      # 经济引擎
//! ```
//!
//! The HTTP boundary is intentionally absent: every engine operation takes
//! string identifiers and plain parameters and returns `shared` payloads,
//! so any transport can front this crate.

pub mod common;
pub mod db;
pub mod server;
pub mod services;

// Re-export 公共类型
pub use common::{AppError, AppResult};
pub use db::DbService;
pub use server::{AppState, Config};
pub use services::{
    AppreciationService, BoxService, CollectionService, DividendService, GalleryCoinService,
    MerchandiseService, SeriesBuffService,
};

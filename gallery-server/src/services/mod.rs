//! 服务层 - 经济引擎
//!
//! # 引擎列表
//!
//! - [`GalleryCoinService`] - 被动产币的计算与结算
//! - [`SeriesBuffService`] - 集齐检测与增益聚合
//! - [`BoxService`] - 盲盒随机奖励
//! - [`MerchandiseService`] - 周边折扣计算
//! - [`DividendService`] - 分红结算与支付
//! - [`AppreciationService`] - 欣赏互动奖励
//! - [`CollectionService`] - 份额发行、碎片合成与转赠
//!
//! Every public operation takes string identifiers and plain parameters and
//! returns `shared` payloads, so the transport in front is swappable.

pub mod appreciation_service;
pub mod box_service;
pub mod collection_service;
pub mod dividend_service;
pub mod gallery_coin_service;
pub mod merchandise_service;
pub mod series_buff_service;

pub use appreciation_service::AppreciationService;
pub use box_service::BoxService;
pub use collection_service::CollectionService;
pub use dividend_service::DividendService;
pub use gallery_coin_service::GalleryCoinService;
pub use merchandise_service::MerchandiseService;
pub use series_buff_service::SeriesBuffService;

use crate::common::{AppError, AppResult};
use surrealdb::RecordId;

/// Parse a `table:key` identifier coming from the boundary layer
pub(crate) fn parse_id(kind: &str, id: &str) -> AppResult<RecordId> {
    id.parse::<RecordId>()
        .map_err(|_| AppError::InvalidInput(format!("Invalid {kind} ID: {id}")))
}

//! Application state
//!
//! Composition root: owns the database handle and wires every engine. The
//! boundary layer (out of scope here) holds one `AppState` and calls engine
//! methods with plain identifiers.

use std::path::PathBuf;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::common::AppResult;
use crate::db::DbService;
use crate::server::Config;
use crate::services::{
    AppreciationService, BoxService, CollectionService, DividendService, GalleryCoinService,
    MerchandiseService, SeriesBuffService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub gallery_coins: GalleryCoinService,
    pub series_buffs: SeriesBuffService,
    pub boxes: BoxService,
    pub merchandise: MerchandiseService,
    pub dividends: DividendService,
    pub appreciations: AppreciationService,
    pub collections: CollectionService,
}

impl AppState {
    pub async fn initialize(config: Config) -> AppResult<Self> {
        // 1. Initialize DB under work_dir/gallery.db
        let db_path = PathBuf::from(&config.work_dir).join("gallery.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;
        let db = db_service.db;

        // 2. Wire engines; buffs feed accrual, boxes and discounts
        let series_buffs = SeriesBuffService::new(db.clone());
        let gallery_coins = GalleryCoinService::new(db.clone(), series_buffs.clone());
        let boxes = BoxService::new(db.clone(), series_buffs.clone());
        let merchandise = MerchandiseService::new(db.clone(), series_buffs.clone());
        let dividends = DividendService::new(db.clone());
        let appreciations = AppreciationService::new(db.clone());
        let collections = CollectionService::new(db.clone(), series_buffs.clone());

        Ok(Self {
            config,
            db,
            gallery_coins,
            series_buffs,
            boxes,
            merchandise,
            dividends,
            appreciations,
            collections,
        })
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }
}

//! Database Models

// Identity & wallet
pub mod gallery_coin;
pub mod user;

// Catalog
pub mod copyright;
pub mod series;

// Ownership
pub mod fragment;
pub mod share;

// Economy events
pub mod appreciation;
pub mod box_record;
pub mod dividend;
pub mod user_buff;

// Re-exports
pub use appreciation::Appreciation;
pub use box_record::BoxRecord;
pub use copyright::{Copyright, CopyrightCreate};
pub use dividend::{Dividend, DividendStatus};
pub use fragment::Fragment;
pub use gallery_coin::GalleryCoin;
pub use series::{Series, SeriesCreate};
pub use share::Share;
pub use user::{User, UserCreate};
pub use user_buff::UserBuff;

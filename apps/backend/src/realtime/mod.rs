//! Snapshot feed: the push half of the persistence collaborator.

pub mod hub;
pub mod publisher;
pub mod subscription;

pub use hub::SheetFeedHub;
pub use publisher::PublishingSheetRepo;
pub use subscription::SheetSubscription;

pub mod app_config;
pub mod database;
pub mod room_repo;
pub mod booking_repo;
pub mod review_repo;
pub mod memory;

pub use database::DbClient;
pub use room_repo::PgRoomRepository;
pub use booking_repo::PgBookingRepository;
pub use review_repo::PgReviewRepository;
pub use memory::MemoryStore;

pub mod inspection_repo;
pub mod item_repo;
pub mod request_repo;
pub mod user_repo;

pub use inspection_repo::InspectionRepository;
pub use item_repo::ItemRepository;
pub use request_repo::RequestRepository;
pub use user_repo::UserRepository;

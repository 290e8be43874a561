pub mod domain;
pub mod repository;
pub mod file_store;
pub mod seaorm_store;

pub use domain::{NewRestaurant, Restaurant, RestaurantList, RestaurantPatch};
pub use file_store::FileRestaurantStore;
pub use repository::RestaurantStore;
pub use seaorm_store::SeaOrmRestaurantStore;

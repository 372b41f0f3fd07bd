pub mod cities;
pub mod dashboard;
pub mod health;
pub mod refresh;

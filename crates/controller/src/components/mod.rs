pub mod health;
pub mod radio;

pub mod home;
pub mod not_found;
pub mod portal;
pub mod residents;

pub use home::Home;
pub use not_found::NotFound;
pub use portal::Portal;
pub use residents::Residents;

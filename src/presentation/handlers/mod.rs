mod enroll;
mod health;
mod verify;

pub use enroll::enroll_handler;
pub use health::health_handler;
pub use verify::verify_handler;

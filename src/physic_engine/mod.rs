pub mod geometry;
pub use self::geometry::{distance, random_in_range};

pub mod trail;
pub use self::trail::Trail;

pub mod rocket;
pub use self::rocket::{Arrival, Rocket};

pub mod particle;
pub use self::particle::Particle;

pub mod config;
pub use self::config::ShowConfig;

pub mod fireworks_show;
pub use self::fireworks_show::{FireworksShow, FrameReport};

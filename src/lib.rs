pub mod simulator;
pub use simulator::Simulator;
// Scheduler (animation frame + minuteries)
pub mod scheduler;
// Renderer engine
pub mod renderer_engine;
pub use renderer_engine::{PixelCanvas, RendererEngine, Surface};
// Physic engine
pub mod physic_engine;
pub use physic_engine::{FireworksShow, ShowConfig};
// Window engine
pub mod window_engine;
pub use window_engine::{HostEvent, HostKey, WindowEngine};

// Profiler
pub mod profiler;
// Utilities
pub mod utils;

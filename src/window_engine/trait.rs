use anyhow::Result;

/// Touches reconnues par l'hôte (contrôles clavier du spectacle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKey {
    Escape,
    /// `+` : 10 particules de plus par explosion
    IncreaseParticles,
    /// `-` : 10 particules de moins par explosion
    DecreaseParticles,
    /// `A`
    ToggleAutoLaunch,
    /// `R` : relit `assets/config/show.toml`
    ReloadConfig,
    /// `P` : capture PNG du canvas
    Snapshot,
}

/// Événements d'entrée, indépendants de la bibliothèque de fenêtrage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Clic / toucher, coordonnées relatives à la surface
    PointerDown { x: f32, y: f32 },
    /// Nouvelle taille logique de la fenêtre (taille du canvas)
    Resized { width: i32, height: i32 },
    /// Nouvelle taille du framebuffer (viewport GPU)
    FramebufferResized { width: i32, height: i32 },
    Key(HostKey),
    CloseRequested,
}

pub trait WindowEngine {
    fn init(width: i32, height: i32, title: &str) -> Result<Self>
    where
        Self: Sized;

    /// Récupère les événements accumulés depuis le dernier appel.
    fn poll_events(&mut self) -> Vec<HostEvent>;
    fn swap_buffers(&mut self);
    fn should_close(&self) -> bool;
    fn set_should_close(&mut self, value: bool);
    fn get_size(&self) -> (i32, i32);
    fn get_framebuffer_size(&self) -> (i32, i32);
}

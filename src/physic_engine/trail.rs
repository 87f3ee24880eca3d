use glam::Vec2;

/// Historique de positions de taille fixe, la plus récente en tête.
///
/// Sert uniquement au dessin (segment entre la plus ancienne position et la position courante),
/// jamais à la physique.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trail<const N: usize> {
    points: [Vec2; N],
}

impl<const N: usize> Trail<N> {
    /// Trail pré-rempli avec `N` copies de `pos`.
    pub fn filled(pos: Vec2) -> Self {
        Self { points: [pos; N] }
    }

    /// Insère `pos` en tête et oublie la plus ancienne entrée.
    pub fn push_front(&mut self, pos: Vec2) {
        if N == 0 {
            return;
        }
        self.points.rotate_right(1);
        self.points[0] = pos;
    }

    pub fn newest(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    pub fn oldest(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn as_slice(&self) -> &[Vec2] {
        &self.points
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Visibility {
    Hidden,
    Revealed,
    Matched,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Tile {
    pub face: &'static str,
    pub visibility: Visibility,
}

impl Tile {
    pub const fn new(face: &'static str) -> Self {
        Self {
            face,
            visibility: Visibility::Hidden,
        }
    }

    /// Face as seen by a player: hidden tiles don't expose it.
    pub fn visible_face(&self) -> Option<&'static str> {
        match self.visibility {
            Visibility::Hidden => None,
            Visibility::Revealed | Visibility::Matched => Some(self.face),
        }
    }
}

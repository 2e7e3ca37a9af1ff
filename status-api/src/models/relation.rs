/// A relation slot on an entity, filled only when a fetch plan asked for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Relation<T> {
    #[default]
    NotLoaded,
    Loaded(T),
}

impl<T> Relation<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::NotLoaded => None,
        }
    }

    pub fn into_loaded(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::NotLoaded => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

//! Appearance store - the persisted light/dark flag

use crate::storage::Storage;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Appearance {
    dark_mode: bool,
}

impl Appearance {
    pub fn load(storage: &Storage) -> Self {
        Appearance {
            dark_mode: storage.dark_mode(),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark_mode
    }

    pub fn toggle(&mut self, storage: &mut Storage) {
        self.dark_mode = !self.dark_mode;
        if let Err(e) = storage.set_dark_mode(self.dark_mode) {
            tracing::warn!(error = %e, "Failed to persist theme");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::open(dir.path());
        let mut appearance = Appearance::load(&storage);
        assert!(!appearance.is_dark());

        appearance.toggle(&mut storage);
        assert!(appearance.is_dark());
        assert!(Appearance::load(&Storage::open(dir.path())).is_dark());

        appearance.toggle(&mut storage);
        assert!(!Appearance::load(&Storage::open(dir.path())).is_dark());
    }
}

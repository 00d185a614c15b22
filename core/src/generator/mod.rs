use crate::*;
pub use random::*;

mod random;

/// Produces the mine layout for a board, once at creation and again on every reset.
pub trait MinefieldGenerator {
    fn generate(&mut self, config: &GameConfig) -> MineLayout;
}

/// Hands out the same layout every time, ignoring the requested density.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetMinefieldGenerator {
    layout: MineLayout,
}

impl PresetMinefieldGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }
}

impl MinefieldGenerator for PresetMinefieldGenerator {
    fn generate(&mut self, config: &GameConfig) -> MineLayout {
        if config.size != self.layout.size() {
            log::warn!(
                "Preset layout is {:?} but {:?} was requested, using the preset",
                self.layout.size(),
                config.size
            );
        }
        self.layout.clone()
    }
}
